//! Renewal processing
//!
//! Applies a renewal submission onto a document. Persistence lives in the
//! document controller; this module only decides the new field values.

use chrono::NaiveDate;

use crate::models::document::{Document, DocumentStatus};
use crate::models::renewal::RenewalSubmission;

/// ACTIVE while `expiry_date` is today or later
pub fn status_for(expiry_date: NaiveDate, today: NaiveDate) -> DocumentStatus {
    if expiry_date >= today {
        DocumentStatus::Active
    } else {
        DocumentStatus::Expired
    }
}

/// Overwrite the fields the submission provides, then recompute the status
/// from the resulting expiry date. Absent values leave the document as is.
pub fn apply_renewal(document: &mut Document, submission: &RenewalSubmission, today: NaiveDate) {
    let new_number = submission.new_document_number.trim();
    if !new_number.is_empty() {
        document.document_number = new_number.to_string();
    }
    if let Some(issue_date) = submission.new_issue_date {
        document.issue_date = issue_date;
    }
    if let Some(expiry_date) = submission.new_expiry_date {
        document.expiry_date = expiry_date;
    }
    document.status = status_for(document.expiry_date, today);
}
