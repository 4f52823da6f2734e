//! Expiry reminder report
//!
//! Read-only report of ACTIVE documents expiring within 30/60/90 days. It
//! prints text and sends nothing.

use chrono::NaiveDate;

use crate::models::document::DocumentWithOwner;
use crate::services::expiry_service::{self, BucketSet, ExpiryBucket};
use crate::utils::validation::DATE_FORMAT;

/// Report over one set of candidate documents
#[derive(Debug, Clone)]
pub struct ReminderReport {
    pub today: NaiveDate,
    pub buckets: BucketSet<DocumentWithOwner>,
}

impl ReminderReport {
    pub fn build(documents: Vec<DocumentWithOwner>, today: NaiveDate) -> Self {
        Self {
            today,
            buckets: expiry_service::partition(documents, today),
        }
    }

    pub fn count(&self, bucket: ExpiryBucket) -> usize {
        self.buckets.get(bucket).len()
    }

    /// Buckets 30, 60, 90 in order: a count line, then one line per
    /// document ordered by expiry date.
    pub fn render(&self) -> String {
        let mut lines = Vec::new();
        for bucket in ExpiryBucket::ALL {
            let documents = self.buckets.get(bucket);
            lines.push(format!("Reminder {} hari: {} dokumen", bucket.days(), documents.len()));
            lines.extend(
                documents
                    .iter()
                    .map(|entry| format!("- {}", reminder_line(entry, self.today))),
            );
        }
        lines.into_iter().map(|line| line + "\n").collect()
    }
}

/// `{company} / {worker} / {type} {number} berakhir {expiry} ({days} hari)`
pub fn reminder_line(entry: &DocumentWithOwner, today: NaiveDate) -> String {
    let document = &entry.document;
    format!(
        "{} / {} / {} {} berakhir {} ({} hari)",
        entry.company_name,
        entry.worker_name,
        document.doc_type,
        document.document_number,
        document.expiry_date.format(DATE_FORMAT),
        document.days_until_expiry(today),
    )
}
