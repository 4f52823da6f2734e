use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

use crate::models::document::{Document, DocumentForm, DocumentStatus, DocumentType, DocumentWithOwner};
use crate::models::renewal::{ProcessStatus, RenewalHistory, RenewalSubmission};
use crate::repositories::document_repository::DocumentFilters;
use crate::utils::validation::{non_blank, validate_not_blank, FormErrors};

// Document create and update body
#[derive(Debug, Default, Deserialize, Validate)]
pub struct DocumentRequest {
    pub worker: Option<i64>,
    #[serde(rename = "type", default)]
    pub doc_type: String,
    #[serde(default)]
    #[validate(length(max = 100), custom = "validate_not_blank")]
    pub document_number: String,
    #[serde(default)]
    pub issue_date: String,
    #[serde(default)]
    pub expiry_date: String,
    pub status: Option<String>,
}

impl DocumentRequest {
    pub fn into_form(self) -> Result<DocumentForm, ValidationErrors> {
        let mut errors = FormErrors::from_validate(&self);
        let worker_id = errors.reference("worker", self.worker);
        let doc_type = errors.choice::<DocumentType>("type", &self.doc_type);
        let issue_date = errors.date("issue_date", &self.issue_date);
        let expiry_date = errors.date("expiry_date", &self.expiry_date);
        let status = errors.choice_or("status", self.status.as_deref(), DocumentStatus::default());

        errors.finish(move || {
            Some(DocumentForm {
                worker_id: worker_id?,
                doc_type: doc_type?,
                document_number: self.document_number.trim().to_string(),
                issue_date: issue_date?,
                expiry_date: expiry_date?,
                status: status?,
            })
        })
    }
}

// Query string of the document list
#[derive(Debug, Default, Deserialize)]
pub struct DocumentListQuery {
    pub q: Option<String>,
    pub page: Option<String>,
    #[serde(rename = "type")]
    pub doc_type: Option<String>,
    pub status: Option<String>,
}

impl DocumentListQuery {
    /// Parse the optional search, type and status filters; blank means
    /// unfiltered
    pub fn filters(&self) -> Result<DocumentFilters, ValidationErrors> {
        let mut errors = FormErrors::default();
        let doc_type = non_blank(self.doc_type.as_deref())
            .map(|value| errors.choice::<DocumentType>("type", value));
        let status = non_blank(self.status.as_deref())
            .map(|value| errors.choice::<DocumentStatus>("status", value));

        errors.finish(|| {
            Some(DocumentFilters {
                search: non_blank(self.q.as_deref()).map(str::to_string),
                doc_type: doc_type.flatten(),
                status: status.flatten(),
            })
        })
    }
}

// Query string of the document detail
#[derive(Debug, Default, Deserialize)]
pub struct DocumentDetailQuery {
    pub renewal_status: Option<String>,
}

impl DocumentDetailQuery {
    /// Process status the renewal history is narrowed to, if any
    pub fn renewal_status(&self) -> Result<Option<ProcessStatus>, ValidationErrors> {
        let mut errors = FormErrors::default();
        let status = non_blank(self.renewal_status.as_deref())
            .map(|value| errors.choice::<ProcessStatus>("renewal_status", value));
        errors.finish(|| Some(status.flatten()))
    }
}

// Document with its display labels and remaining days
#[derive(Debug, Clone, Serialize)]
pub struct DocumentResponse {
    #[serde(flatten)]
    pub document: Document,
    pub type_label: &'static str,
    pub status_label: &'static str,
    pub days_until_expiry: i64,
}

impl DocumentResponse {
    pub fn new(document: Document, today: NaiveDate) -> Self {
        Self {
            type_label: document.doc_type.label(),
            status_label: document.status.label(),
            days_until_expiry: document.days_until_expiry(today),
            document,
        }
    }
}

// Document row of the list, with owner names
#[derive(Debug, Clone, Serialize)]
pub struct DocumentListItem {
    #[serde(flatten)]
    pub entry: DocumentWithOwner,
    pub type_label: &'static str,
    pub status_label: &'static str,
    pub days_until_expiry: i64,
}

impl DocumentListItem {
    pub fn new(entry: DocumentWithOwner, today: NaiveDate) -> Self {
        Self {
            type_label: entry.document.doc_type.label(),
            status_label: entry.document.status.label(),
            days_until_expiry: entry.document.days_until_expiry(today),
            entry,
        }
    }
}

// Document detail with renewal history, newest first
#[derive(Debug, Serialize)]
pub struct DocumentDetailResponse {
    #[serde(flatten)]
    pub document: DocumentListItem,
    pub renewals: Vec<RenewalHistory>,
}

// Renewal submission body; blank new values leave the document unchanged
#[derive(Debug, Default, Deserialize, Validate)]
pub struct RenewalRequest {
    pub submission_date: Option<String>,
    pub process_status: Option<String>,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    #[validate(length(max = 100))]
    pub new_document_number: String,
    pub new_issue_date: Option<String>,
    pub new_expiry_date: Option<String>,
}

impl RenewalRequest {
    /// `today` fills a missing submission date
    pub fn into_submission(self, today: NaiveDate) -> Result<RenewalSubmission, ValidationErrors> {
        let mut errors = FormErrors::from_validate(&self);
        let submission_date = errors
            .optional_date("submission_date", self.submission_date.as_deref())
            .unwrap_or(today);
        let process_status = errors.choice_or(
            "process_status",
            self.process_status.as_deref(),
            ProcessStatus::default(),
        );
        let new_issue_date = errors.optional_date("new_issue_date", self.new_issue_date.as_deref());
        let new_expiry_date = errors.optional_date("new_expiry_date", self.new_expiry_date.as_deref());

        errors.finish(move || {
            Some(RenewalSubmission {
                submission_date,
                process_status: process_status?,
                notes: self.notes.trim().to_string(),
                new_document_number: self.new_document_number.trim().to_string(),
                new_issue_date,
                new_expiry_date,
            })
        })
    }
}

// Outcome of a renewal
#[derive(Debug, Serialize)]
pub struct RenewalResponse {
    pub document: DocumentResponse,
    pub renewal: RenewalHistory,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_document_request_parses_codes() {
        let request: DocumentRequest = serde_json::from_str(
            r#"{"worker": 3, "type": "kitas", "document_number": "2C11AB", "issue_date": "2024-01-01", "expiry_date": "2025-01-01"}"#,
        )
        .unwrap();
        let form = request.into_form().unwrap();
        assert_eq!(form.doc_type, DocumentType::Kitas);
        assert_eq!(form.status, DocumentStatus::Active);
        assert_eq!(form.expiry_date, date(2025, 1, 1));
    }

    #[test]
    fn test_document_request_rejects_unknown_type_and_bad_date() {
        let request = DocumentRequest {
            worker: Some(1),
            doc_type: "PERMIT".to_string(),
            document_number: "X".to_string(),
            issue_date: "2024-01-01".to_string(),
            expiry_date: "2024-13-01".to_string(),
            status: Some("ARCHIVED".to_string()),
        };
        let errors = request.into_form().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("type"));
        assert!(fields.contains_key("expiry_date"));
        assert!(fields.contains_key("status"));
        assert!(!fields.contains_key("issue_date"));
    }

    #[test]
    fn test_list_filters() {
        let query = DocumentListQuery {
            q: Some(" E123 ".to_string()),
            doc_type: Some("VISA".to_string()),
            status: Some(" ".to_string()),
            ..Default::default()
        };
        let filters = query.filters().unwrap();
        assert_eq!(filters.search.as_deref(), Some("E123"));
        assert_eq!(filters.doc_type, Some(DocumentType::Visa));
        assert_eq!(filters.status, None);

        let bad = DocumentListQuery {
            doc_type: Some("NOPE".to_string()),
            ..Default::default()
        };
        assert!(bad.filters().is_err());
    }

    #[test]
    fn test_detail_query_renewal_status() {
        let query: DocumentDetailQuery = serde_json::from_str(r#"{"renewal_status": "approved"}"#).unwrap();
        assert_eq!(query.renewal_status().unwrap(), Some(ProcessStatus::Approved));
        assert_eq!(DocumentDetailQuery::default().renewal_status().unwrap(), None);

        let bad = DocumentDetailQuery {
            renewal_status: Some("DONE".to_string()),
        };
        let errors = bad.renewal_status().unwrap_err();
        assert!(errors.field_errors().contains_key("renewal_status"));
    }

    #[test]
    fn test_renewal_request_defaults() {
        let today = date(2024, 6, 1);
        let submission = RenewalRequest::default().into_submission(today).unwrap();
        assert_eq!(submission.submission_date, today);
        assert_eq!(submission.process_status, ProcessStatus::Pending);
        assert_eq!(submission.new_document_number, "");
        assert_eq!(submission.new_expiry_date, None);
    }

    #[test]
    fn test_renewal_request_rejects_bad_date() {
        let request = RenewalRequest {
            new_expiry_date: Some("2025/01/01".to_string()),
            ..Default::default()
        };
        let errors = request.into_submission(date(2024, 6, 1)).unwrap_err();
        assert!(errors.field_errors().contains_key("new_expiry_date"));
    }

    #[test]
    fn test_document_response_counts_days() {
        let document = Document {
            id: 1,
            worker_id: 1,
            doc_type: DocumentType::Visa,
            document_number: "V1".to_string(),
            issue_date: date(2024, 1, 1),
            expiry_date: date(2024, 1, 11),
            status: DocumentStatus::Active,
        };
        let response = DocumentResponse::new(document, date(2024, 1, 1));
        assert_eq!(response.days_until_expiry, 10);
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["type"], "VISA");
        assert_eq!(json["type_label"], "Visa");
        assert_eq!(json["status_label"], "Aktif");
        assert_eq!(json["days_until_expiry"], 10);
    }
}
