//! Document model
//!
//! Maps the `documents` table together with the two Postgres enums it uses.
//! `status` is stored, not derived: it only changes through a renewal or an
//! explicit edit, so it can lag behind `expiry_date`.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};

use crate::services::expiry_service;

/// Kind of document - maps the `document_type` ENUM
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[sqlx(type_name = "document_type", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum DocumentType {
    Rptka,
    Imta,
    Visa,
    Kitas,
    Sktt,
    Passport,
}

impl DocumentType {
    pub const ALL: [DocumentType; 6] = [
        DocumentType::Rptka,
        DocumentType::Imta,
        DocumentType::Visa,
        DocumentType::Kitas,
        DocumentType::Sktt,
        DocumentType::Passport,
    ];

    /// Stored code, also used in exports and reminders
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentType::Rptka => "RPTKA",
            DocumentType::Imta => "IMTA",
            DocumentType::Visa => "VISA",
            DocumentType::Kitas => "KITAS",
            DocumentType::Sktt => "SKTT",
            DocumentType::Passport => "PASSPORT",
        }
    }

    /// Label shown to users
    pub fn label(&self) -> &'static str {
        match self {
            DocumentType::Rptka => "RPTKA",
            DocumentType::Imta => "IMTA/Notifikasi",
            DocumentType::Visa => "Visa",
            DocumentType::Kitas => "KITAS",
            DocumentType::Sktt => "SKTT",
            DocumentType::Passport => "Paspor",
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocumentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DocumentType::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown document type '{}'", s))
    }
}

/// Document status - maps the `document_status` ENUM
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq, Hash)]
#[sqlx(type_name = "document_status", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum DocumentStatus {
    Active,
    Expired,
}

impl DocumentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentStatus::Active => "ACTIVE",
            DocumentStatus::Expired => "EXPIRED",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DocumentStatus::Active => "Aktif",
            DocumentStatus::Expired => "Kedaluwarsa",
        }
    }
}

impl Default for DocumentStatus {
    fn default() -> Self {
        DocumentStatus::Active
    }
}

impl fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocumentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "ACTIVE" => Ok(DocumentStatus::Active),
            "EXPIRED" => Ok(DocumentStatus::Expired),
            _ => Err(format!("unknown document status '{}'", s)),
        }
    }
}

/// Document - maps the `documents` table
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct Document {
    pub id: i64,
    pub worker_id: i64,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub doc_type: DocumentType,
    pub document_number: String,
    pub issue_date: NaiveDate,
    pub expiry_date: NaiveDate,
    pub status: DocumentStatus,
}

impl Document {
    /// Whole days from `today` until expiry; negative once expired
    pub fn days_until_expiry(&self, today: NaiveDate) -> i64 {
        expiry_service::days_until_expiry(self.expiry_date, today)
    }

    pub fn is_expiring_within(&self, days: i64, today: NaiveDate) -> bool {
        expiry_service::is_expiring_within(self.expiry_date, today, days)
    }
}

/// Document joined with its worker and the worker's company
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct DocumentWithOwner {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub document: Document,
    pub worker_name: String,
    pub company_id: i64,
    pub company_name: String,
}

/// Validated values written by the plain create/edit path
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentForm {
    pub worker_id: i64,
    pub doc_type: DocumentType,
    pub document_number: String,
    pub issue_date: NaiveDate,
    pub expiry_date: NaiveDate,
    pub status: DocumentStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_type_codes() {
        assert_eq!("kitas".parse::<DocumentType>(), Ok(DocumentType::Kitas));
        assert_eq!("PASSPORT".parse::<DocumentType>(), Ok(DocumentType::Passport));
        assert!("DRIVING".parse::<DocumentType>().is_err());
        assert_eq!(DocumentType::Imta.label(), "IMTA/Notifikasi");
    }

    #[test]
    fn test_document_status_codes() {
        assert_eq!("expired".parse::<DocumentStatus>(), Ok(DocumentStatus::Expired));
        assert_eq!(DocumentStatus::default(), DocumentStatus::Active);
        assert_eq!(DocumentStatus::Active.to_string(), "ACTIVE");
    }

    #[test]
    fn test_days_until_expiry_is_stable() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let doc = Document {
            id: 1,
            worker_id: 1,
            doc_type: DocumentType::Visa,
            document_number: "V-1".to_string(),
            issue_date: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
            expiry_date: NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
            status: DocumentStatus::Active,
        };
        assert_eq!(doc.days_until_expiry(today), 30);
        assert_eq!(doc.days_until_expiry(today), doc.days_until_expiry(today));
        assert!(doc.is_expiring_within(30, today));
        assert!(!doc.is_expiring_within(29, today));
    }
}
