//! Renewal history model
//!
//! One row per renewal submission. Rows are only ever inserted.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};

/// Progress of a renewal - maps the `process_status` ENUM
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "process_status", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum ProcessStatus {
    Pending,
    Approved,
    Completed,
}

impl ProcessStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProcessStatus::Pending => "PENDING",
            ProcessStatus::Approved => "APPROVED",
            ProcessStatus::Completed => "COMPLETED",
        }
    }
}

impl Default for ProcessStatus {
    fn default() -> Self {
        ProcessStatus::Pending
    }
}

impl fmt::Display for ProcessStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProcessStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "PENDING" => Ok(ProcessStatus::Pending),
            "APPROVED" => Ok(ProcessStatus::Approved),
            "COMPLETED" => Ok(ProcessStatus::Completed),
            _ => Err(format!("unknown process status '{}'", s)),
        }
    }
}

/// Renewal history - maps the `renewal_history` table
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct RenewalHistory {
    pub id: i64,
    pub document_id: i64,
    pub submission_date: NaiveDate,
    pub process_status: ProcessStatus,
    pub notes: String,
    pub new_document_number: String,
    pub new_issue_date: Option<NaiveDate>,
    pub new_expiry_date: Option<NaiveDate>,
}

/// A validated renewal submission, before it is stored
#[derive(Debug, Clone, PartialEq)]
pub struct RenewalSubmission {
    pub submission_date: NaiveDate,
    pub process_status: ProcessStatus,
    pub notes: String,
    /// Blank when the number does not change
    pub new_document_number: String,
    pub new_issue_date: Option<NaiveDate>,
    pub new_expiry_date: Option<NaiveDate>,
}
