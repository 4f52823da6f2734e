//! Worker model
//!
//! Maps the `workers` table. `passport_number` is unique across all
//! companies.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Worker - maps the `workers` table
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct Worker {
    pub id: i64,
    pub name: String,
    pub passport_number: String,
    pub nationality: String,
    pub birth_date: NaiveDate,
    pub company_id: i64,
    pub position: String,
    pub photo: Option<String>,
    pub start_date: Option<NaiveDate>,
}

/// Worker joined with the name of its company
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct WorkerWithCompany {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub worker: Worker,
    pub company_name: String,
}

/// Validated values written on create and update
#[derive(Debug, Clone, PartialEq)]
pub struct WorkerForm {
    pub name: String,
    pub passport_number: String,
    pub nationality: String,
    pub birth_date: NaiveDate,
    pub company_id: i64,
    pub position: String,
    pub photo: Option<String>,
    pub start_date: Option<NaiveDate>,
}
