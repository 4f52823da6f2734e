//! Company model
//!
//! Maps the `companies` table. A company owns its workers; deleting it
//! cascades to workers, their documents and renewal history, and clears the
//! company link on user profiles.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Company - maps the `companies` table
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct Company {
    pub id: i64,
    pub name: String,
    pub industry: String,
    pub address: String,
    pub contact_person: String,
}

/// Validated values written on create and update
#[derive(Debug, Clone, PartialEq)]
pub struct CompanyForm {
    pub name: String,
    pub industry: String,
    pub address: String,
    pub contact_person: String,
}
