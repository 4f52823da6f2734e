//! User account and profile models
//!
//! An account always has exactly one profile; both are written by the same
//! provisioning transaction.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};

/// Role of a user - maps the `user_role` ENUM
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "user_role", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum UserRole {
    /// Company administrator
    Admin,
    /// Client restricted to its own company
    Client,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "ADMIN",
            UserRole::Client => "CLIENT",
        }
    }
}

impl Default for UserRole {
    fn default() -> Self {
        UserRole::Admin
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "ADMIN" => Ok(UserRole::Admin),
            "CLIENT" => Ok(UserRole::Client),
            _ => Err(format!("unknown role '{}'", s)),
        }
    }
}

/// User account - maps the `user_accounts` table
#[derive(Debug, Clone, FromRow)]
pub struct UserAccount {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// User profile - maps the `user_profiles` table
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct UserProfile {
    pub id: i64,
    pub user_id: i64,
    pub role: UserRole,
    pub company_id: Option<i64>,
}

/// Account and profile as loaded for authentication
#[derive(Debug, Clone, FromRow)]
pub struct AccountWithProfile {
    pub user_id: i64,
    pub username: String,
    pub password_hash: String,
    pub role: UserRole,
    pub company_id: Option<i64>,
}
