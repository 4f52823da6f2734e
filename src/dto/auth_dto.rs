use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

use crate::middleware::auth::AuthenticatedUser;
use crate::models::user::{UserAccount, UserProfile, UserRole};
use crate::utils::validation::{validate_not_blank, FormErrors};

// Login request
#[derive(Debug, Default, Deserialize, Validate)]
pub struct LoginRequest {
    #[serde(default)]
    #[validate(custom = "validate_not_blank")]
    pub username: String,
    #[serde(default)]
    #[validate(custom = "validate_not_blank")]
    pub password: String,
}

// Login response
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub token_type: String,
    pub expires_in: u64,
    pub user: AuthenticatedUser,
}

impl LoginResponse {
    pub fn bearer(token: String, expires_in: u64, user: AuthenticatedUser) -> Self {
        Self {
            token,
            token_type: "Bearer".to_string(),
            expires_in,
            user,
        }
    }
}

// Account provisioning body
#[derive(Debug, Default, Deserialize, Validate)]
pub struct CreateAccountRequest {
    #[serde(default)]
    #[validate(length(max = 150), custom = "validate_not_blank")]
    pub username: String,
    #[serde(default)]
    #[validate(length(min = 8, message = "Password must be at least 8 characters."))]
    pub password: String,
    pub role: Option<String>,
    pub company: Option<i64>,
}

/// Validated account values, password still in clear
#[derive(Debug, Clone, PartialEq)]
pub struct AccountForm {
    pub username: String,
    pub password: String,
    pub role: UserRole,
    pub company_id: Option<i64>,
}

impl CreateAccountRequest {
    pub fn into_form(self) -> Result<AccountForm, ValidationErrors> {
        let mut errors = FormErrors::from_validate(&self);
        let role = errors.choice_or("role", self.role.as_deref(), UserRole::default());

        errors.finish(move || {
            Some(AccountForm {
                username: self.username.trim().to_string(),
                password: self.password,
                role: role?,
                company_id: self.company,
            })
        })
    }
}

// Created account with its profile
#[derive(Debug, Serialize)]
pub struct AccountResponse {
    pub id: i64,
    pub username: String,
    pub created_at: DateTime<Utc>,
    pub profile: UserProfile,
}

impl From<(UserAccount, UserProfile)> for AccountResponse {
    fn from((account, profile): (UserAccount, UserProfile)) -> Self {
        Self {
            id: account.id,
            username: account.username,
            created_at: account.created_at,
            profile,
        }
    }
}
