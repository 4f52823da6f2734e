//! JWT authentication middleware
//!
//! Verifies the bearer token, reloads the account and its profile, and
//! injects an `AuthenticatedUser` into the request extensions.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use serde::Serialize;

use crate::{
    models::user::{AccountWithProfile, UserRole},
    repositories::AccountRepository,
    services::access_scope::Scope,
    state::AppState,
    utils::{errors::AppError, jwt},
};

/// Caller identity available to every protected handler
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AuthenticatedUser {
    pub user_id: i64,
    pub username: String,
    pub role: UserRole,
    pub company_id: Option<i64>,
}

impl AuthenticatedUser {
    pub fn scope(&self) -> Scope {
        Scope::for_profile(self.role, self.company_id)
    }

    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }

    /// 403 unless the caller is an ADMIN
    pub fn require_admin(&self) -> Result<(), AppError> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(AppError::Forbidden("Administrator role required".to_string()))
        }
    }
}

impl From<AccountWithProfile> for AuthenticatedUser {
    fn from(account: AccountWithProfile) -> Self {
        Self {
            user_id: account.user_id,
            username: account.username,
            role: account.role,
            company_id: account.company_id,
        }
    }
}

/// Reject requests without a valid token
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("Authorization token required".to_string()))?;

    let token = jwt::extract_token_from_header(auth_header)?;
    let claims = jwt::verify_token(token, &state.jwt_config())?;
    let user_id = claims.user_id()?;

    let account = AccountRepository::new(state.pool.clone())
        .find_by_id(user_id)
        .await?
        .ok_or_else(|| AppError::Unauthorized("User not found".to_string()))?;

    let user = AuthenticatedUser::from(account);
    tracing::debug!(user_id = user.user_id, role = %user.role, "authenticated request");

    request.extensions_mut().insert(user);

    Ok(next.run(request).await)
}
