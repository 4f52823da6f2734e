use bcrypt::{hash, verify, DEFAULT_COST};
use sqlx::PgPool;
use validator::Validate;

use crate::dto::auth_dto::{AccountResponse, CreateAccountRequest, LoginRequest, LoginResponse};
use crate::middleware::auth::AuthenticatedUser;
use crate::repositories::{AccountRepository, CompanyRepository};
use crate::utils::errors::{validation_error, AppError};
use crate::utils::jwt::{generate_token, JwtConfig};

const INVALID_CREDENTIALS: &str = "Invalid username or password";

pub struct AuthController {
    accounts: AccountRepository,
    companies: CompanyRepository,
}

impl AuthController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            accounts: AccountRepository::new(pool.clone()),
            companies: CompanyRepository::new(pool),
        }
    }

    pub async fn login(&self, request: LoginRequest, jwt_config: &JwtConfig) -> Result<LoginResponse, AppError> {
        request.validate()?;

        let account = self
            .accounts
            .find_by_username(request.username.trim())
            .await?
            .ok_or_else(|| AppError::Unauthorized(INVALID_CREDENTIALS.to_string()))?;

        let valid = verify(&request.password, &account.password_hash)
            .map_err(|e| AppError::Hash(format!("Error verifying password: {}", e)))?;
        if !valid {
            tracing::warn!(username = %account.username, "failed login");
            return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_string()));
        }

        let token = generate_token(account.user_id, &account.username, jwt_config)?;
        let user = AuthenticatedUser::from(account);
        tracing::info!(user_id = user.user_id, "login");

        Ok(LoginResponse::bearer(token, jwt_config.expiration, user))
    }

    /// ADMIN-only account provisioning
    pub async fn create_account(
        &self,
        user: &AuthenticatedUser,
        request: CreateAccountRequest,
    ) -> Result<AccountResponse, AppError> {
        user.require_admin()?;
        self.provision(request).await
    }

    /// Create an account and its profile together
    pub async fn provision(&self, request: CreateAccountRequest) -> Result<AccountResponse, AppError> {
        let form = request.into_form()?;

        if let Some(company_id) = form.company_id {
            if !self.companies.exists(company_id).await? {
                return Err(validation_error(
                    "company",
                    "Select a valid choice. That choice is not one of the available choices.",
                ));
            }
        }

        let password_hash = hash(&form.password, DEFAULT_COST)
            .map_err(|e| AppError::Hash(format!("Error hashing password: {}", e)))?;

        let created = self
            .accounts
            .create_with_profile(&form.username, &password_hash, form.role, form.company_id)
            .await?;
        tracing::info!(user_id = created.0.id, role = %created.1.role, "account created");

        Ok(AccountResponse::from(created))
    }
}
