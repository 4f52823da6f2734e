use sqlx::PgPool;

use crate::models::user::{AccountWithProfile, UserAccount, UserProfile, UserRole};
use crate::utils::errors::{validation_error, AppError};

const SELECT_ACCOUNT_WITH_PROFILE: &str = r#"
    SELECT a.id AS user_id, a.username, a.password_hash, p.role, p.company_id
    FROM user_accounts a
    JOIN user_profiles p ON p.user_id = a.id
"#;

fn map_write_error(error: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db_error) = &error {
        if db_error.is_unique_violation() {
            return validation_error("username", "A user with that username already exists.");
        }
        if db_error.is_foreign_key_violation() {
            return validation_error("company", "Select a valid choice.");
        }
    }
    AppError::Database(error)
}

pub struct AccountRepository {
    pool: PgPool,
}

impl AccountRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert an account and its profile in one transaction
    pub async fn create_with_profile(
        &self,
        username: &str,
        password_hash: &str,
        role: UserRole,
        company_id: Option<i64>,
    ) -> Result<(UserAccount, UserProfile), AppError> {
        let mut tx = self.pool.begin().await?;

        let account = sqlx::query_as::<_, UserAccount>(
            r#"
            INSERT INTO user_accounts (username, password_hash)
            VALUES ($1, $2)
            RETURNING id, username, password_hash, created_at
            "#,
        )
        .bind(username)
        .bind(password_hash)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_write_error)?;

        let profile = sqlx::query_as::<_, UserProfile>(
            r#"
            INSERT INTO user_profiles (user_id, role, company_id)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, role, company_id
            "#,
        )
        .bind(account.id)
        .bind(role)
        .bind(company_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_write_error)?;

        tx.commit().await?;
        Ok((account, profile))
    }

    pub async fn find_by_username(&self, username: &str) -> Result<Option<AccountWithProfile>, AppError> {
        let account = sqlx::query_as::<_, AccountWithProfile>(&format!(
            "{} WHERE a.username = $1",
            SELECT_ACCOUNT_WITH_PROFILE
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;
        Ok(account)
    }

    pub async fn find_by_id(&self, user_id: i64) -> Result<Option<AccountWithProfile>, AppError> {
        let account = sqlx::query_as::<_, AccountWithProfile>(&format!(
            "{} WHERE a.id = $1",
            SELECT_ACCOUNT_WITH_PROFILE
        ))
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(account)
    }
}
