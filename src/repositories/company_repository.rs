use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::models::company::{Company, CompanyForm};
use crate::services::access_scope::Scope;
use crate::utils::errors::AppError;

const SELECT_COMPANIES: &str =
    "SELECT c.id, c.name, c.industry, c.address, c.contact_person FROM companies c WHERE TRUE";

pub struct CompanyRepository {
    pool: PgPool,
}

impl CompanyRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self, scope: Scope) -> Result<Vec<Company>, AppError> {
        let mut builder = QueryBuilder::<Postgres>::new(SELECT_COMPANIES);
        scope.push_filter(&mut builder, "c.id");
        builder.push(" ORDER BY c.name, c.id");

        let companies = builder
            .build_query_as::<Company>()
            .fetch_all(&self.pool)
            .await?;
        Ok(companies)
    }

    pub async fn find(&self, id: i64, scope: Scope) -> Result<Option<Company>, AppError> {
        let mut builder = QueryBuilder::<Postgres>::new(SELECT_COMPANIES);
        builder.push(" AND c.id = ").push_bind(id);
        scope.push_filter(&mut builder, "c.id");

        let company = builder
            .build_query_as::<Company>()
            .fetch_optional(&self.pool)
            .await?;
        Ok(company)
    }

    pub async fn exists(&self, id: i64) -> Result<bool, AppError> {
        let result: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM companies WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(result.0)
    }

    pub async fn create(&self, form: &CompanyForm) -> Result<Company, AppError> {
        let company = sqlx::query_as::<_, Company>(
            r#"
            INSERT INTO companies (name, industry, address, contact_person)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, industry, address, contact_person
            "#,
        )
        .bind(&form.name)
        .bind(&form.industry)
        .bind(&form.address)
        .bind(&form.contact_person)
        .fetch_one(&self.pool)
        .await?;
        Ok(company)
    }

    pub async fn update(&self, id: i64, form: &CompanyForm) -> Result<Option<Company>, AppError> {
        let company = sqlx::query_as::<_, Company>(
            r#"
            UPDATE companies
            SET name = $2, industry = $3, address = $4, contact_person = $5
            WHERE id = $1
            RETURNING id, name, industry, address, contact_person
            "#,
        )
        .bind(id)
        .bind(&form.name)
        .bind(&form.industry)
        .bind(&form.address)
        .bind(&form.contact_person)
        .fetch_optional(&self.pool)
        .await?;
        Ok(company)
    }

    /// Delete a company; workers and their documents go with it
    pub async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM companies WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
