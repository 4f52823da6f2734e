use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::models::worker::{Worker, WorkerForm, WorkerWithCompany};
use crate::services::access_scope::Scope;
use crate::services::pagination::PageWindow;
use crate::utils::errors::{validation_error, AppError};

const WORKER_COLUMNS: &str = "w.id, w.name, w.passport_number, w.nationality, w.birth_date, \
     w.company_id, w.position, w.photo, w.start_date";

/// `LIKE` pattern matching `term` anywhere, with wildcards in the term escaped
pub fn contains_pattern(term: &str) -> String {
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

fn select_with_company() -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::<Postgres>::new("SELECT ");
    builder.push(WORKER_COLUMNS);
    builder.push(", c.name AS company_name FROM workers w JOIN companies c ON c.id = w.company_id WHERE TRUE");
    builder
}

/// Optional worker list filters
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkerFilters {
    pub search: Option<String>,
    pub company_id: Option<i64>,
    pub nationality: Option<String>,
}

/// Scope filter, the exact company and nationality filters, then the
/// case-insensitive search over name, passport, company name and nationality
pub fn push_worker_filters(builder: &mut QueryBuilder<'_, Postgres>, scope: Scope, filters: &WorkerFilters) {
    scope.push_filter(builder, "w.company_id");
    if let Some(company_id) = filters.company_id {
        builder.push(" AND w.company_id = ").push_bind(company_id);
    }
    if let Some(nationality) = filters.nationality.as_deref().map(str::trim).filter(|n| !n.is_empty()) {
        builder
            .push(" AND LOWER(w.nationality) = LOWER(")
            .push_bind(nationality.to_string())
            .push(")");
    }
    if let Some(term) = filters.search.as_deref().map(str::trim).filter(|q| !q.is_empty()) {
        let pattern = contains_pattern(term);
        builder.push(" AND (w.name ILIKE ").push_bind(pattern.clone());
        builder.push(" OR w.passport_number ILIKE ").push_bind(pattern.clone());
        builder.push(" OR c.name ILIKE ").push_bind(pattern.clone());
        builder.push(" OR w.nationality ILIKE ").push_bind(pattern);
        builder.push(")");
    }
}

fn map_write_error(error: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db_error) = &error {
        if db_error.is_unique_violation() {
            return validation_error("passport_number", "Worker with this passport number already exists.");
        }
        if db_error.is_foreign_key_violation() {
            return validation_error("company", "Select a valid choice.");
        }
    }
    AppError::Database(error)
}

pub struct WorkerRepository {
    pool: PgPool,
}

impl WorkerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn count(&self, scope: Scope, filters: &WorkerFilters) -> Result<i64, AppError> {
        let mut builder = QueryBuilder::<Postgres>::new(
            "SELECT COUNT(*) FROM workers w JOIN companies c ON c.id = w.company_id WHERE TRUE",
        );
        push_worker_filters(&mut builder, scope, filters);
        let total = builder
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await?;
        Ok(total)
    }

    /// One page of workers ordered by name
    pub async fn list(
        &self,
        scope: Scope,
        filters: &WorkerFilters,
        window: PageWindow,
    ) -> Result<Vec<WorkerWithCompany>, AppError> {
        let mut builder = select_with_company();
        push_worker_filters(&mut builder, scope, filters);
        builder.push(" ORDER BY w.name, w.id LIMIT ").push_bind(window.limit());
        builder.push(" OFFSET ").push_bind(window.offset());

        let workers = builder
            .build_query_as::<WorkerWithCompany>()
            .fetch_all(&self.pool)
            .await?;
        Ok(workers)
    }

    /// All visible workers in insertion order, for the CSV export
    pub async fn export(&self, scope: Scope) -> Result<Vec<WorkerWithCompany>, AppError> {
        let mut builder = select_with_company();
        scope.push_filter(&mut builder, "w.company_id");
        builder.push(" ORDER BY w.id");

        let workers = builder
            .build_query_as::<WorkerWithCompany>()
            .fetch_all(&self.pool)
            .await?;
        Ok(workers)
    }

    pub async fn find(&self, id: i64, scope: Scope) -> Result<Option<WorkerWithCompany>, AppError> {
        let mut builder = select_with_company();
        builder.push(" AND w.id = ").push_bind(id);
        scope.push_filter(&mut builder, "w.company_id");

        let worker = builder
            .build_query_as::<WorkerWithCompany>()
            .fetch_optional(&self.pool)
            .await?;
        Ok(worker)
    }

    /// Company owning a worker, regardless of scope
    pub async fn company_of(&self, worker_id: i64) -> Result<Option<i64>, AppError> {
        let company_id: Option<i64> = sqlx::query_scalar("SELECT company_id FROM workers WHERE id = $1")
            .bind(worker_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(company_id)
    }

    pub async fn passport_taken(&self, passport_number: &str, exclude_id: Option<i64>) -> Result<bool, AppError> {
        let result: (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM workers WHERE passport_number = $1 AND ($2::BIGINT IS NULL OR id <> $2))",
        )
        .bind(passport_number)
        .bind(exclude_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(result.0)
    }

    pub async fn create(&self, form: &WorkerForm) -> Result<Worker, AppError> {
        let worker = sqlx::query_as::<_, Worker>(
            r#"
            INSERT INTO workers (
                name, passport_number, nationality, birth_date,
                company_id, position, photo, start_date
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, name, passport_number, nationality, birth_date,
                      company_id, position, photo, start_date
            "#,
        )
        .bind(&form.name)
        .bind(&form.passport_number)
        .bind(&form.nationality)
        .bind(form.birth_date)
        .bind(form.company_id)
        .bind(&form.position)
        .bind(&form.photo)
        .bind(form.start_date)
        .fetch_one(&self.pool)
        .await
        .map_err(map_write_error)?;
        Ok(worker)
    }

    pub async fn update(&self, id: i64, form: &WorkerForm) -> Result<Option<Worker>, AppError> {
        let worker = sqlx::query_as::<_, Worker>(
            r#"
            UPDATE workers
            SET name = $2, passport_number = $3, nationality = $4, birth_date = $5,
                company_id = $6, position = $7, photo = $8, start_date = $9
            WHERE id = $1
            RETURNING id, name, passport_number, nationality, birth_date,
                      company_id, position, photo, start_date
            "#,
        )
        .bind(id)
        .bind(&form.name)
        .bind(&form.passport_number)
        .bind(&form.nationality)
        .bind(form.birth_date)
        .bind(form.company_id)
        .bind(&form.position)
        .bind(&form.photo)
        .bind(form.start_date)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_write_error)?;
        Ok(worker)
    }

    /// Delete a visible worker; documents and renewal history cascade
    pub async fn delete(&self, id: i64, scope: Scope) -> Result<bool, AppError> {
        let mut builder = QueryBuilder::<Postgres>::new("DELETE FROM workers w WHERE w.id = ");
        builder.push_bind(id);
        scope.push_filter(&mut builder, "w.company_id");

        let result = builder.build().execute(&self.pool).await?;
        Ok(result.rows_affected() > 0)
    }
}
