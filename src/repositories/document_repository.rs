use chrono::{Duration, NaiveDate};
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::models::document::{Document, DocumentForm, DocumentStatus, DocumentType, DocumentWithOwner};
use crate::models::renewal::{ProcessStatus, RenewalHistory, RenewalSubmission};
use crate::repositories::worker_repository::contains_pattern;
use crate::services::access_scope::Scope;
use crate::services::expiry_service::MAX_WINDOW_DAYS;
use crate::services::pagination::PageWindow;
use crate::utils::errors::{validation_error, AppError};

const DOCUMENT_COLUMNS: &str =
    "id, worker_id, type, document_number, issue_date, expiry_date, status";

const RENEWAL_COLUMNS: &str = "id, document_id, submission_date, process_status, notes, \
     new_document_number, new_issue_date, new_expiry_date";

/// Optional list filters
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentFilters {
    pub search: Option<String>,
    pub doc_type: Option<DocumentType>,
    pub status: Option<DocumentStatus>,
}

fn select_with_owner() -> QueryBuilder<'static, Postgres> {
    QueryBuilder::new(
        "SELECT d.id, d.worker_id, d.type, d.document_number, d.issue_date, d.expiry_date, d.status, \
         w.name AS worker_name, w.company_id, c.name AS company_name \
         FROM documents d \
         JOIN workers w ON w.id = d.worker_id \
         JOIN companies c ON c.id = w.company_id \
         WHERE TRUE",
    )
}

/// Scope on the owning worker's company, then the optional filters. The
/// search matches document number, worker name and worker passport.
pub fn push_document_filters(builder: &mut QueryBuilder<'_, Postgres>, scope: Scope, filters: &DocumentFilters) {
    scope.push_filter(builder, "w.company_id");
    if let Some(term) = filters.search.as_deref().map(str::trim).filter(|q| !q.is_empty()) {
        let pattern = contains_pattern(term);
        builder.push(" AND (d.document_number ILIKE ").push_bind(pattern.clone());
        builder.push(" OR w.name ILIKE ").push_bind(pattern.clone());
        builder.push(" OR w.passport_number ILIKE ").push_bind(pattern);
        builder.push(")");
    }
    if let Some(doc_type) = filters.doc_type {
        builder.push(" AND d.type = ").push_bind(doc_type);
    }
    if let Some(status) = filters.status {
        builder.push(" AND d.status = ").push_bind(status);
    }
}

fn map_write_error(error: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db_error) = &error {
        if db_error.is_foreign_key_violation() {
            return validation_error("worker", "Select a valid choice.");
        }
    }
    AppError::Database(error)
}

pub struct DocumentRepository {
    pool: PgPool,
}

impl DocumentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn count(&self, scope: Scope, filters: &DocumentFilters) -> Result<i64, AppError> {
        let mut builder = QueryBuilder::<Postgres>::new(
            "SELECT COUNT(*) FROM documents d JOIN workers w ON w.id = d.worker_id WHERE TRUE",
        );
        push_document_filters(&mut builder, scope, filters);
        let total = builder
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await?;
        Ok(total)
    }

    /// One page of documents ordered by expiry date
    pub async fn list(
        &self,
        scope: Scope,
        filters: &DocumentFilters,
        window: PageWindow,
    ) -> Result<Vec<DocumentWithOwner>, AppError> {
        let mut builder = select_with_owner();
        push_document_filters(&mut builder, scope, filters);
        builder.push(" ORDER BY d.expiry_date, d.id LIMIT ").push_bind(window.limit());
        builder.push(" OFFSET ").push_bind(window.offset());

        let documents = builder
            .build_query_as::<DocumentWithOwner>()
            .fetch_all(&self.pool)
            .await?;
        Ok(documents)
    }

    /// All visible documents in insertion order, for the CSV export
    pub async fn export(&self, scope: Scope) -> Result<Vec<DocumentWithOwner>, AppError> {
        let mut builder = select_with_owner();
        scope.push_filter(&mut builder, "w.company_id");
        builder.push(" ORDER BY d.id");

        let documents = builder
            .build_query_as::<DocumentWithOwner>()
            .fetch_all(&self.pool)
            .await?;
        Ok(documents)
    }

    pub async fn find(&self, id: i64, scope: Scope) -> Result<Option<DocumentWithOwner>, AppError> {
        let mut builder = select_with_owner();
        builder.push(" AND d.id = ").push_bind(id);
        scope.push_filter(&mut builder, "w.company_id");

        let document = builder
            .build_query_as::<DocumentWithOwner>()
            .fetch_optional(&self.pool)
            .await?;
        Ok(document)
    }

    /// Documents of one worker, ordered by type
    pub async fn for_worker(&self, worker_id: i64) -> Result<Vec<Document>, AppError> {
        let documents = sqlx::query_as::<_, Document>(&format!(
            "SELECT {} FROM documents WHERE worker_id = $1 ORDER BY type, id",
            DOCUMENT_COLUMNS
        ))
        .bind(worker_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(documents)
    }

    /// ACTIVE documents expiring in `[today, today+90]`, soonest first
    pub async fn expiring(&self, scope: Scope, today: NaiveDate) -> Result<Vec<DocumentWithOwner>, AppError> {
        let mut builder = select_with_owner();
        builder.push(" AND d.status = ").push_bind(DocumentStatus::Active);
        builder.push(" AND d.expiry_date >= ").push_bind(today);
        builder
            .push(" AND d.expiry_date <= ")
            .push_bind(today + Duration::days(MAX_WINDOW_DAYS));
        scope.push_filter(&mut builder, "w.company_id");
        builder.push(" ORDER BY d.expiry_date, d.id");

        let documents = builder
            .build_query_as::<DocumentWithOwner>()
            .fetch_all(&self.pool)
            .await?;
        Ok(documents)
    }

    /// `(active, expired)` counts of the stored status
    pub async fn status_counts(&self, scope: Scope) -> Result<(i64, i64), AppError> {
        let mut builder = QueryBuilder::<Postgres>::new(
            "SELECT COUNT(*) FILTER (WHERE d.status = 'ACTIVE'), \
             COUNT(*) FILTER (WHERE d.status = 'EXPIRED') \
             FROM documents d JOIN workers w ON w.id = d.worker_id WHERE TRUE",
        );
        scope.push_filter(&mut builder, "w.company_id");
        let counts = builder
            .build_query_as::<(i64, i64)>()
            .fetch_one(&self.pool)
            .await?;
        Ok(counts)
    }

    pub async fn create(&self, form: &DocumentForm) -> Result<Document, AppError> {
        let document = sqlx::query_as::<_, Document>(&format!(
            r#"
            INSERT INTO documents (worker_id, type, document_number, issue_date, expiry_date, status)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {}
            "#,
            DOCUMENT_COLUMNS
        ))
        .bind(form.worker_id)
        .bind(form.doc_type)
        .bind(&form.document_number)
        .bind(form.issue_date)
        .bind(form.expiry_date)
        .bind(form.status)
        .fetch_one(&self.pool)
        .await
        .map_err(map_write_error)?;
        Ok(document)
    }

    /// Plain edit: writes the submitted status as is
    pub async fn update(&self, id: i64, form: &DocumentForm) -> Result<Option<Document>, AppError> {
        let document = sqlx::query_as::<_, Document>(&format!(
            r#"
            UPDATE documents
            SET worker_id = $2, type = $3, document_number = $4,
                issue_date = $5, expiry_date = $6, status = $7
            WHERE id = $1
            RETURNING {}
            "#,
            DOCUMENT_COLUMNS
        ))
        .bind(id)
        .bind(form.worker_id)
        .bind(form.doc_type)
        .bind(&form.document_number)
        .bind(form.issue_date)
        .bind(form.expiry_date)
        .bind(form.status)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_write_error)?;
        Ok(document)
    }

    /// Delete a visible document; its renewal history cascades
    pub async fn delete(&self, id: i64, scope: Scope) -> Result<bool, AppError> {
        let mut builder = QueryBuilder::<Postgres>::new(
            "DELETE FROM documents d USING workers w WHERE w.id = d.worker_id AND d.id = ",
        );
        builder.push_bind(id);
        scope.push_filter(&mut builder, "w.company_id");

        let result = builder.build().execute(&self.pool).await?;
        Ok(result.rows_affected() > 0)
    }

    /// Store a renewal: append the history row and write the renewed
    /// document in one transaction
    pub async fn save_renewal(
        &self,
        renewed: &Document,
        submission: &RenewalSubmission,
    ) -> Result<(Document, RenewalHistory), AppError> {
        let mut tx = self.pool.begin().await?;

        let history = sqlx::query_as::<_, RenewalHistory>(&format!(
            r#"
            INSERT INTO renewal_history (
                document_id, submission_date, process_status, notes,
                new_document_number, new_issue_date, new_expiry_date
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {}
            "#,
            RENEWAL_COLUMNS
        ))
        .bind(renewed.id)
        .bind(submission.submission_date)
        .bind(submission.process_status)
        .bind(&submission.notes)
        .bind(&submission.new_document_number)
        .bind(submission.new_issue_date)
        .bind(submission.new_expiry_date)
        .fetch_one(&mut *tx)
        .await?;

        let document = sqlx::query_as::<_, Document>(&format!(
            r#"
            UPDATE documents
            SET document_number = $2, issue_date = $3, expiry_date = $4, status = $5
            WHERE id = $1
            RETURNING {}
            "#,
            DOCUMENT_COLUMNS
        ))
        .bind(renewed.id)
        .bind(&renewed.document_number)
        .bind(renewed.issue_date)
        .bind(renewed.expiry_date)
        .bind(renewed.status)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok((document, history))
    }

    /// Renewal history of a document, newest first, optionally only one
    /// process status
    pub async fn renewals(
        &self,
        document_id: i64,
        process_status: Option<ProcessStatus>,
    ) -> Result<Vec<RenewalHistory>, AppError> {
        let mut builder = QueryBuilder::<Postgres>::new("SELECT ");
        builder.push(RENEWAL_COLUMNS);
        builder.push(" FROM renewal_history WHERE document_id = ").push_bind(document_id);
        if let Some(process_status) = process_status {
            builder.push(" AND process_status = ").push_bind(process_status);
        }
        builder.push(" ORDER BY submission_date DESC, id DESC");

        let history = builder
            .build_query_as::<RenewalHistory>()
            .fetch_all(&self.pool)
            .await?;
        Ok(history)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_filters_follow_scope() {
        let mut builder = select_with_owner();
        push_document_filters(
            &mut builder,
            Scope::Company(5),
            &DocumentFilters {
                doc_type: Some(DocumentType::Visa),
                ..Default::default()
            },
        );
        let sql = builder.sql();
        assert!(sql.ends_with("AND w.company_id = $1 AND d.type = $2"));
    }

    #[test]
    fn test_document_search_covers_number_worker_and_passport() {
        let mut builder = select_with_owner();
        push_document_filters(
            &mut builder,
            Scope::Company(2),
            &DocumentFilters {
                search: Some(" 2C11 ".to_string()),
                status: Some(DocumentStatus::Active),
                ..Default::default()
            },
        );
        let sql = builder.sql();
        assert!(sql.contains("AND w.company_id = $1"));
        assert!(sql.contains(
            "AND (d.document_number ILIKE $2 OR w.name ILIKE $3 OR w.passport_number ILIKE $4)"
        ));
        assert!(sql.ends_with("AND d.status = $5"));
    }

    #[test]
    fn test_blank_document_search_adds_no_condition() {
        let mut builder = select_with_owner();
        push_document_filters(
            &mut builder,
            Scope::All,
            &DocumentFilters {
                search: Some("  ".to_string()),
                ..Default::default()
            },
        );
        assert!(builder.sql().ends_with("WHERE TRUE"));
    }

    #[test]
    fn test_unscoped_unfiltered_query_is_untouched() {
        let mut builder = select_with_owner();
        push_document_filters(&mut builder, Scope::All, &DocumentFilters::default());
        assert!(builder.sql().ends_with("WHERE TRUE"));
    }
}
