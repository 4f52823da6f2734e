use chrono::NaiveDate;
use sqlx::PgPool;

use crate::middleware::auth::AuthenticatedUser;
use crate::repositories::{DocumentRepository, WorkerRepository};
use crate::services::csv_export::{documents_csv, workers_csv};
use crate::utils::errors::AppError;

pub struct ExportController {
    workers: WorkerRepository,
    documents: DocumentRepository,
}

impl ExportController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            workers: WorkerRepository::new(pool.clone()),
            documents: DocumentRepository::new(pool),
        }
    }

    pub async fn workers(&self, user: &AuthenticatedUser) -> Result<Vec<u8>, AppError> {
        let rows = self.workers.export(user.scope()).await?;
        tracing::info!(rows = rows.len(), "exporting workers");
        workers_csv(&rows)
    }

    pub async fn documents(&self, user: &AuthenticatedUser, today: NaiveDate) -> Result<Vec<u8>, AppError> {
        let rows = self.documents.export(user.scope()).await?;
        tracing::info!(rows = rows.len(), "exporting documents");
        documents_csv(&rows, today)
    }
}
