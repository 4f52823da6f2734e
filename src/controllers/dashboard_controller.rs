use chrono::NaiveDate;
use sqlx::PgPool;

use crate::dto::dashboard_dto::{BucketSummary, DashboardResponse};
use crate::middleware::auth::AuthenticatedUser;
use crate::repositories::{DocumentRepository, WorkerFilters, WorkerRepository};
use crate::services::expiry_service::{group_by_worker, partition};
use crate::utils::errors::AppError;

pub struct DashboardController {
    workers: WorkerRepository,
    documents: DocumentRepository,
}

impl DashboardController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            workers: WorkerRepository::new(pool.clone()),
            documents: DocumentRepository::new(pool),
        }
    }

    pub async fn summary(&self, user: &AuthenticatedUser, today: NaiveDate) -> Result<DashboardResponse, AppError> {
        let scope = user.scope();

        let total_workers = self.workers.count(scope, &WorkerFilters::default()).await?;
        let (active_documents, expired_documents) = self.documents.status_counts(scope).await?;
        let expiring = self.documents.expiring(scope, today).await?;

        let buckets = partition(expiring, today)
            .into_entries()
            .into_iter()
            .map(|(bucket, documents)| BucketSummary {
                bucket,
                days: bucket.days(),
                until: bucket.until(today),
                count: documents.len(),
                workers: group_by_worker(documents),
            })
            .collect();

        Ok(DashboardResponse {
            today,
            total_workers,
            active_documents,
            expired_documents,
            buckets,
        })
    }
}
