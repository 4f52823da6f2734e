use chrono::NaiveDate;
use serde::Serialize;

use crate::services::expiry_service::{ExpiryBucket, WorkerGroup};

// One reminder window on the dashboard
#[derive(Debug, Serialize)]
pub struct BucketSummary {
    pub bucket: ExpiryBucket,
    pub days: i64,
    pub until: NaiveDate,
    pub count: usize,
    pub workers: Vec<WorkerGroup>,
}

// Dashboard totals and the 30/60/90 day windows
#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub today: NaiveDate,
    pub total_workers: i64,
    pub active_documents: i64,
    pub expired_documents: i64,
    pub buckets: Vec<BucketSummary>,
}
