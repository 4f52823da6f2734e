use chrono::{NaiveDate, Utc};
use permit_tracker::config::DatabaseConfig;
use permit_tracker::controllers::document_controller::DocumentController;
use permit_tracker::controllers::Outcome;
use permit_tracker::database::connection::run_migrations;
use permit_tracker::dto::document_dto::DocumentRequest;
use permit_tracker::middleware::AuthenticatedUser;
use permit_tracker::models::company::{Company, CompanyForm};
use permit_tracker::models::document::{Document, DocumentForm, DocumentStatus, DocumentType};
use permit_tracker::models::renewal::{ProcessStatus, RenewalSubmission};
use permit_tracker::models::user::UserRole;
use permit_tracker::models::worker::{Worker, WorkerForm};
use permit_tracker::repositories::{
    CompanyRepository, DocumentRepository, WorkerFilters, WorkerRepository,
};
use permit_tracker::services::access_scope::Scope;
use permit_tracker::services::renewal_service::apply_renewal;
use sqlx::PgPool;
use std::sync::atomic::{AtomicU64, Ordering};

static SEQUENCE: AtomicU64 = AtomicU64::new(0);

// These tests need a scratch Postgres database in TEST_DATABASE_URL and
// return early without one.
async fn test_pool() -> Option<PgPool> {
    let url = std::env::var("TEST_DATABASE_URL").ok()?;
    let pool = DatabaseConfig::with_url(url, 2)
        .create_pool()
        .await
        .expect("connect to test database");
    run_migrations(&pool).await.expect("migrations");
    Some(pool)
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn unique(prefix: &str) -> String {
    format!(
        "{}-{}-{}",
        prefix,
        Utc::now().timestamp_nanos_opt().unwrap_or_default(),
        SEQUENCE.fetch_add(1, Ordering::Relaxed)
    )
}

async fn company(pool: &PgPool, name: &str) -> Company {
    CompanyRepository::new(pool.clone())
        .create(&CompanyForm {
            name: unique(name),
            industry: "Manufaktur".to_string(),
            address: String::new(),
            contact_person: String::new(),
        })
        .await
        .unwrap()
}

async fn worker(pool: &PgPool, company_id: i64, name: &str, nationality: &str) -> Worker {
    WorkerRepository::new(pool.clone())
        .create(&WorkerForm {
            name: name.to_string(),
            passport_number: unique("P"),
            nationality: nationality.to_string(),
            birth_date: date(1990, 5, 12),
            company_id,
            position: "Engineer".to_string(),
            photo: None,
            start_date: None,
        })
        .await
        .unwrap()
}

async fn document(pool: &PgPool, worker_id: i64, expiry: NaiveDate) -> Document {
    DocumentRepository::new(pool.clone())
        .create(&DocumentForm {
            worker_id,
            doc_type: DocumentType::Kitas,
            document_number: "2C11AB".to_string(),
            issue_date: date(2023, 1, 10),
            expiry_date: expiry,
            status: DocumentStatus::Active,
        })
        .await
        .unwrap()
}

async fn cleanup(pool: &PgPool, companies: &[i64]) {
    let repository = CompanyRepository::new(pool.clone());
    for id in companies {
        repository.delete(*id).await.unwrap();
    }
}

#[tokio::test]
async fn test_save_renewal_appends_history_and_updates_document() {
    let Some(pool) = test_pool().await else {
        return;
    };
    let owner = company(&pool, "PT Maju").await;
    let li = worker(&pool, owner.id, "Li Wei", "China").await;
    let stored = document(&pool, li.id, date(2024, 1, 10)).await;
    let documents = DocumentRepository::new(pool.clone());

    let today = date(2024, 1, 5);
    let submission = RenewalSubmission {
        submission_date: today,
        process_status: ProcessStatus::Approved,
        notes: "perpanjangan".to_string(),
        new_document_number: String::new(),
        new_issue_date: Some(date(2024, 1, 11)),
        new_expiry_date: Some(date(2025, 1, 10)),
    };
    let mut renewed = stored.clone();
    apply_renewal(&mut renewed, &submission, today);

    let (saved, history) = documents.save_renewal(&renewed, &submission).await.unwrap();
    assert_eq!(saved.expiry_date, date(2025, 1, 10));
    assert_eq!(saved.issue_date, date(2024, 1, 11));
    assert_eq!(saved.document_number, "2C11AB");
    assert_eq!(saved.status, DocumentStatus::Active);
    assert_eq!(history.document_id, stored.id);
    assert_eq!(history.new_document_number, "");

    let reloaded = documents.find(stored.id, Scope::All).await.unwrap().unwrap();
    assert_eq!(reloaded.document, saved);

    let all = documents.renewals(stored.id, None).await.unwrap();
    assert_eq!(all, vec![history]);
    let pending = documents
        .renewals(stored.id, Some(ProcessStatus::Pending))
        .await
        .unwrap();
    assert!(pending.is_empty());

    cleanup(&pool, &[owner.id]).await;
}

#[tokio::test]
async fn test_client_document_for_other_company_redirects_without_writing() {
    let Some(pool) = test_pool().await else {
        return;
    };
    let own = company(&pool, "PT Sendiri").await;
    let other = company(&pool, "PT Lain").await;
    let stranger = worker(&pool, other.id, "Chen", "China").await;

    let client = AuthenticatedUser {
        user_id: 1,
        username: "klien".to_string(),
        role: UserRole::Client,
        company_id: Some(own.id),
    };
    let request = DocumentRequest {
        worker: Some(stranger.id),
        doc_type: "VISA".to_string(),
        document_number: "V-1".to_string(),
        issue_date: "2024-01-01".to_string(),
        expiry_date: "2025-01-01".to_string(),
        status: None,
    };

    let outcome = DocumentController::new(pool.clone())
        .create(&client, request)
        .await
        .unwrap();
    assert_eq!(outcome, Outcome::Redirect("/api/documents"));

    let written = DocumentRepository::new(pool.clone())
        .for_worker(stranger.id)
        .await
        .unwrap();
    assert!(written.is_empty());

    cleanup(&pool, &[own.id, other.id]).await;
}

#[tokio::test]
async fn test_worker_list_filters_by_company_and_nationality() {
    let Some(pool) = test_pool().await else {
        return;
    };
    let owner = company(&pool, "PT Filter").await;
    let li = worker(&pool, owner.id, "Li Wei", "China").await;
    worker(&pool, owner.id, "Kim", "Korea").await;

    let workers = WorkerRepository::new(pool.clone());
    let filters = WorkerFilters {
        company_id: Some(owner.id),
        nationality: Some("china".to_string()),
        ..Default::default()
    };
    assert_eq!(workers.count(Scope::All, &filters).await.unwrap(), 1);

    let elsewhere = WorkerFilters {
        company_id: Some(owner.id),
        ..Default::default()
    };
    assert_eq!(workers.count(Scope::Company(owner.id + 1), &elsewhere).await.unwrap(), 0);
    assert_eq!(workers.count(Scope::Company(owner.id), &elsewhere).await.unwrap(), 2);

    let found = workers.find(li.id, Scope::All).await.unwrap().unwrap();
    assert_eq!(found.worker.nationality, "China");

    cleanup(&pool, &[owner.id]).await;
}
