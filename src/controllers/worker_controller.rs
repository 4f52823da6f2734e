use chrono::NaiveDate;
use sqlx::PgPool;

use crate::dto::document_dto::DocumentResponse;
use crate::dto::worker_dto::{WorkerDetailResponse, WorkerListQuery, WorkerRequest};
use crate::middleware::auth::AuthenticatedUser;
use crate::models::worker::{Worker, WorkerForm, WorkerWithCompany};
use crate::repositories::{CompanyRepository, DocumentRepository, WorkerRepository};
use crate::services::pagination::{Page, PageWindow, PAGE_SIZE};
use crate::utils::errors::{field_errors, AppError};

const UNKNOWN_COMPANY: &str = "Select a valid choice. That choice is not one of the available choices.";
const DUPLICATE_PASSPORT: &str = "Worker with this passport number already exists.";

pub struct WorkerController {
    workers: WorkerRepository,
    companies: CompanyRepository,
    documents: DocumentRepository,
}

impl WorkerController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            workers: WorkerRepository::new(pool.clone()),
            companies: CompanyRepository::new(pool.clone()),
            documents: DocumentRepository::new(pool),
        }
    }

    /// Visible workers by name, filtered by `q`, company and nationality,
    /// 25 per page
    pub async fn list(
        &self,
        user: &AuthenticatedUser,
        query: WorkerListQuery,
    ) -> Result<Page<WorkerWithCompany>, AppError> {
        let scope = user.scope();
        let filters = query.filters()?;

        let total = self.workers.count(scope, &filters).await?;
        let window = PageWindow::resolve(query.page.as_deref(), total, PAGE_SIZE);
        let workers = self.workers.list(scope, &filters, window).await?;
        Ok(window.into_page(workers))
    }

    pub async fn get(
        &self,
        id: i64,
        user: &AuthenticatedUser,
        today: NaiveDate,
    ) -> Result<WorkerDetailResponse, AppError> {
        let worker = self
            .workers
            .find(id, user.scope())
            .await?
            .ok_or(AppError::NotFound)?;

        let documents = self
            .documents
            .for_worker(worker.worker.id)
            .await?
            .into_iter()
            .map(|document| DocumentResponse::new(document, today))
            .collect();

        Ok(WorkerDetailResponse { worker, documents })
    }

    pub async fn create(&self, user: &AuthenticatedUser, request: WorkerRequest) -> Result<Worker, AppError> {
        let form = request.into_form(user.scope())?;
        self.check_references(&form, None).await?;

        let worker = self.workers.create(&form).await?;
        tracing::info!(worker_id = worker.id, company_id = worker.company_id, "worker created");
        Ok(worker)
    }

    pub async fn update(
        &self,
        id: i64,
        user: &AuthenticatedUser,
        request: WorkerRequest,
    ) -> Result<Worker, AppError> {
        let scope = user.scope();
        if self.workers.find(id, scope).await?.is_none() {
            return Err(AppError::NotFound);
        }

        let form = request.into_form(scope)?;
        self.check_references(&form, Some(id)).await?;

        self.workers.update(id, &form).await?.ok_or(AppError::NotFound)
    }

    pub async fn delete(&self, id: i64, user: &AuthenticatedUser) -> Result<(), AppError> {
        if !self.workers.delete(id, user.scope()).await? {
            return Err(AppError::NotFound);
        }
        tracing::info!(worker_id = id, "worker deleted");
        Ok(())
    }

    /// Company must exist and the passport number must be free
    async fn check_references(&self, form: &WorkerForm, exclude_id: Option<i64>) -> Result<(), AppError> {
        let mut problems = Vec::new();
        if !self.companies.exists(form.company_id).await? {
            problems.push(("company", UNKNOWN_COMPANY));
        }
        if self
            .workers
            .passport_taken(&form.passport_number, exclude_id)
            .await?
        {
            problems.push(("passport_number", DUPLICATE_PASSPORT));
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(field_errors(&problems)))
        }
    }
}
