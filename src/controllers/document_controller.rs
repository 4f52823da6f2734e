use chrono::NaiveDate;
use sqlx::PgPool;

use crate::controllers::{Outcome, DOCUMENT_LIST};
use crate::dto::document_dto::{
    DocumentDetailQuery, DocumentDetailResponse, DocumentListItem, DocumentListQuery, DocumentRequest,
    DocumentResponse, RenewalRequest, RenewalResponse,
};
use crate::middleware::auth::AuthenticatedUser;
use crate::models::document::{Document, DocumentForm};
use crate::repositories::{DocumentRepository, WorkerRepository};
use crate::services::access_scope::Scope;
use crate::services::pagination::{Page, PageWindow, PAGE_SIZE};
use crate::services::renewal_service::apply_renewal;
use crate::utils::errors::{validation_error, AppError};

pub struct DocumentController {
    documents: DocumentRepository,
    workers: WorkerRepository,
}

impl DocumentController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            documents: DocumentRepository::new(pool.clone()),
            workers: WorkerRepository::new(pool),
        }
    }

    /// Visible documents by expiry date, 25 per page
    pub async fn list(
        &self,
        user: &AuthenticatedUser,
        query: DocumentListQuery,
        today: NaiveDate,
    ) -> Result<Page<DocumentListItem>, AppError> {
        let scope = user.scope();
        let filters = query.filters()?;

        let total = self.documents.count(scope, &filters).await?;
        let window = PageWindow::resolve(query.page.as_deref(), total, PAGE_SIZE);
        let documents = self
            .documents
            .list(scope, &filters, window)
            .await?
            .into_iter()
            .map(|entry| DocumentListItem::new(entry, today))
            .collect();
        Ok(window.into_page(documents))
    }

    pub async fn get(
        &self,
        id: i64,
        user: &AuthenticatedUser,
        query: DocumentDetailQuery,
        today: NaiveDate,
    ) -> Result<DocumentDetailResponse, AppError> {
        let renewal_status = query.renewal_status()?;
        let entry = self
            .documents
            .find(id, user.scope())
            .await?
            .ok_or(AppError::NotFound)?;
        let renewals = self
            .documents
            .renewals(entry.document.id, renewal_status)
            .await?;

        Ok(DocumentDetailResponse {
            document: DocumentListItem::new(entry, today),
            renewals,
        })
    }

    pub async fn create(
        &self,
        user: &AuthenticatedUser,
        request: DocumentRequest,
    ) -> Result<Outcome<Document>, AppError> {
        let form = request.into_form()?;
        let company_id = self.worker_company(&form).await?;
        if let Some(location) = redirect_outside_scope(user.scope(), company_id) {
            tracing::info!(user_id = user.user_id, worker_id = form.worker_id, "document create outside scope");
            return Ok(Outcome::Redirect(location));
        }

        let document = self.documents.create(&form).await?;
        tracing::info!(document_id = document.id, "document created");
        Ok(Outcome::Done(document))
    }

    /// Plain edit; the submitted status is stored as is
    pub async fn update(
        &self,
        id: i64,
        user: &AuthenticatedUser,
        request: DocumentRequest,
    ) -> Result<Outcome<Document>, AppError> {
        let scope = user.scope();
        if self.documents.find(id, scope).await?.is_none() {
            return Err(AppError::NotFound);
        }

        let form = request.into_form()?;
        let company_id = self.worker_company(&form).await?;
        if let Some(location) = redirect_outside_scope(scope, company_id) {
            tracing::info!(user_id = user.user_id, document_id = id, "document update outside scope");
            return Ok(Outcome::Redirect(location));
        }

        let document = self
            .documents
            .update(id, &form)
            .await?
            .ok_or(AppError::NotFound)?;
        Ok(Outcome::Done(document))
    }

    pub async fn delete(&self, id: i64, user: &AuthenticatedUser) -> Result<(), AppError> {
        if !self.documents.delete(id, user.scope()).await? {
            return Err(AppError::NotFound);
        }
        tracing::info!(document_id = id, "document deleted");
        Ok(())
    }

    /// Record a renewal and apply its new values to the document
    pub async fn renew(
        &self,
        id: i64,
        user: &AuthenticatedUser,
        request: RenewalRequest,
        today: NaiveDate,
    ) -> Result<RenewalResponse, AppError> {
        let entry = self
            .documents
            .find(id, user.scope())
            .await?
            .ok_or(AppError::NotFound)?;
        let submission = request.into_submission(today)?;

        let mut document = entry.document;
        apply_renewal(&mut document, &submission, today);

        let (document, renewal) = self.documents.save_renewal(&document, &submission).await?;
        tracing::info!(
            document_id = document.id,
            renewal_id = renewal.id,
            status = %document.status,
            "document renewed"
        );

        Ok(RenewalResponse {
            document: DocumentResponse::new(document, today),
            renewal,
        })
    }

    /// Company of the form's worker. An unknown worker is a validation error.
    async fn worker_company(&self, form: &DocumentForm) -> Result<i64, AppError> {
        self.workers
            .company_of(form.worker_id)
            .await?
            .ok_or_else(|| {
                validation_error(
                    "worker",
                    "Select a valid choice. That choice is not one of the available choices.",
                )
            })
    }
}

/// Document writes for a worker of another company go back to the list
pub fn redirect_outside_scope(scope: Scope, worker_company_id: i64) -> Option<&'static str> {
    if scope.permits(worker_company_id) {
        None
    } else {
        Some(DOCUMENT_LIST)
    }
}
