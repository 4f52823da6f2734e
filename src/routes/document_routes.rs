use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Extension, Json, Router,
};

use crate::controllers::document_controller::DocumentController;
use crate::controllers::Outcome;
use crate::dto::company_dto::ApiResponse;
use crate::dto::document_dto::{
    DocumentDetailQuery, DocumentDetailResponse, DocumentListItem, DocumentListQuery, DocumentRequest,
    RenewalRequest, RenewalResponse,
};
use crate::middleware::auth::AuthenticatedUser;
use crate::models::document::Document;
use crate::services::pagination::Page;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_document_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_documents).post(create_document))
        .route(
            "/:id",
            get(get_document).put(update_document).delete(delete_document),
        )
        .route("/:id/renew", post(renew_document))
}

async fn list_documents(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Query(query): Query<DocumentListQuery>,
) -> Result<Json<Page<DocumentListItem>>, AppError> {
    let controller = DocumentController::new(state.pool.clone());
    let page = controller.list(&user, query, state.config.today()).await?;
    Ok(Json(page))
}

async fn get_document(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<i64>,
    Query(query): Query<DocumentDetailQuery>,
) -> Result<Json<DocumentDetailResponse>, AppError> {
    let controller = DocumentController::new(state.pool.clone());
    let document = controller.get(id, &user, query, state.config.today()).await?;
    Ok(Json(document))
}

async fn create_document(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<DocumentRequest>,
) -> Result<Outcome<(StatusCode, Json<ApiResponse<Document>>)>, AppError> {
    let controller = DocumentController::new(state.pool.clone());
    let outcome = controller.create(&user, request).await?;
    Ok(outcome.map(|document| {
        (
            StatusCode::CREATED,
            Json(ApiResponse::success_with_message(document, "Document created")),
        )
    }))
}

async fn update_document(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<i64>,
    Json(request): Json<DocumentRequest>,
) -> Result<Outcome<Json<ApiResponse<Document>>>, AppError> {
    let controller = DocumentController::new(state.pool.clone());
    let outcome = controller.update(id, &user, request).await?;
    Ok(outcome.map(|document| Json(ApiResponse::success_with_message(document, "Document updated"))))
}

async fn delete_document(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let controller = DocumentController::new(state.pool.clone());
    controller.delete(id, &user).await?;
    Ok(Json(ApiResponse::message("Document deleted")))
}

async fn renew_document(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<i64>,
    Json(request): Json<RenewalRequest>,
) -> Result<Json<ApiResponse<RenewalResponse>>, AppError> {
    let controller = DocumentController::new(state.pool.clone());
    let renewed = controller.renew(id, &user, request, state.config.today()).await?;
    Ok(Json(ApiResponse::success_with_message(renewed, "Renewal recorded")))
}
