use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Extension, Json, Router,
};

use crate::controllers::worker_controller::WorkerController;
use crate::dto::company_dto::ApiResponse;
use crate::dto::worker_dto::{WorkerDetailResponse, WorkerListQuery, WorkerRequest};
use crate::middleware::auth::AuthenticatedUser;
use crate::models::worker::{Worker, WorkerWithCompany};
use crate::services::pagination::Page;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_worker_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_workers).post(create_worker))
        .route("/:id", get(get_worker).put(update_worker).delete(delete_worker))
}

async fn list_workers(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Query(query): Query<WorkerListQuery>,
) -> Result<Json<Page<WorkerWithCompany>>, AppError> {
    let controller = WorkerController::new(state.pool.clone());
    let page = controller.list(&user, query).await?;
    Ok(Json(page))
}

async fn get_worker(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<i64>,
) -> Result<Json<WorkerDetailResponse>, AppError> {
    let controller = WorkerController::new(state.pool.clone());
    let worker = controller.get(id, &user, state.config.today()).await?;
    Ok(Json(worker))
}

async fn create_worker(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<WorkerRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Worker>>), AppError> {
    let controller = WorkerController::new(state.pool.clone());
    let worker = controller.create(&user, request).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success_with_message(worker, "Worker created")),
    ))
}

async fn update_worker(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<i64>,
    Json(request): Json<WorkerRequest>,
) -> Result<Json<ApiResponse<Worker>>, AppError> {
    let controller = WorkerController::new(state.pool.clone());
    let worker = controller.update(id, &user, request).await?;
    Ok(Json(ApiResponse::success_with_message(worker, "Worker updated")))
}

async fn delete_worker(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let controller = WorkerController::new(state.pool.clone());
    controller.delete(id, &user).await?;
    Ok(Json(ApiResponse::message("Worker deleted")))
}
