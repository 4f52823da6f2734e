use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Extension, Json, Router,
};

use crate::controllers::company_controller::CompanyController;
use crate::controllers::Outcome;
use crate::dto::company_dto::{ApiResponse, CompanyRequest};
use crate::middleware::auth::AuthenticatedUser;
use crate::models::company::Company;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_company_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_companies).post(create_company))
        .route(
            "/:id",
            get(get_company).put(update_company).delete(delete_company),
        )
}

async fn list_companies(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<Vec<Company>>, AppError> {
    let controller = CompanyController::new(state.pool.clone());
    let companies = controller.list(&user).await?;
    Ok(Json(companies))
}

async fn get_company(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<i64>,
) -> Result<Json<Company>, AppError> {
    let controller = CompanyController::new(state.pool.clone());
    let company = controller.get(id, &user).await?;
    Ok(Json(company))
}

async fn create_company(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<CompanyRequest>,
) -> Result<Outcome<(StatusCode, Json<ApiResponse<Company>>)>, AppError> {
    let controller = CompanyController::new(state.pool.clone());
    let outcome = controller.create(&user, request).await?;
    Ok(outcome.map(|company| {
        (
            StatusCode::CREATED,
            Json(ApiResponse::success_with_message(company, "Company created")),
        )
    }))
}

async fn update_company(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<i64>,
    Json(request): Json<CompanyRequest>,
) -> Result<Outcome<Json<ApiResponse<Company>>>, AppError> {
    let controller = CompanyController::new(state.pool.clone());
    let outcome = controller.update(id, &user, request).await?;
    Ok(outcome.map(|company| Json(ApiResponse::success_with_message(company, "Company updated"))))
}

async fn delete_company(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<i64>,
) -> Result<Outcome<Json<ApiResponse<()>>>, AppError> {
    let controller = CompanyController::new(state.pool.clone());
    let outcome = controller.delete(id, &user).await?;
    Ok(outcome.map(|()| Json(ApiResponse::message("Company deleted"))))
}
