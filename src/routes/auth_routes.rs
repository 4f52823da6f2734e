use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Extension, Json, Router,
};

use crate::controllers::auth_controller::AuthController;
use crate::dto::auth_dto::{AccountResponse, CreateAccountRequest, LoginRequest, LoginResponse};
use crate::dto::company_dto::ApiResponse;
use crate::middleware::auth::AuthenticatedUser;
use crate::state::AppState;
use crate::utils::errors::AppError;

/// Routes reachable without a token
pub fn create_login_router() -> Router<AppState> {
    Router::new().route("/login", post(login))
}

/// Routes for the signed-in caller
pub fn create_session_router() -> Router<AppState> {
    Router::new().route("/me", get(me))
}

pub fn create_account_router() -> Router<AppState> {
    Router::new().route("/", post(create_account))
}

async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let controller = AuthController::new(state.pool.clone());
    let response = controller.login(request, &state.jwt_config()).await?;
    Ok(Json(response))
}

async fn me(Extension(user): Extension<AuthenticatedUser>) -> Json<AuthenticatedUser> {
    Json(user)
}

async fn create_account(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<CreateAccountRequest>,
) -> Result<(StatusCode, Json<ApiResponse<AccountResponse>>), AppError> {
    let controller = AuthController::new(state.pool.clone());
    let account = controller.create_account(&user, request).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success_with_message(account, "Account created")),
    ))
}
