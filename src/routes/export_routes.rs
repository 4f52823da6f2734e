use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    routing::get,
    Extension, Router,
};

use crate::controllers::export_controller::ExportController;
use crate::middleware::auth::AuthenticatedUser;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_export_router() -> Router<AppState> {
    Router::new()
        .route("/workers.csv", get(export_workers))
        .route("/documents.csv", get(export_documents))
}

/// CSV body served as a download
pub fn csv_attachment(filename: &str, body: Vec<u8>) -> Response {
    (
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        body,
    )
        .into_response()
}

async fn export_workers(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Response, AppError> {
    let controller = ExportController::new(state.pool.clone());
    let body = controller.workers(&user).await?;
    Ok(csv_attachment("workers.csv", body))
}

async fn export_documents(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Response, AppError> {
    let controller = ExportController::new(state.pool.clone());
    let body = controller.documents(&user, state.config.today()).await?;
    Ok(csv_attachment("documents.csv", body))
}
