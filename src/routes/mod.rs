//! HTTP routes
//!
//! `create_router` assembles the whole API: public health and login routes,
//! and the token-protected resources behind `auth_middleware`.

use axum::{middleware, routing::get, Json, Router};
use serde_json::{json, Value};
use tower::limit::ConcurrencyLimitLayer;
use tower_http::{compression::CompressionLayer, trace::TraceLayer};

use crate::middleware::{auth_middleware, cors_layer};
use crate::state::AppState;

pub mod auth_routes;
pub mod company_routes;
pub mod dashboard_routes;
pub mod document_routes;
pub mod export_routes;
pub mod worker_routes;

const MAX_CONCURRENT_REQUESTS: usize = 256;

pub fn create_router(state: AppState) -> Router {
    let protected = Router::new()
        .nest("/api/auth", auth_routes::create_session_router())
        .nest("/api/accounts", auth_routes::create_account_router())
        .nest("/api/dashboard", dashboard_routes::create_dashboard_router())
        .nest("/api/companies", company_routes::create_company_router())
        .nest("/api/workers", worker_routes::create_worker_router())
        .nest("/api/documents", document_routes::create_document_router())
        .nest("/api/export", export_routes::create_export_router())
        .route_layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    let public = Router::new()
        .route("/health", get(health))
        .nest("/api/auth", auth_routes::create_login_router());

    let cors = cors_layer(&state.config.cors_origins);

    public
        .merge(protected)
        .layer(CompressionLayer::new())
        .layer(ConcurrencyLimitLayer::new(MAX_CONCURRENT_REQUESTS))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
