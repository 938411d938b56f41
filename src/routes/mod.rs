//! Router assembly.
//!
//! Binds the API endpoints under a single Axum router: the three adapter
//! endpoints (audit logs, skip rules, validation), the session surface, and
//! a health probe. CORS is wide open; callers are internal platform tools.

pub mod audit_logs;
pub mod auth;
pub mod error;
pub mod skip_rules;
pub mod validation;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/audit-logs", get(audit_logs::list))
        .route("/api/onboarding/skip-rules", get(skip_rules::list))
        .route("/api/validation", post(validation::run))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/auth/me", get(auth::me))
        .route("/healthz", get(healthz))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
