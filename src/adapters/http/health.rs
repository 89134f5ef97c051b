//! Liveness endpoint.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use crate::ports::HealthCheck;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub store: &'static str,
    pub version: &'static str,
}

/// GET /health - Reports service status, probing the backing store
pub async fn health(State(check): State<Arc<dyn HealthCheck>>) -> impl IntoResponse {
    let (status, label) = match check.check().await {
        Ok(()) => (StatusCode::OK, "ok"),
        Err(err) => {
            tracing::warn!(error = %err, "health check failed");
            (StatusCode::SERVICE_UNAVAILABLE, "unavailable")
        }
    };

    let body = HealthResponse {
        status: label,
        store: check.store_name(),
        version: env!("CARGO_PKG_VERSION"),
    };
    (status, Json(body))
}

/// Router serving `/health`.
pub fn health_router(check: Arc<dyn HealthCheck>) -> Router {
    Router::new().route("/health", get(health)).with_state(check)
}
