//! HTTP adapters - REST API implementations.
//!
//! Each domain module has its own HTTP adapter for endpoint exposure.
//! [`api_router`] assembles them behind the shared tower-http layers.

pub mod health;
pub mod learning_path;

pub use health::health_router;
pub use learning_path::{learning_path_router, LearningPathApiError, LearningPathAppState};

use std::sync::Arc;

use axum::http::{header, HeaderValue, Method};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::{Environment, ServerConfig};
use crate::ports::HealthCheck;

/// Builds the full application router.
///
/// Requests are traced and bounded by the configured timeout. CORS follows
/// `server.cors_origins`; with no origins configured, development servers
/// allow any origin and other environments send no CORS headers.
pub fn api_router(
    state: LearningPathAppState,
    health: Arc<dyn HealthCheck>,
    server: &ServerConfig,
) -> Router {
    let router = Router::new()
        .nest(
            "/api/learningpaths",
            learning_path_router().with_state(state),
        )
        .merge(health_router(health))
        .layer(TimeoutLayer::new(server.request_timeout()));

    let origins = server.cors_origins_list();
    let router = if !origins.is_empty() {
        router.layer(build_cors_layer(&origins))
    } else if server.environment == Environment::Development {
        router.layer(CorsLayer::permissive())
    } else {
        router
    };

    router.layer(TraceLayer::new_for_http())
}

fn build_cors_layer(origins: &[String]) -> CorsLayer {
    let mut parsed = Vec::new();
    for origin in origins {
        match HeaderValue::from_str(origin) {
            Ok(value) => parsed.push(value),
            Err(err) => tracing::warn!("ignoring invalid CORS origin '{origin}': {err}"),
        }
    }

    CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE])
        .allow_origin(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_origins_are_skipped() {
        // Builds without panicking even when an origin is not a valid header.
        let _layer = build_cors_layer(&["http://localhost:5173".to_string(), "bad\norigin".to_string()]);
    }
}
