//! # Web API Middleware
//!
//! Middleware stack for the contact API: request ID generation, tracing, CORS
//! and an overall request timeout.

pub mod request_id;

use axum::http::StatusCode;
use axum::middleware;
use axum::Router;
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};

use crate::web::state::AppState;

/// Apply the production middleware stack
///
/// Outermost first:
/// 1. Tracing and logging
/// 2. Request timeout
/// 3. CORS handling
/// 4. Request ID generation
pub fn apply_middleware_stack(
    router: Router<AppState>,
    request_timeout: Duration,
) -> Router<AppState> {
    let common_middleware = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            request_timeout,
        ))
        .layer(create_cors_layer());

    router
        .layer(middleware::from_fn(request_id::add_request_id))
        .layer(common_middleware)
}

/// Create CORS layer with appropriate settings
fn create_cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods(tower_http::cors::Any)
        .allow_headers(tower_http::cors::Any)
}
