//! # Web API
//!
//! axum application exposing `POST /contacts/` and `GET /health`.

use axum::Router;
use tracing::info;

pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;

pub use errors::{ApiError, ApiResult};
pub use state::AppState;

/// Create the web application with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    let request_timeout = state.config.request_timeout();

    let router = Router::new()
        .merge(routes::contact_routes())
        .merge(routes::health_routes());

    let app = middleware::apply_middleware_stack(router, request_timeout).with_state(state);

    info!("Contact web application created with all routes and middleware");
    app
}
