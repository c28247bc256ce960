//! # Web API Routes

use axum::{
    routing::{get, post},
    Router,
};

use crate::web::{handlers, state::AppState};

/// Contact creation. Both spellings of the path are served.
pub fn contact_routes() -> Router<AppState> {
    Router::new()
        .route("/contacts/", post(handlers::contacts::create_contact))
        .route("/contacts", post(handlers::contacts::create_contact))
}

/// Health check routes for monitoring
pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health_check))
}
