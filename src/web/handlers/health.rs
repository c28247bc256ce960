//! # Health Check Handlers

use axum::extract::State;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::handler::ConcurrencyPolicy;
use crate::web::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub policy: ConcurrencyPolicy,
    pub detached_in_flight: usize,
    pub timestamp: DateTime<Utc>,
}

/// Basic health check endpoint: GET /health
///
/// Reports `draining` once the detached task group has stopped accepting work.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let detached = state.handler.detached();
    let status = if detached.is_closed() {
        "draining"
    } else {
        "healthy"
    };

    Json(HealthResponse {
        status: status.to_string(),
        policy: state.handler.policy(),
        detached_in_flight: detached.in_flight(),
        timestamp: Utc::now(),
    })
}
