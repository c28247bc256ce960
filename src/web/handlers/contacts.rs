//! # Contact Handlers
//!
//! HTTP entry point for contact creation.

use axum::body::Body;
use axum::extract::State;
use axum::Extension;
use axum::response::Response;
use tracing::error;

use crate::web::errors::{ApiError, ApiResult};
use crate::web::middleware::request_id::RequestId;
use crate::web::state::AppState;

/// Create a contact: POST /contacts/
///
/// The body is handed to the contact handler unread; whether it is read before
/// the response depends on the configured policy.
pub async fn create_contact(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    body: Body,
) -> ApiResult<Response> {
    state.handler.handle(body).await.map_err(|e| {
        if !e.is_client_error() {
            error!(
                request_id = request_id.as_str(),
                policy = %state.handler.policy(),
                error = %e,
                "Failed to create contact"
            );
        }
        ApiError::from(e)
    })
}
