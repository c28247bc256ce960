//! # Response Writer
//!
//! Encodes a [`ContactResponse`] into the HTTP response handed back to the transport.

use axum::body::Body;
use axum::http::{header, StatusCode};
use axum::response::Response;
use std::fmt;

use crate::error::{ContactApiError, Result};
use crate::models::ContactResponse;

pub const JSON_CONTENT_TYPE: &str = "application/json";

pub trait ResponseWriter: Send + Sync + fmt::Debug {
    fn write(&self, response: &ContactResponse) -> Result<Response>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct JsonResponseWriter;

impl ResponseWriter for JsonResponseWriter {
    fn write(&self, response: &ContactResponse) -> Result<Response> {
        let payload = serde_json::to_vec(response)
            .map_err(|e| ContactApiError::serialization(e.to_string()))?;

        Response::builder()
            .status(StatusCode::OK)
            .header(header::CONTENT_TYPE, JSON_CONTENT_TYPE)
            .body(Body::from(payload))
            .map_err(|e| ContactApiError::serialization(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    #[tokio::test]
    async fn test_writes_json_with_status_and_content_type() {
        let response = ContactResponse {
            contact_key: "generated".to_string(),
        };

        let http = JsonResponseWriter.write(&response).unwrap();
        assert_eq!(http.status(), StatusCode::OK);
        assert_eq!(
            http.headers().get(header::CONTENT_TYPE).unwrap(),
            JSON_CONTENT_TYPE
        );

        let bytes = http.into_body().collect().await.unwrap().to_bytes();
        let decoded: ContactResponse = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(decoded, response);
    }
}
