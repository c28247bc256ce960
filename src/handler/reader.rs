//! # Request Reader
//!
//! Reads and decodes the create-contact payload from an inbound call. The body
//! is moved into the reader, so a call can be read at most once.

use async_trait::async_trait;
use axum::body::Body;
use std::fmt;
use std::time::Duration;
use tracing::debug;

use crate::error::{ContactApiError, Result};
use crate::models::ContactRequest;

pub const DEFAULT_BODY_LIMIT_BYTES: usize = 64 * 1024;

#[async_trait]
pub trait RequestReader: Send + Sync + fmt::Debug {
    /// Suspend until the payload is received and parsed.
    async fn read(&self, body: Body) -> Result<ContactRequest>;
}

/// JSON reader with an optional artificial latency before the body is consumed.
#[derive(Debug, Clone)]
pub struct JsonRequestReader {
    delay: Duration,
    body_limit: usize,
}

impl Default for JsonRequestReader {
    fn default() -> Self {
        Self {
            delay: Duration::ZERO,
            body_limit: DEFAULT_BODY_LIMIT_BYTES,
        }
    }
}

impl JsonRequestReader {
    pub fn new(delay: Duration, body_limit: usize) -> Self {
        Self { delay, body_limit }
    }

    pub fn with_delay(delay: Duration) -> Self {
        Self {
            delay,
            ..Self::default()
        }
    }
}

#[async_trait]
impl RequestReader for JsonRequestReader {
    async fn read(&self, body: Body) -> Result<ContactRequest> {
        debug!(delay_ms = self.delay.as_millis() as u64, "Getting request");
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let bytes = axum::body::to_bytes(body, self.body_limit)
            .await
            .map_err(|e| {
                ContactApiError::deserialization(format!("Failed to read request body: {e}"))
            })?;

        let request: ContactRequest = serde_json::from_slice(&bytes)?;
        Ok(request)
    }
}
