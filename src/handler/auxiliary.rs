//! # Auxiliary Worker
//!
//! Fixed-latency work that runs alongside the request read. It never touches
//! the request and never contributes to the response.

use async_trait::async_trait;
use std::fmt;
use std::time::Duration;
use tracing::debug;

use crate::error::Result;

#[async_trait]
pub trait AuxiliaryWorker: Send + Sync + fmt::Debug {
    async fn run(&self) -> Result<()>;
}

/// Sleeps for a fixed latency, then reports completion.
#[derive(Debug, Clone, Default)]
pub struct SimulatedWorker {
    latency: Duration,
}

impl SimulatedWorker {
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }
}

#[async_trait]
impl AuxiliaryWorker for SimulatedWorker {
    async fn run(&self) -> Result<()> {
        tokio::time::sleep(self.latency).await;
        debug!(latency_ms = self.latency.as_millis() as u64, "Doing something useful");
        Ok(())
    }
}
