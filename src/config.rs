//! # Configuration
//!
//! Layered settings: built-in defaults, then an optional `config/contact-api.toml`,
//! then `CONTACT_API_*` environment variables.

use config::builder::DefaultState;
use config::{ConfigBuilder, Environment, File};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::{ContactApiError, Result};
use crate::handler::policy::ConcurrencyPolicy;
use crate::handler::reader::DEFAULT_BODY_LIMIT_BYTES;

pub const ENV_PREFIX: &str = "CONTACT_API";
pub const DEFAULT_CONFIG_FILE: &str = "config/contact-api";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactApiConfig {
    pub bind_address: String,
    pub policy: ConcurrencyPolicy,
    /// Artificial latency before the request body is read.
    pub read_delay_ms: u64,
    pub auxiliary_delay_ms: u64,
    pub body_limit_bytes: usize,
    pub request_timeout_ms: u64,
    /// How long shutdown waits for detached work before aborting it.
    pub drain_timeout_ms: u64,
}

impl Default for ContactApiConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
            policy: ConcurrencyPolicy::default(),
            read_delay_ms: 2000,
            auxiliary_delay_ms: 2000,
            body_limit_bytes: DEFAULT_BODY_LIMIT_BYTES,
            request_timeout_ms: 30000,
            drain_timeout_ms: 5000,
        }
    }
}

impl ContactApiConfig {
    /// Load from the default file location and the environment.
    pub fn load() -> Result<Self> {
        Self::load_from(DEFAULT_CONFIG_FILE)
    }

    pub fn load_from(file: &str) -> Result<Self> {
        Self::from_builder(
            config::Config::builder()
                .add_source(File::with_name(file).required(false))
                .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true)),
        )
    }

    fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self> {
        let config: Self = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.bind_address.trim().is_empty() {
            return Err(ContactApiError::Configuration(
                "bind_address cannot be empty".to_string(),
            ));
        }
        if self.body_limit_bytes == 0 {
            return Err(ContactApiError::Configuration(
                "body_limit_bytes must be greater than zero".to_string(),
            ));
        }
        if self.request_timeout_ms == 0 {
            return Err(ContactApiError::Configuration(
                "request_timeout_ms must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn drain_timeout(&self) -> Duration {
        Duration::from_millis(self.drain_timeout_ms)
    }
}
