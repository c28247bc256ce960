//! # Web Application State
//!
//! Shared state handed to every request: the single long-lived contact handler
//! and the configuration it was built from.

use std::sync::Arc;
use tracing::info;

use crate::config::ContactApiConfig;
use crate::handler::ContactHandler;

#[derive(Debug, Clone)]
pub struct AppState {
    pub handler: Arc<ContactHandler>,
    pub config: Arc<ContactApiConfig>,
}

impl AppState {
    pub fn new(handler: ContactHandler, config: ContactApiConfig) -> Self {
        info!(
            policy = %handler.policy(),
            bind_address = %config.bind_address,
            "Initializing contact web state"
        );

        Self {
            handler: Arc::new(handler),
            config: Arc::new(config),
        }
    }

    /// State with a handler built from `config`.
    pub fn from_config(config: ContactApiConfig) -> Self {
        let handler = ContactHandler::from_config(&config);
        Self::new(handler, config)
    }
}
