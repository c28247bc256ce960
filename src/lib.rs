#![allow(clippy::missing_errors_doc)] // Allow public functions without # Errors sections
#![allow(clippy::must_use_candidate)] // Allow methods without must_use when context is clear

//! # Contact API
//!
//! A create-contact HTTP endpoint used to explore how one request coordinates
//! concurrent work before it responds.
//!
//! ## Overview
//!
//! `POST /contacts/` accepts `{"contactKey": ..., "type": "ADMIN" | "END_USER" | "TESTER"}`
//! and answers `{"contactKey": "<uuid>"}`, where the returned key is always freshly
//! generated. Nothing is persisted or validated beyond decoding.
//!
//! Each inbound call triggers a request-body read, an independent auxiliary task
//! and one response write. The [`ConcurrencyPolicy`] chosen at construction
//! decides how those overlap:
//!
//! - **Sequential** - read, then respond
//! - **ConcurrentAwait** - read and auxiliary work together, respond after both
//! - **FireAndForget** - hand both to the detached task group, respond at once
//! - **TracedFireAndForget** - as above, with trace events around the response
//!
//! ## Module Organization
//!
//! - [`handler`] - the contact handler, its collaborators and the detached task group
//! - [`models`] - request and response payloads
//! - [`trace`] - injected trace sink
//! - [`web`] - axum routes, middleware and error mapping
//! - [`config`] - layered configuration
//! - [`logging`] - tracing subscriber setup
//! - [`error`] - domain errors
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use contact_api::{web, AppState, ContactApiConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ContactApiConfig::load()?;
//! let state = AppState::from_config(config.clone());
//! let detached = state.handler.detached().clone();
//!
//! let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
//! axum::serve(listener, web::create_app(state)).await?;
//!
//! detached.shutdown(config.drain_timeout()).await;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod handler;
pub mod logging;
pub mod models;
pub mod trace;
pub mod web;

pub use config::ContactApiConfig;
pub use error::{ContactApiError, Result};
pub use handler::{
    AuxiliaryWorker, ConcurrencyPolicy, ContactHandler, DetachedTasks, JsonRequestReader,
    JsonResponseWriter, RequestReader, ResponseWriter, ShutdownReport, SimulatedWorker,
};
pub use models::{ContactRequest, ContactResponse, ContactType};
pub use trace::{RecordingSink, TraceEvent, TraceKind, TraceSink, TracingSink};
pub use web::{create_app, AppState};
