//! # Contact API Server
//!
//! Runs the contact endpoint as a standalone server.
//!
//! ## Usage
//!
//! ```bash
//! # Run with default configuration
//! cargo run --bin contact-api-server
//!
//! # Fire-and-forget policy with short delays
//! CONTACT_API_POLICY=fire_and_forget CONTACT_API_READ_DELAY_MS=100 cargo run --bin contact-api-server
//! ```

use anyhow::Context;
use tokio::signal;
use tracing::info;

use contact_api::{logging, web, AppState, ContactApiConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init_structured_logging();

    info!("Starting Contact API Server...");
    info!("   Version: {}", env!("CARGO_PKG_VERSION"));

    let config = ContactApiConfig::load().context("Failed to load configuration")?;
    info!(
        policy = %config.policy,
        read_delay_ms = config.read_delay_ms,
        auxiliary_delay_ms = config.auxiliary_delay_ms,
        "Configuration loaded"
    );

    let state = AppState::from_config(config.clone());
    let detached = state.handler.detached().clone();
    let app = web::create_app(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_address)
        .await
        .with_context(|| format!("Failed to bind to {}", config.bind_address))?;

    info!("Contact API listening on {}", config.bind_address);
    info!("   Press Ctrl+C to shutdown gracefully");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Contact API server error")?;

    info!("Server stopped accepting requests, draining detached tasks...");
    let report = detached.shutdown(config.drain_timeout()).await;
    info!(
        drained = report.drained,
        orphaned = report.orphaned,
        "Contact API Server shutdown complete"
    );

    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C");
        },
        _ = terminate => {
            info!("Received SIGTERM");
        },
    }
}
