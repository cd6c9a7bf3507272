//! # Gateway Runtime
//!
//! Entry point for the signature verification gateway.
//!
//! ## Startup Sequence
//!
//! 1. Install logging (`RUST_LOG`, default `info`)
//! 2. Load configuration from `PORT`, `HOST`, `FRONTEND_URL`, `MAX_REQUEST_SIZE`
//! 3. Bind and serve until Ctrl+C, then drain in-flight requests

use anyhow::{Context, Result};
use tokio::sync::oneshot;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};
use ws_02_verify_gateway::{ApiGatewayService, GatewayConfig};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = GatewayConfig::from_env();
    info!(
        addr = %config.http_addr(),
        origins = ?config.cors.allowed_origins,
        max_request_size = config.limits.max_request_size,
        "Loaded gateway configuration"
    );

    let gateway = ApiGatewayService::new(config).context("invalid gateway configuration")?;

    let (shutdown_tx, shutdown_rx) = oneshot::channel();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("Shutdown signal received"),
            Err(e) => warn!(error = %e, "Failed to listen for Ctrl+C, shutting down"),
        }
        let _ = shutdown_tx.send(());
    });

    gateway.start(shutdown_rx).await?;

    info!("Gateway stopped");
    Ok(())
}
