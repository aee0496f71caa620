//! # Validation Node
//!
//! Entry point for a payment validation node.
//!
//! ## Startup Sequence
//!
//! 1. Initialize logging (`RUST_LOG`, default `info`)
//! 2. Load configuration from `PV_*` environment variables
//! 3. Reject unsafe configuration (zero governance, no trusted requesters)
//! 4. Build the registry and the request machine
//! 5. Start the event log task
//! 6. Run until Ctrl+C

use anyhow::{Context, Result};
use node_runtime::{EventLogHandler, NodeConfig, ValidationNode};
use pv_03_validator_registry::ValidatorRegistryApi;
use pv_04_validation_requests::ValidationApi;
use shared_bus::EventFilter;
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(true)
        .init();

    let config = NodeConfig::from_env().context("failed to load configuration")?;
    config.validate().context("refusing to start")?;
    config.log_summary();

    let node = ValidationNode::new(config);

    let (shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
    let event_log = EventLogHandler::new(node.event_bus.subscribe(EventFilter::all()));
    let event_task = tokio::spawn(event_log.run(shutdown_rx));

    info!(
        active_validators = node.registry.active_count(),
        high_value_threshold = node.requests.high_value_threshold(),
        "validation node running, press Ctrl+C to stop"
    );
    tokio::signal::ctrl_c()
        .await
        .context("failed to listen for shutdown signal")?;

    info!("initiating graceful shutdown");
    if let Err(e) = shutdown_tx.send(true) {
        error!("failed to send shutdown signal: {}", e);
    }
    match tokio::time::timeout(Duration::from_secs(2), event_task).await {
        Ok(Ok(logged)) => info!(logged, "shutdown complete"),
        Ok(Err(e)) => error!("event log task failed: {}", e),
        Err(_) => error!("event log task did not stop in time"),
    }

    Ok(())
}
