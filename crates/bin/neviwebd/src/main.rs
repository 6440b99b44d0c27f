//! # neviwebd — Neviweb130 sensor daemon
//!
//! Composition root that wires the client, the sensor integration and the
//! poll loop together.
//!
//! ## Responsibilities
//! - Load configuration (`neviweb.toml`, environment overrides)
//! - Install the `tracing` subscriber
//! - Construct the shared client and the sensor integration
//! - Drive the integration on the configured scan interval
//! - Handle graceful shutdown (Ctrl-C)
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod config;
mod context;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use neviweb_adapter_sensor::Neviweb130Integration;
use neviweb_adapter_virtual::VirtualClient;
use neviweb_app::services::poll_loop::PollLoop;

use crate::config::Config;
use crate::context::HostContext;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&config.logging.filter)?)
        .init();

    if !config.integrations.virtual_enabled {
        tracing::warn!("no Neviweb client enabled, nothing to poll");
        return Ok(());
    }

    let client = Arc::new(VirtualClient::demo());
    let interval = config.sensor.scan_interval();
    let integration = Neviweb130Integration::new(client, config.sensor);

    tracing::info!(interval_secs = interval.as_secs(), "starting Neviweb130 sensor polling");
    let handle = PollLoop::start(integration, HostContext::default(), interval);

    tokio::signal::ctrl_c().await?;
    tracing::info!("shutdown requested");
    handle.shutdown().await;

    Ok(())
}
