//! Bubu Transit Service Binary
//!
//! Starts the departure service that display clients poll for upcoming
//! trains and that stores the latest wearable health reading.
//!
//! # Usage
//!
//! ```bash
//! # Start with settings from ~/.config/Bubu/config.toml (port 8000 by default)
//! METROLINX_API_KEY=... bubu-transit
//!
//! # Override the bind address
//! bubu-transit --host 0.0.0.0 --port 8080
//! ```

use std::net::SocketAddr;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bubu::config::Config;
use bubu::web;

/// Bubu Transit Service - departures and health readings over HTTP
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Port to listen on (defaults to server.port from config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Host to bind to (defaults to server.host from config)
    #[arg(long)]
    host: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize tracing
    let filter = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load().context("Failed to load configuration")?;

    let host = args.host.unwrap_or_else(|| config.server.host.clone());
    let port = args.port.unwrap_or(config.server.port);
    let addr: SocketAddr = format!("{host}:{port}")
        .parse()
        .with_context(|| format!("Invalid bind address: {host}:{port}"))?;

    if config.transit.resolved_api_key().is_none() {
        info!("No provider API key configured; /api/next will answer 503");
    }

    web::run_server(config, addr).await
}
