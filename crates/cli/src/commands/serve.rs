//! Serve command implementation
//!
//! This module implements `fixture-server serve`: it builds the fixture
//! table, binds the listening socket and answers requests until Ctrl+C or
//! SIGTERM.

use anyhow::{Context, Result};
use fixture_adapters::{banner, HttpServer, ServerConfig};
use fixture_protocol::FixtureTable;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Default log filter when `RUST_LOG` is unset; `fixture_server` is the binary crate
const DEFAULT_LOG_FILTER: &str =
    "fixture_adapters=info,fixture_protocol=info,fixture_server=info,warn";

/// Arguments for the serve command
pub struct ServeArgs {
    /// Interface to listen on
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
}

/// Execute the serve command
pub async fn execute_serve_command(args: ServeArgs) -> Result<()> {
    init_tracing();

    let table = Arc::new(FixtureTable::builtin().context("Failed to build fixture table")?);

    let config = ServerConfig {
        bind_addr: SocketAddr::new(args.host, args.port),
        ..Default::default()
    };

    let server = HttpServer::new(config, table.clone());
    let bound = server
        .bind()
        .with_context(|| format!("Failed to start fixture server on {}:{}", args.host, args.port))?;

    print!("{}", banner(&table, bound.local_addr()));
    info!(routes = table.len(), "Fixture table loaded");

    if let Err(e) = bound.serve_with_shutdown(wait_for_shutdown()).await {
        error!("Fixture server failed: {}", e);
        return Err(e.into());
    }

    info!("Fixture server shutdown complete");
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    // A second init (tests, embedding) keeps the first subscriber.
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn wait_for_shutdown() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

/// Parse the listen host with a helpful error message
pub fn parse_host(host: &str) -> Result<IpAddr> {
    host.parse().with_context(|| {
        format!(
            "Invalid host '{}'. Expected an IP address (e.g., 0.0.0.0 or 127.0.0.1)",
            host
        )
    })
}
