//! pricelist-server - grouped voucher price list
//!
//! Fetches the upstream price list on every request, groups it by category,
//! brand and code, and serves it as JSON and as HTML tables.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use pricelist_common::config::{ServiceConfig, TomlConfig};
use pricelist_server::cli::ServerArgs;
use pricelist_server::upstream::{Coalesced, UpstreamClient};
use pricelist_server::{build_router, AppState};
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pricelist_server=info,pricelist_common=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = ServerArgs::parse();

    info!(
        "Starting pricelist-server v{}",
        env!("CARGO_PKG_VERSION")
    );

    let file_config = TomlConfig::load_optional(&args.config).context("Failed to load config file")?;

    // Credentials are checked here so a misconfigured server never starts
    let config = match ServiceConfig::resolve(args.overrides(), file_config) {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            return Err(e.into());
        }
    };

    let client = UpstreamClient::new(config.upstream.clone())
        .context("Failed to initialize upstream client")?;
    info!(
        "Upstream: {} (timeout {:?})",
        client.config().url,
        client.config().timeout
    );

    let source = Coalesced::new(client);
    let state = AppState::new(Arc::new(source), config.visibility.clone());
    let app = build_router(state);

    let addr = SocketAddr::new(config.bind, config.port);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    info!("Listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!("Failed to install terminate handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
