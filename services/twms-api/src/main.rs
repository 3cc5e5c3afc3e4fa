//! Tiled-WMS front end.
//!
//! Translates legacy tiled-WMS bounding box requests into tile addresses
//! within each configured raster's resolution pyramid, and redirects to
//! the tile service that actually holds the imagery.

mod endpoint_config;
mod handlers;
mod state;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Result};
use axum::{extract::Extension, routing::get, Router};
use clap::Parser;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use state::AppState;

#[derive(Parser, Debug)]
#[command(name = "twms-api")]
#[command(about = "Tiled-WMS tile address resolution server")]
struct Args {
    /// Listen address
    #[arg(short, long, default_value = "0.0.0.0:8080", env = "TWMS_LISTEN")]
    listen: String,

    /// Directory of endpoint directive files (*.twms)
    #[arg(short, long, default_value = "config/endpoints", env = "TWMS_CONFIG_DIR")]
    config_dir: PathBuf,

    /// Log filter, e.g. "info" or "twms_api=debug"
    #[arg(long, default_value = "info", env = "TWMS_LOG")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&args.log_level))
        .init();

    info!(config_dir = %args.config_dir.display(), "loading endpoint configuration");
    let state = Arc::new(AppState::new(&args.config_dir)?);
    if state.endpoints.is_empty() {
        bail!(
            "no endpoints configured under {}",
            args.config_dir.display()
        );
    }
    info!(endpoints = state.endpoints.len(), "endpoints activated");

    let app = Router::new()
        .route("/twms/:endpoint", get(handlers::twms_handler))
        .route("/twms/:endpoint/tile", get(handlers::tile_json_handler))
        .route("/health", get(handlers::health_handler))
        .layer(Extension(state))
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = args.listen.parse()?;
    info!(address = %addr, "listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
