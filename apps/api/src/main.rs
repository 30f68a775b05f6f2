mod config;
mod errors;
mod models;
mod parser_client;
mod routes;
mod state;
mod upload;
mod views;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::parser_client::HttpParserClient;
use crate::routes::build_router;
use crate::state::AppState;
use crate::upload::controller::UploadController;
use crate::upload::ingest::IngestionService;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.rust_log)),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Candidates API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize the external parser client
    let parser = Arc::new(HttpParserClient::new(
        config.parser_url.clone(),
        config.parser_api_key.clone(),
        config.parser_timeout_secs,
    ));
    info!("Parser client initialized (endpoint: {})", config.parser_url);

    // One controller per process: this deployment serves a single session's
    // upload lifecycle and record.
    let controller = Arc::new(UploadController::new(IngestionService::new(parser)));

    // Build app state
    let state = AppState { controller };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
