//! KEY Protocol Event Indexer: entry point.
//!
//! Starts a background task that polls Soroban `getEvents` for the identity,
//! project, KEY and certificate contracts and persists their events to
//! SQLite, and serves a small Axum REST API for the dashboard.

mod api;
mod config;
mod db;
mod errors;
mod events;
mod indexer;
mod rpc;

use std::sync::Arc;

use axum::{routing::get, Router};
use reqwest::Client;
use tokio_util::sync::CancellationToken;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use config::Config;
use indexer::IndexerState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // RUST_LOG controls verbosity.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Load optional .env file (ignored if missing).
    let _ = dotenvy::dotenv();

    let config = Config::from_env()?;
    let pool = db::init_pool(&config.database_url).await?;

    let client = Client::builder()
        .timeout(std::time::Duration::from_secs(30))
        .build()?;

    let shutdown = CancellationToken::new();

    // ─── Background indexer ───────────────────────────────
    let indexer_state = Arc::new(IndexerState {
        pool: pool.clone(),
        config: config.clone(),
        client,
    });
    let indexer_task = tokio::spawn(indexer::run(indexer_state, shutdown.clone()));

    // ─── REST API ─────────────────────────────────────────
    let api_state = Arc::new(api::ApiState { pool });

    let app = Router::new()
        .route("/health", get(api::health))
        .route("/events", get(api::get_all_events))
        .route("/subjects/:id/events", get(api::get_subject_events))
        .route("/dashboard/overview", get(api::get_overview))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(api_state);

    let addr = format!("0.0.0.0:{}", config.api_port);
    info!("API listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    let signal = shutdown.clone();
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutdown requested");
            signal.cancel();
        })
        .await?;

    shutdown.cancel();
    indexer_task.await?;
    Ok(())
}
