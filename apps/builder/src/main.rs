mod config;
mod errors;
mod fields;
mod generation_client;
mod models;
mod render;
mod routes;
mod state;
mod storage;
mod submission;
mod validation;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::generation_client::HttpGenerationClient;
use crate::routes::build_router;
use crate::state::AppState;
use crate::storage::{DraftStore, InMemoryStore, KeyValueStore, RedisStore, ResultStore};
use crate::submission::SubmissionController;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting resume builder v{}", env!("CARGO_PKG_VERSION"));

    // Slot storage: Redis when configured, otherwise process memory
    let slots: Arc<dyn KeyValueStore> = match &config.redis_url {
        Some(url) => Arc::new(
            RedisStore::connect(url)
                .await
                .context("Failed to connect to Redis slot store")?,
        ),
        None => {
            info!("REDIS_URL not set; drafts and results are kept in memory");
            Arc::new(InMemoryStore::new())
        }
    };
    let drafts = DraftStore::new(slots.clone());
    let results = ResultStore::new(slots);

    let service = HttpGenerationClient::new(&config.generation_service_url)
        .context("GENERATION_SERVICE_URL is not a usable URL")?;
    info!("Generation service: {}", config.generation_service_url);

    let controller = Arc::new(SubmissionController::new(
        drafts.clone(),
        results.clone(),
        Arc::new(service),
    ));

    info!("Result retention: {:?}", config.result_retention);
    let state = AppState {
        drafts,
        results,
        controller,
        result_retention: config.result_retention,
    };

    let app = build_router(state).layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
