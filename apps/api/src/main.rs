mod applicants;
mod config;
mod db;
mod enrichment;
mod errors;
mod llm_client;
mod models;
mod routes;
mod sections;
mod state;
mod store;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::create_pool;
use crate::llm_client::GeminiClient;
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::{ApplicantStore, InMemoryApplicantStore, PgApplicantStore};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting enrichresume API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize the applicant store
    let store: Arc<dyn ApplicantStore> = match &config.database_url {
        Some(url) => Arc::new(PgApplicantStore::new(create_pool(url).await?)),
        None => {
            warn!("DATABASE_URL not set; applicants are kept in memory and lost on restart");
            Arc::new(InMemoryApplicantStore::new())
        }
    };

    // Initialize LLM client
    let gemini = GeminiClient::new(
        config.gemini_api_key.clone(),
        config.gemini_model.clone(),
        config.gemini_base_url.clone(),
        config.llm_timeout,
    )
    .context("Failed to build HTTP client for the AI service")?;
    info!("LLM client initialized (model: {})", gemini.model());

    let state = AppState {
        extractor: Arc::new(gemini),
        store,
    };

    // Build router
    let app = build_router(state, config.max_upload_bytes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
