mod assessments;
mod catalog;
mod config;
mod db;
mod errors;
mod extract;
mod insights;
mod llm_client;
mod matching;
mod report;
mod routes;
mod state;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::assessments::{AssessmentStore, MemoryAssessmentStore, PgAssessmentStore};
use crate::catalog::load_catalog;
use crate::config::Config;
use crate::db::create_pool;
use crate::insights::EnrichmentCache;
use crate::llm_client::LlmClient;
use crate::matching::RuleBasedMatcher;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed numeric env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting DreamWeave API v{}", env!("CARGO_PKG_VERSION"));

    // Load and validate the catalog; a bad catalog is fatal
    let catalog = load_catalog(config.catalog_path.as_deref()).context("failed to load catalog")?;

    // Assessment storage: Postgres when configured, in-memory otherwise
    let store: Arc<dyn AssessmentStore> = match &config.database_url {
        Some(url) => Arc::new(PgAssessmentStore::new(create_pool(url).await?)),
        None => {
            warn!("DATABASE_URL not set; assessments are kept in memory and lost on restart");
            Arc::new(MemoryAssessmentStore::new())
        }
    };
    info!("Assessment store: {}", store.backend());

    // Enrichment cache (Redis); an unreachable server only disables caching
    let cache = match &config.redis_url {
        Some(url) => {
            let client = redis::Client::open(url.as_str()).context("invalid REDIS_URL")?;
            match EnrichmentCache::connect(client, config.enrichment_cache_ttl_secs).await {
                Ok(cache) => {
                    if cache.is_enabled() {
                        info!(
                            "Redis enrichment cache enabled (ttl {}s)",
                            config.enrichment_cache_ttl_secs
                        );
                    }
                    cache
                }
                Err(e) => {
                    warn!("Redis unavailable, enrichment responses will not be cached: {e}");
                    EnrichmentCache::disabled()
                }
            }
        }
        None => EnrichmentCache::disabled(),
    };

    // LLM client (Gemini)
    let llm = match &config.gemini_api_key {
        Some(key) => {
            let client = LlmClient::new(key.clone(), config.gemini_model.clone())?;
            info!("LLM client initialized (model: {})", client.model());
            Some(client)
        }
        None => {
            warn!("GEMINI_API_KEY not set; enrichment endpoints serve static catalog data");
            None
        }
    };

    let state = AppState {
        catalog: Arc::new(catalog),
        matcher: Arc::new(RuleBasedMatcher),
        store,
        llm,
        cache,
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
