mod config;
mod errors;
mod extraction;
mod llm_client;
mod models;
mod routes;
mod state;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::extraction::ai::AiExtractor;
use crate::extraction::rule_based::RuleBasedExtractor;
use crate::extraction::strategy::StrategySelector;
use crate::llm_client::{LlmClient, LlmError};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first; malformed values abort startup
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting skillsheet API v{}", env!("CARGO_PKG_VERSION"));

    // Rule-based engine: compiles every pattern once, always available
    let rule_based =
        Arc::new(RuleBasedExtractor::new().context("Failed to compile extraction patterns")?);

    // AI strategy is optional; without a usable key every request is rule-based
    let mut selector = StrategySelector::new(rule_based, config.llm.timeout);
    match LlmClient::new(&config.llm) {
        Ok(llm) => {
            info!(
                "AI extraction enabled (model: {}, timeout: {}ms)",
                llm.model(),
                config.llm.timeout.as_millis()
            );
            selector = selector.with_primary(Arc::new(AiExtractor::new(llm)));
        }
        Err(LlmError::NotConfigured) => {
            info!("OPENAI_API_KEY not set; using rule-based extraction only")
        }
        Err(e) => warn!("AI extraction disabled: {e}"),
    }

    // Build app state
    let state = AppState {
        selector: Arc::new(selector),
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the form UI has a fixed host

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
