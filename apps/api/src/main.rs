mod config;
mod convert;
mod errors;
mod llm_client;
mod parser;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{Config, TaggerBackend};
use crate::llm_client::LlmClient;
use crate::parser::tagger::{EntityTagger, LlmTagger, RuleTagger};
use crate::parser::ResumeParser;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on invalid values)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resume API v{}", env!("CARGO_PKG_VERSION"));

    // The tagger is the one expensive, process-lifetime object: build it once.
    let tagger = build_tagger(&config)?;
    info!("Entity tagger initialized (backend: {})", tagger.backend());

    let parser = ResumeParser::new(tagger)
        .with_skill_catalogue(config.skill_catalogue.clone())
        .with_tagger_timeout(config.tagger_timeout);
    info!(
        "Skill catalogue: {} terms; degraded records {}",
        config.skill_catalogue.len(),
        if config.allow_degraded_records { "allowed" } else { "rejected" }
    );

    let state = AppState {
        parser: Arc::new(parser),
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn build_tagger(config: &Config) -> Result<Arc<dyn EntityTagger>> {
    match config.tagger_backend {
        TaggerBackend::Rules => Ok(Arc::new(RuleTagger::new())),
        TaggerBackend::Llm => {
            let api_key = config
                .anthropic_api_key
                .clone()
                .context("ANTHROPIC_API_KEY is required for the llm tagger")?;
            let mut llm = LlmClient::new(api_key, config.tagger_timeout)
                .context("Failed to initialize LLM client")?;
            if let Some(url) = &config.anthropic_api_url {
                llm = llm.with_endpoint(url.clone());
            }
            info!("LLM client initialized (model: {})", llm_client::MODEL);
            Ok(Arc::new(LlmTagger::new(llm)))
        }
    }
}
