mod config;
mod db;
mod errors;
mod evaluation;
mod interview;
mod llm_client;
mod models;
mod panel;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::{create_pool, init_schema};
use crate::evaluation::history::{EvaluationHistory, PgEvaluationHistory};
use crate::interview::engine::SessionRegistry;
use crate::interview::generator::{InterviewModel, LlmInterviewModel};
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting panel interview API v{}", env!("CARGO_PKG_VERSION"));

    // The panel is static configuration; reject a bad edit before any
    // session can observe it.
    panel::validate_panel()?;
    info!("Panel validated: {} personas", panel::PANEL.len());

    // Initialize PostgreSQL (evaluation history store)
    let pool = create_pool(&config.database_url).await?;
    init_schema(&pool).await?;

    // Initialize LLM client
    let llm = LlmClient::new(config.anthropic_api_key.clone());
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    let model: Arc<dyn InterviewModel> = Arc::new(LlmInterviewModel::new(llm));
    let history: Arc<dyn EvaluationHistory> = Arc::new(PgEvaluationHistory::new(pool));

    // Build app state
    let state = AppState {
        model,
        history,
        sessions: SessionRegistry::default(),
        config: config.clone(),
    };

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
