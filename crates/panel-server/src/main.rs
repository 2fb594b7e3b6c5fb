//! Luneshark Holder Panel chat server
//!
//! Wires the OpenAI provider (when `OPENAI_API_KEY` is set) and the
//! DexScreener client into the chat pipeline and serves it over HTTP.

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use luneshark_bot::{ChatOrchestrator, DexScreenerClient, MarketDataFetcher};
use panel_core::{LlmProvider, SessionCache};
use panel_core::provider::DEFAULT_MODEL;
use panel_runtime::OpenAiProvider;
use panel_server::{create_router, AppState, ServerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment
    dotenvy::dotenv().ok();

    let config = ServerConfig::from_env();

    // LLM provider is optional; without a key every reply is canned
    let provider = OpenAiProvider::from_env();
    let model = provider
        .as_ref()
        .map_or_else(|| DEFAULT_MODEL.to_string(), |p| p.model().to_string());

    match &provider {
        Some(provider) => match provider.health_check().await {
            Ok(true) => tracing::info!("✓ OpenAI reachable, model {}", provider.model()),
            Ok(false) | Err(_) => {
                tracing::warn!("⚠ OpenAI not reachable - replies will fall back to canned text");
            }
        },
        None => {
            tracing::warn!("⚠ OPENAI_API_KEY not set - using canned replies only");
        }
    }

    // Market data
    let market = MarketDataFetcher::new(Arc::new(DexScreenerClient::from_env()?));
    tracing::info!("Market data source: {}", market.source());

    let provider = provider.map(|p| Arc::new(p) as Arc<dyn LlmProvider>);
    let orchestrator = ChatOrchestrator::new(provider, model, market)
        .with_entity_cache(Arc::new(SessionCache::with_capacity(config.session_capacity)));

    let app = create_router(AppState::new(orchestrator));

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;

    tracing::info!("══════════════════════════════════════════════════");
    tracing::info!("🦈 Luneshark panel server running on http://{}", config.bind_addr);
    tracing::info!("══════════════════════════════════════════════════");
    tracing::info!("Endpoints:");
    tracing::info!("  GET  /health    - Health check");
    tracing::info!("  POST /api/chat  - Chat with LunesharkBot");

    axum::serve(listener, app).await?;

    Ok(())
}
