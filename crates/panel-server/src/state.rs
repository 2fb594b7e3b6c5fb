//! Application State

use std::sync::Arc;

use luneshark_bot::{ChatOrchestrator, MarketDataFetcher};
use panel_core::LlmProvider;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Chat pipeline, shared by every request
    pub orchestrator: Arc<ChatOrchestrator>,
}

impl AppState {
    pub fn new(orchestrator: ChatOrchestrator) -> Self {
        Self {
            orchestrator: Arc::new(orchestrator),
        }
    }

    /// `None` when no API key is configured
    pub fn provider(&self) -> Option<&Arc<dyn LlmProvider>> {
        self.orchestrator.provider()
    }

    pub fn market(&self) -> &MarketDataFetcher {
        self.orchestrator.market()
    }
}
