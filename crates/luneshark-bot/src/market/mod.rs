//! Market Data Integration
//!
//! Abstractions and implementations for DEX market-data sources, plus the
//! fetcher that turns an extracted entity into a [`MarketSnapshot`].

mod dexscreener;
mod mock;

pub use dexscreener::{DexScreenerClient, DexScreenerConfig};
pub use mock::MockMarketClient;

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::Result;
use crate::model::{ExtractedEntity, Pair};
use crate::snapshot::MarketSnapshot;

/// Market data source trait (Strategy pattern)
///
/// Implement this for each aggregator: DexScreener, Birdeye, etc.
#[async_trait]
pub trait MarketDataClient: Send + Sync {
    /// Free-text pair search, most relevant pair first
    async fn search(&self, query: &str) -> Result<Vec<Pair>>;

    /// Check if the source is available
    async fn health_check(&self) -> bool;

    /// Source name
    fn name(&self) -> &str;
}

/// Looks up live market context for an extracted entity
#[derive(Clone)]
pub struct MarketDataFetcher {
    client: Arc<dyn MarketDataClient>,
}

impl MarketDataFetcher {
    pub fn new(client: Arc<dyn MarketDataClient>) -> Self {
        Self { client }
    }

    pub fn source(&self) -> &str {
        self.client.name()
    }

    pub async fn health_check(&self) -> bool {
        self.client.health_check().await
    }

    /// Snapshot of the top pair, `Ok(None)` when the search came back empty
    pub async fn lookup(&self, entity: &ExtractedEntity) -> Result<Option<MarketSnapshot>> {
        let Some(query) = entity.search_query() else {
            return Ok(None);
        };

        tracing::debug!(source = self.client.name(), query, "Fetching market data");
        let pairs = self.client.search(query).await?;
        tracing::info!("Found {} pairs for {}", pairs.len(), query);

        Ok(pairs.first().map(MarketSnapshot::from_pair))
    }

    /// Like [`lookup`](Self::lookup), but failures are logged and read as "no data"
    pub async fn snapshot_or_none(&self, entity: &ExtractedEntity) -> Option<MarketSnapshot> {
        match self.lookup(entity).await {
            Ok(Some(snapshot)) => Some(snapshot),
            Ok(None) => {
                tracing::info!("No market data found for {}", entity);
                None
            }
            Err(e) => {
                tracing::warn!("Error fetching market data for {}: {}", entity, e);
                None
            }
        }
    }
}
