//! DexScreener Client
//!
//! Free-text pair search against the public DexScreener API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use super::MarketDataClient;
use crate::error::{BotError, Result};
use crate::model::Pair;

const DEFAULT_BASE_URL: &str = "https://api.dexscreener.com";

/// DexScreener client configuration
#[derive(Clone, Debug)]
pub struct DexScreenerConfig {
    /// API root, without trailing slash
    pub base_url: String,

    /// Whole-request timeout
    pub timeout: Duration,

    pub user_agent: String,
}

impl Default for DexScreenerConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            timeout: Duration::from_secs(5),
            user_agent: "PlioBot/1.0".into(),
        }
    }
}

impl DexScreenerConfig {
    /// Honors `DEXSCREENER_BASE_URL`; the timeout stays fixed
    pub fn from_env() -> Self {
        let base_url = std::env::var("DEXSCREENER_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_BASE_URL.into());

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchResponse {
    #[serde(default)]
    #[allow(dead_code)]
    schema_version: Option<String>,
    /// `null` when nothing matched
    #[serde(default)]
    pairs: Option<Vec<Pair>>,
}

/// DexScreener market-data source
pub struct DexScreenerClient {
    client: Client,
    config: DexScreenerConfig,
}

impl DexScreenerClient {
    pub fn new(config: DexScreenerConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self { client, config })
    }

    pub fn from_env() -> Result<Self> {
        Self::new(DexScreenerConfig::from_env())
    }

    pub fn config(&self) -> &DexScreenerConfig {
        &self.config
    }

    fn search_url(&self) -> String {
        format!("{}/latest/dex/search", self.config.base_url)
    }

    fn parse_search(body: &str) -> Result<Vec<Pair>> {
        let response: SearchResponse = serde_json::from_str(body)?;
        Ok(response.pairs.unwrap_or_default())
    }
}

#[async_trait]
impl MarketDataClient for DexScreenerClient {
    async fn search(&self, query: &str) -> Result<Vec<Pair>> {
        let response = self.client
            .get(self.search_url())
            .query(&[("q", query)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("DexScreener returned {} for {}", status, query);
            return Err(BotError::MarketStatus(status.as_u16()));
        }

        let body = response.text().await?;
        Self::parse_search(&body)
            .map_err(|e| BotError::Market(format!("unreadable search response: {e}")))
    }

    async fn health_check(&self) -> bool {
        match self.search("SOL").await {
            Ok(_) => true,
            Err(e) => {
                tracing::warn!("DexScreener health check failed: {}", e);
                false
            }
        }
    }

    fn name(&self) -> &str {
        "DexScreener"
    }
}
