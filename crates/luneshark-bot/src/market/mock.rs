//! Mock Market Client
//!
//! For testing and demo purposes. Serves a handful of static Solana pairs and
//! remembers every query it was asked.

use async_trait::async_trait;
use rust_decimal_macros::dec;
use tokio::sync::Mutex;

use super::MarketDataClient;
use crate::error::{BotError, Result};
use crate::model::{Liquidity, Pair, PairWindows, TokenInfo};

/// Mock market-data source with static pairs
pub struct MockMarketClient {
    pairs: Vec<Pair>,
    fail: bool,
    queries: Mutex<Vec<String>>,
}

impl Default for MockMarketClient {
    fn default() -> Self {
        Self::new()
    }
}

impl MockMarketClient {
    pub fn new() -> Self {
        Self::with_pairs(default_pairs())
    }

    pub fn with_pairs(pairs: Vec<Pair>) -> Self {
        Self {
            pairs,
            fail: false,
            queries: Mutex::new(Vec::new()),
        }
    }

    /// Every search comes back with zero pairs
    pub fn empty() -> Self {
        Self::with_pairs(Vec::new())
    }

    /// Every search fails as if the upstream were down
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::empty()
        }
    }

    /// Queries received so far, oldest first
    pub async fn queries(&self) -> Vec<String> {
        self.queries.lock().await.clone()
    }

    fn matches(pair: &Pair, query: &str) -> bool {
        let token = &pair.base_token;
        token.address == query
            || token.symbol.eq_ignore_ascii_case(query)
            || token.name.eq_ignore_ascii_case(query)
    }
}

#[async_trait]
impl MarketDataClient for MockMarketClient {
    async fn search(&self, query: &str) -> Result<Vec<Pair>> {
        self.queries.lock().await.push(query.to_string());

        if self.fail {
            return Err(BotError::MarketStatus(503));
        }

        Ok(self
            .pairs
            .iter()
            .filter(|pair| Self::matches(pair, query))
            .cloned()
            .collect())
    }

    async fn health_check(&self) -> bool {
        !self.fail
    }

    fn name(&self) -> &str {
        "MockMarket"
    }
}

fn sol_quote() -> TokenInfo {
    TokenInfo::new("So11111111111111111111111111111111111111112", "Wrapped SOL", "SOL")
}

fn default_pairs() -> Vec<Pair> {
    vec![
        Pair {
            chain_id: "solana".into(),
            dex_id: "raydium".into(),
            url: "https://dexscreener.com/solana/58oqchx4ywmvkdwllzzbi4chocc2fqcuwbkwmihlyqo2".into(),
            pair_address: "58oQChx4yWmvKdwLLZzBi4ChoCc2fqCUWBkwMihLYQo2".into(),
            base_token: TokenInfo::new("So11111111111111111111111111111111111111112", "Wrapped SOL", "SOL"),
            quote_token: TokenInfo::new("EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v", "USD Coin", "USDC"),
            price_usd: Some("195.42".into()),
            volume: PairWindows { h24: Some(dec!(48250000)), ..Default::default() },
            price_change: PairWindows { h24: Some(dec!(4.2)), ..Default::default() },
            liquidity: Some(Liquidity { usd: Some(dec!(21400000)), ..Default::default() }),
            fdv: Some(dec!(114000000000)),
            market_cap: Some(dec!(95000000000)),
            pair_created_at: Some(1_672_531_200_000),
        },
        Pair {
            chain_id: "solana".into(),
            dex_id: "raydium".into(),
            url: "https://dexscreener.com/solana/bonk".into(),
            pair_address: "BonkPairAddress1111111111111111111111111111".into(),
            base_token: TokenInfo::new("DezXAZ8z7PnrnRJjz3wXBoRgixCa6xjnB7YaB1pPB263", "Bonk", "Bonk"),
            quote_token: sol_quote(),
            price_usd: Some("0.00002143".into()),
            volume: PairWindows { h24: Some(dec!(1523456.78)), ..Default::default() },
            price_change: PairWindows { h24: Some(dec!(-3.21)), ..Default::default() },
            liquidity: Some(Liquidity { usd: Some(dec!(2500000)), ..Default::default() }),
            fdv: Some(dec!(1650000000)),
            market_cap: Some(dec!(1500000000)),
            pair_created_at: Some(1_672_700_000_000),
        },
        Pair {
            chain_id: "solana".into(),
            dex_id: "pumpswap".into(),
            url: "https://dexscreener.com/solana/luneshark".into(),
            pair_address: "LunesharkPair111111111111111111111111111111".into(),
            base_token: TokenInfo::new("676YgDtdAekpjYwNvLSLFPkBooVxBqJVpgxxoHJPpump", "Luneshark", "LUNESHARK"),
            quote_token: sol_quote(),
            price_usd: Some("0.0004127".into()),
            volume: PairWindows { h24: Some(dec!(84210.5)), ..Default::default() },
            price_change: PairWindows { h24: Some(dec!(12.5)), ..Default::default() },
            liquidity: Some(Liquidity { usd: Some(dec!(61300)), ..Default::default() }),
            fdv: Some(dec!(412700)),
            market_cap: Some(dec!(412700)),
            pair_created_at: None,
        },
    ]
}
