//! Domain Models
//!
//! Data types shared by the extraction, market-data and reply stages.
//! Market figures use `rust_decimal` so formatting never shows float noise.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Reply tone, selected by the front-end's `isNiceMode` toggle
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Persona {
    /// Friendly, emoji-sprinkled assistant
    Nice,
    /// Blunt crypto OG
    Crude,
}

impl Persona {
    pub const fn from_nice_mode(is_nice_mode: bool) -> Self {
        if is_nice_mode { Self::Nice } else { Self::Crude }
    }

    pub const fn is_nice(self) -> bool {
        matches!(self, Self::Nice)
    }
}

impl From<bool> for Persona {
    fn from(is_nice_mode: bool) -> Self {
        Self::from_nice_mode(is_nice_mode)
    }
}

impl std::fmt::Display for Persona {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Nice => write!(f, "nice"),
            Self::Crude => write!(f, "crude"),
        }
    }
}

/// Token reference pulled out of a chat message by the model.
///
/// Every field must be present and a string; an entity with all three
/// fields empty means nothing was mentioned.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedEntity {
    /// Contract / mint address
    pub token: String,

    /// Ticker (e.g., "SOL")
    pub symbol: String,

    /// Full name (e.g., "Solana")
    pub name: String,
}

impl ExtractedEntity {
    pub fn new(
        token: impl Into<String>,
        symbol: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            token: token.into(),
            symbol: symbol.into(),
            name: name.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.token.is_empty() && self.symbol.is_empty() && self.name.is_empty()
    }

    /// Market search term: address first, then ticker, then name
    pub fn search_query(&self) -> Option<&str> {
        [&self.token, &self.symbol, &self.name]
            .into_iter()
            .find(|field| !field.is_empty())
            .map(String::as_str)
    }
}

impl std::fmt::Display for ExtractedEntity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "token={:?} symbol={:?} name={:?}",
            self.token, self.symbol, self.name
        )
    }
}

/// Token on one side of a trading pair
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenInfo {
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub symbol: String,
}

impl TokenInfo {
    pub fn new(address: impl Into<String>, name: impl Into<String>, symbol: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            name: name.into(),
            symbol: symbol.into(),
        }
    }
}

/// A metric reported over the aggregator's rolling windows
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairWindows {
    #[serde(default)]
    pub h24: Option<Decimal>,
    #[serde(default)]
    pub h6: Option<Decimal>,
    #[serde(default)]
    pub h1: Option<Decimal>,
    #[serde(default)]
    pub m5: Option<Decimal>,
}

/// Pool liquidity
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Liquidity {
    #[serde(default)]
    pub usd: Option<Decimal>,
    #[serde(default)]
    pub base: Option<Decimal>,
    #[serde(default)]
    pub quote: Option<Decimal>,
}

/// DEX trading pair as returned by the market search API
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pair {
    #[serde(default)]
    pub chain_id: String,
    #[serde(default)]
    pub dex_id: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub pair_address: String,
    #[serde(default)]
    pub base_token: TokenInfo,
    #[serde(default)]
    pub quote_token: TokenInfo,
    /// Quoted as a string by the API to keep full precision
    #[serde(default)]
    pub price_usd: Option<String>,
    #[serde(default)]
    pub volume: PairWindows,
    #[serde(default)]
    pub price_change: PairWindows,
    #[serde(default)]
    pub liquidity: Option<Liquidity>,
    #[serde(default)]
    pub fdv: Option<Decimal>,
    #[serde(default)]
    pub market_cap: Option<Decimal>,
    /// Unix millis
    #[serde(default)]
    pub pair_created_at: Option<i64>,
}
