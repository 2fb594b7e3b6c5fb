//! Market Snapshot
//!
//! Turns the top trading pair into the fixed text block that is spliced into
//! the system prompt as live market context.

use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use crate::model::Pair;

const MISSING: &str = "N/A";

/// Point-in-time market figures for one token
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MarketSnapshot {
    pub name: String,
    pub symbol: String,
    pub price_usd: Option<String>,
    pub change_24h: Option<Decimal>,
    pub market_cap: Option<Decimal>,
    pub volume_24h: Option<Decimal>,
    pub liquidity_usd: Option<Decimal>,
    pub dex_id: String,
    pub contract: String,
    pub pair_url: String,
    pub fetched_at: DateTime<Utc>,
}

impl MarketSnapshot {
    pub fn from_pair(pair: &Pair) -> Self {
        Self {
            name: pair.base_token.name.clone(),
            symbol: pair.base_token.symbol.clone(),
            price_usd: pair.price_usd.clone(),
            change_24h: pair.price_change.h24,
            market_cap: pair.market_cap,
            volume_24h: pair.volume.h24,
            liquidity_usd: pair.liquidity.as_ref().and_then(|l| l.usd),
            dex_id: pair.dex_id.clone(),
            contract: pair.base_token.address.clone(),
            pair_url: pair.url.clone(),
            fetched_at: Utc::now(),
        }
    }

    /// The prompt context block
    pub fn render(&self) -> String {
        let price = match self.price_usd.as_deref().map(str::trim) {
            Some(price) if !price.is_empty() => format!("${price}"),
            _ => MISSING.to_string(),
        };

        format!(
            "Current crypto data for {} ({}):\n\
             - Price: {}\n\
             - 24h Change: {}\n\
             - Market Cap: {}\n\
             - 24h Volume: {}\n\
             - Liquidity: {}\n\
             - DEX: {}\n\
             - Contract: {}\n",
            self.name,
            self.symbol,
            price,
            format_change(self.change_24h),
            format_usd(self.market_cap),
            format_usd(self.volume_24h),
            format_usd(self.liquidity_usd),
            self.dex_id,
            self.contract,
        )
    }
}

impl std::fmt::Display for MarketSnapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.render())
    }
}

/// Rendered block, or an empty string when there is no snapshot
pub fn context_block(snapshot: Option<&MarketSnapshot>) -> String {
    snapshot.map(MarketSnapshot::render).unwrap_or_default()
}

// Zero is reported as missing: the aggregator sends 0 for unknown figures.
fn present(value: Option<Decimal>) -> Option<Decimal> {
    value.filter(|v| !v.is_zero())
}

/// Signed percentage with two decimals, e.g. `+4.20%`
pub fn format_change(value: Option<Decimal>) -> String {
    present(value).map_or_else(
        || MISSING.to_string(),
        |v| {
            // Sign comes from the raw value, so -0.001 still reads -0.00%
            let magnitude = v.abs().round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
            let sign = if v.is_sign_negative() { "-" } else { "+" };
            format!("{sign}{magnitude:.2}%")
        },
    )
}

/// Dollar amount with thousands separators
pub fn format_usd(value: Option<Decimal>) -> String {
    present(value).map_or_else(|| MISSING.to_string(), |v| format!("${}", group_thousands(v)))
}

/// `1234567.891` -> `1,234,567.891`; at most three fraction digits
pub fn group_thousands(value: Decimal) -> String {
    let rounded = value
        .round_dp_with_strategy(3, RoundingStrategy::MidpointAwayFromZero)
        .normalize();
    let digits = rounded.abs().to_string();
    let (int_part, frac_part) = match digits.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (digits.as_str(), None),
    };

    let mut out = String::with_capacity(digits.len() + int_part.len() / 3 + 1);
    if rounded.is_sign_negative() && !rounded.is_zero() {
        out.push('-');
    }
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if let Some(frac_part) = frac_part {
        out.push('.');
        out.push_str(frac_part);
    }
    out
}
