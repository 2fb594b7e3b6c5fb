//! Error Types for the bot pipeline

use thiserror::Error;

use panel_core::PanelError;

pub type Result<T> = std::result::Result<T, BotError>;

#[derive(Error, Debug)]
pub enum BotError {
    #[error("Market data error: {0}")]
    Market(String),

    #[error("Market data source returned HTTP {0}")]
    MarketStatus(u16),

    #[error("Malformed extraction reply: {0}")]
    MalformedExtraction(String),

    #[error(transparent)]
    Provider(#[from] PanelError),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
