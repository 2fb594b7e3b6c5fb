//! Error Types

use thiserror::Error;

/// Result type alias for provider operations
pub type Result<T> = std::result::Result<T, PanelError>;

/// Core error types
#[derive(Error, Debug)]
pub enum PanelError {
    /// LLM provider error (transport, decoding)
    #[error("Provider error: {0}")]
    Provider(String),

    /// Provider unavailable or not responding
    #[error("Provider unavailable: {0}")]
    ProviderUnavailable(String),

    /// Upstream answered with a non-success status
    #[error("Upstream returned HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// Upstream answered successfully but without usable content
    #[error("Empty response from {0}")]
    EmptyResponse(String),
}
