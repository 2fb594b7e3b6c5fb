//! # panel-runtime
//!
//! Runtime providers for the holder panel chat backend.
//!
//! ## Providers
//!
//! - **OpenAI** (default): any endpoint speaking the OpenAI chat-completions API
//!
//! ## Usage
//!
//! ```rust,ignore
//! use panel_runtime::OpenAiProvider;
//!
//! // `None` when OPENAI_API_KEY is unset: the bot answers from canned replies
//! let provider = OpenAiProvider::from_env();
//! ```

#[cfg(feature = "openai")]
pub mod openai;

#[cfg(feature = "openai")]
pub use openai::{OpenAiConfig, OpenAiProvider};

// Re-export core types for convenience
pub use panel_core::{
    Completion, GenerationOptions, LlmProvider, Message, PanelError, Result, Role,
};
