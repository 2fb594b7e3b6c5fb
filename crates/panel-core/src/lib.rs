//! # panel-core
//!
//! Core building blocks for the holder panel chat backend: a provider-agnostic
//! LLM abstraction, the chat message model, and session-scoped state.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Conversation pipeline                    │
//! │  ┌─────────────┐  ┌──────────────┐  ┌────────────────────┐  │
//! │  │Conversation │  │ SessionCache │  │   LlmProvider      │  │
//! │  │  (history)  │──│ (per session)│──│   (Strategy)       │  │
//! │  └─────────────┘  └──────────────┘  └────────────────────┘  │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! The `LlmProvider` trait lets the pipeline run against any OpenAI-compatible
//! backend, or against a scripted provider in tests.

pub mod provider;
pub mod message;
pub mod error;
pub mod session;

pub use error::{PanelError, Result};
pub use message::{Conversation, ConversationMessage, Message, Role};
pub use provider::{Completion, GenerationOptions, LlmProvider};
pub use session::{SessionCache, SessionId};
