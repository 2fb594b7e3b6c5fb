//! # luneshark-bot
//!
//! LunesharkBot, the chat assistant behind the Holder Panel.
//!
//! ## Pipeline
//!
//! ```text
//! ┌──────────────┐   ┌────────────────┐   ┌──────────────┐   ┌──────────────┐
//! │ EntityExtrac │──►│ SessionCache   │──►│ MarketData   │──►│ PersonaPrompt│──► model
//! │ (model call) │   │ (last entity)  │   │ (DexScreener)│   │ nice / crude │
//! └──────────────┘   └────────────────┘   └──────────────┘   └──────────────┘
//!         no API key, or the reply call fails ──────────────────────► responder
//! ```
//!
//! Only the final reply call can force the canned [`responder`]; every other
//! stage degrades to "no live data".

pub mod error;
pub mod model;
pub mod snapshot;
pub mod market;
pub mod extractor;
pub mod responder;
pub mod prompt;
pub mod orchestrator;

pub use error::{BotError, Result};
pub use model::{ExtractedEntity, Pair, Persona};
pub use snapshot::MarketSnapshot;
pub use market::{DexScreenerClient, DexScreenerConfig, MarketDataClient, MarketDataFetcher, MockMarketClient};
pub use extractor::EntityExtractor;
pub use prompt::PersonaPrompt;
pub use orchestrator::{ChatOrchestrator, ChatTurn, EntityResolution};
