//! Conversation Orchestrator
//!
//! Runs one chat turn:
//!
//! ```text
//! no model configured ──────────────────────────────────────► static reply
//! extract entity ─► resolve (session cache) ─► market data ─► prompt ─► model
//!                                                                   │
//!                                           model call fails ───────┴─► static reply
//! ```
//!
//! Extraction and market-data failures only drop the live context; a failed
//! reply call falls back to the static responder. The caller always gets text.

use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;

use panel_core::{ConversationMessage, LlmProvider, SessionCache, SessionId};

use crate::error::Result;
use crate::extractor::EntityExtractor;
use crate::market::MarketDataFetcher;
use crate::model::{ExtractedEntity, Persona};
use crate::prompt;
use crate::responder;

/// Sent when the model answers with no content
pub const EMPTY_COMPLETION_REPLY: &str = "Sorry, I couldn't process that request.";

static MARKET_QUESTION: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"(?i)(price|market cap|volume|liquidity|change)").ok());

/// Whether a message asks about market figures
pub fn mentions_market_data(message: &str) -> bool {
    MARKET_QUESTION
        .as_ref()
        .is_some_and(|pattern| pattern.is_match(message))
}

/// One validated inbound chat turn
#[derive(Clone, Debug)]
pub struct ChatTurn {
    pub session: SessionId,
    pub message: String,
    pub persona: Persona,
    pub history: Vec<ConversationMessage>,
}

impl ChatTurn {
    pub fn new(message: impl Into<String>, persona: Persona) -> Self {
        Self {
            session: SessionId::anonymous(),
            message: message.into(),
            persona,
            history: Vec::new(),
        }
    }

    pub fn with_session(mut self, session: SessionId) -> Self {
        self.session = session;
        self
    }

    pub fn with_history(mut self, history: Vec<ConversationMessage>) -> Self {
        self.history = history;
        self
    }
}

/// Outcome of the entity resolution step
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EntityResolution {
    /// Found in the current message; the session cache now holds it
    Extracted(ExtractedEntity),
    /// Nothing in the message, but it asks about market figures and the
    /// session had a previous entity
    Reused(ExtractedEntity),
    /// No market lookup for this turn
    None,
}

impl EntityResolution {
    pub const fn entity(&self) -> Option<&ExtractedEntity> {
        match self {
            Self::Extracted(entity) | Self::Reused(entity) => Some(entity),
            Self::None => None,
        }
    }
}

/// Model-backed half of the pipeline
#[derive(Clone)]
struct ModelStage {
    provider: Arc<dyn LlmProvider>,
    extractor: EntityExtractor,
    model: String,
}

/// Drives a chat turn from validated input to reply text
#[derive(Clone)]
pub struct ChatOrchestrator {
    model: Option<ModelStage>,
    market: MarketDataFetcher,
    entities: Arc<SessionCache<ExtractedEntity>>,
}

impl ChatOrchestrator {
    /// `provider` is `None` when no API key is configured
    pub fn new(
        provider: Option<Arc<dyn LlmProvider>>,
        model: impl Into<String>,
        market: MarketDataFetcher,
    ) -> Self {
        let model = model.into();
        let stage = provider.map(|provider| ModelStage {
            extractor: EntityExtractor::new(provider.clone(), model.clone()),
            provider,
            model,
        });

        Self {
            model: stage,
            market,
            entities: Arc::new(SessionCache::new()),
        }
    }

    /// Share an entity cache with other orchestrators
    pub fn with_entity_cache(mut self, entities: Arc<SessionCache<ExtractedEntity>>) -> Self {
        self.entities = entities;
        self
    }

    pub const fn is_model_enabled(&self) -> bool {
        self.model.is_some()
    }

    pub fn provider(&self) -> Option<&Arc<dyn LlmProvider>> {
        self.model.as_ref().map(|stage| &stage.provider)
    }

    pub const fn market(&self) -> &MarketDataFetcher {
        &self.market
    }

    pub const fn entity_cache(&self) -> &Arc<SessionCache<ExtractedEntity>> {
        &self.entities
    }

    /// Canned reply path
    pub fn fallback(message: &str, persona: Persona) -> String {
        responder::reply(message, persona)
    }

    /// Produce the reply for one turn. Never fails.
    pub async fn respond(&self, turn: &ChatTurn) -> String {
        let Some(stage) = &self.model else {
            tracing::info!("No OpenAI API key found, using fallback responses");
            return Self::fallback(&turn.message, turn.persona);
        };

        match self.converse(stage, turn).await {
            Ok(reply) => reply,
            Err(e) => {
                tracing::error!("Chat pipeline error, using fallback response: {}", e);
                Self::fallback(&turn.message, turn.persona)
            }
        }
    }

    async fn converse(&self, stage: &ModelStage, turn: &ChatTurn) -> Result<String> {
        let resolution = self.resolve_entity(&stage.extractor, turn).await;

        let snapshot = match resolution.entity() {
            Some(entity) => self.market.snapshot_or_none(entity).await,
            None => {
                tracing::info!("No valid crypto details extracted from message");
                None
            }
        };

        let conversation =
            prompt::build_conversation(turn.persona, snapshot.as_ref(), &turn.history, &turn.message);
        let options = prompt::generation_options(turn.persona, &stage.model);

        tracing::info!(
            messages = conversation.len(),
            live_data = snapshot.is_some(),
            "Sending request to {}",
            stage.provider.name()
        );
        let completion = stage.provider.complete(conversation.messages(), &options).await?;

        if completion.content.trim().is_empty() {
            tracing::warn!("Model returned no content");
            return Ok(EMPTY_COMPLETION_REPLY.to_string());
        }

        tracing::info!("Model response received successfully");
        Ok(completion.content)
    }

    /// Current entity, else the session's last one for market follow-ups
    pub async fn resolve_entity(&self, extractor: &EntityExtractor, turn: &ChatTurn) -> EntityResolution {
        if let Some(entity) = extractor.find(&turn.message).await {
            self.entities.put(&turn.session, entity.clone()).await;
            return EntityResolution::Extracted(entity);
        }

        if mentions_market_data(&turn.message) {
            if let Some(previous) = self.entities.get(&turn.session).await {
                tracing::info!(session = %turn.session, "Using last crypto details: {}", previous);
                return EntityResolution::Reused(previous);
            }
        }

        EntityResolution::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use panel_core::{Completion, GenerationOptions, Message, PanelError, Role};

    use crate::market::MockMarketClient;
    use crate::responder::{Topic, base_pool};

    /// Plays back canned completions and records what it was sent
    #[derive(Default)]
    struct ScriptedProvider {
        replies: Mutex<VecDeque<panel_core::Result<String>>>,
        calls: Mutex<Vec<Vec<Message>>>,
    }

    impl ScriptedProvider {
        fn new(replies: Vec<panel_core::Result<String>>) -> Arc<Self> {
            Arc::new(Self {
                replies: Mutex::new(replies.into()),
                calls: Mutex::default(),
            })
        }

        fn calls(&self) -> Vec<Vec<Message>> {
            self.calls.lock().unwrap().clone()
        }

        /// System prompts of the reply calls (extraction calls skipped)
        fn reply_prompts(&self) -> Vec<String> {
            self.calls()
                .into_iter()
                .filter(|msgs| msgs[0].content != crate::extractor::EXTRACTION_PROMPT)
                .map(|msgs| msgs[0].content.clone())
                .collect()
        }
    }

    #[async_trait]
    impl LlmProvider for ScriptedProvider {
        fn name(&self) -> &str {
            "scripted"
        }

        async fn health_check(&self) -> panel_core::Result<bool> {
            Ok(true)
        }

        async fn complete(
            &self,
            messages: &[Message],
            options: &GenerationOptions,
        ) -> panel_core::Result<Completion> {
            self.calls.lock().unwrap().push(messages.to_vec());
            let next = self
                .replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(PanelError::ProviderUnavailable("script exhausted".into())));
            next.map(|content| Completion::text(content, &options.model))
        }
    }

    fn ok(text: &str) -> panel_core::Result<String> {
        Ok(text.to_string())
    }

    fn http_500() -> panel_core::Result<String> {
        Err(PanelError::Http { status: 500, body: "boom".into() })
    }

    const NOTHING: &str = r#"{"token": "", "symbol": "", "name": ""}"#;
    const BONK: &str = r#"{"token": "", "symbol": "BONK", "name": "Bonk"}"#;

    fn orchestrator(
        provider: Option<Arc<ScriptedProvider>>,
        market: Arc<MockMarketClient>,
    ) -> ChatOrchestrator {
        let provider = provider.map(|p| p as Arc<dyn LlmProvider>);
        ChatOrchestrator::new(provider, "gpt-3.5-turbo", MarketDataFetcher::new(market))
    }

    #[test]
    fn test_market_question_pattern() {
        assert!(mentions_market_data("what's the PRICE now?"));
        assert!(mentions_market_data("Market Cap?"));
        assert!(mentions_market_data("how much liquidity"));
        assert!(!mentions_market_data("tell me a joke"));
    }

    #[tokio::test]
    async fn test_no_provider_uses_static_replies() {
        let market = Arc::new(MockMarketClient::new());
        let bot = orchestrator(None, market.clone());

        let reply = bot
            .respond(&ChatTurn::new("Tell me about Luneshark token", Persona::Crude))
            .await;

        assert!(!bot.is_model_enabled());
        assert!(base_pool(Topic::Token, Persona::Crude).contains(&reply.as_str()));
        assert!(market.queries().await.is_empty());
    }

    #[tokio::test]
    async fn test_follow_up_reuses_last_entity() {
        let provider = ScriptedProvider::new(vec![ok(BONK), ok("Bonk is bonking."), ok(NOTHING), ok("Still bonking.")]);
        let market = Arc::new(MockMarketClient::new());
        let bot = orchestrator(Some(provider.clone()), market.clone());
        let session = SessionId::from_string("visitor-1");

        let first = bot
            .respond(&ChatTurn::new("What about bonk?", Persona::Nice).with_session(session.clone()))
            .await;
        let second = bot
            .respond(&ChatTurn::new("and what's the price now?", Persona::Nice).with_session(session.clone()))
            .await;

        assert_eq!(first, "Bonk is bonking.");
        assert_eq!(second, "Still bonking.");
        assert_eq!(market.queries().await, vec!["BONK".to_string(), "BONK".to_string()]);

        let prompts = provider.reply_prompts();
        assert_eq!(prompts.len(), 2);
        assert!(prompts.iter().all(|p| p.contains("LIVE CRYPTO DATA:")));
        assert_eq!(
            bot.entity_cache().get(&session).await,
            Some(ExtractedEntity::new("", "BONK", "Bonk"))
        );
    }

    #[tokio::test]
    async fn test_follow_up_without_market_keyword_skips_lookup() {
        let provider = ScriptedProvider::new(vec![ok(BONK), ok("one"), ok(NOTHING), ok("two")]);
        let market = Arc::new(MockMarketClient::new());
        let bot = orchestrator(Some(provider.clone()), market.clone());

        bot.respond(&ChatTurn::new("What about bonk?", Persona::Crude)).await;
        bot.respond(&ChatTurn::new("tell me a joke", Persona::Crude)).await;

        assert_eq!(market.queries().await.len(), 1);
        assert!(!provider.reply_prompts()[1].contains("LIVE"));
    }

    #[tokio::test]
    async fn test_cached_entity_is_per_session() {
        let provider = ScriptedProvider::new(vec![ok(BONK), ok("one"), ok(NOTHING), ok("two")]);
        let market = Arc::new(MockMarketClient::new());
        let bot = orchestrator(Some(provider.clone()), market.clone());

        bot.respond(&ChatTurn::new("bonk?", Persona::Nice).with_session(SessionId::from_string("a")))
            .await;
        bot.respond(&ChatTurn::new("price?", Persona::Nice).with_session(SessionId::from_string("b")))
            .await;

        assert_eq!(market.queries().await, vec!["BONK".to_string()]);
    }

    #[tokio::test]
    async fn test_new_entity_overwrites_cache() {
        let sol = r#"{"token": "", "symbol": "SOL", "name": "Solana"}"#;
        let provider = ScriptedProvider::new(vec![ok(BONK), ok("one"), ok(sol), ok("two")]);
        let bot = orchestrator(Some(provider), Arc::new(MockMarketClient::new()));
        let session = SessionId::anonymous();

        bot.respond(&ChatTurn::new("bonk?", Persona::Nice)).await;
        bot.respond(&ChatTurn::new("and solana?", Persona::Nice)).await;

        assert_eq!(bot.entity_cache().get(&session).await.unwrap().symbol, "SOL");
    }

    #[tokio::test]
    async fn test_empty_market_search_has_no_live_section() {
        let provider = ScriptedProvider::new(vec![ok(BONK), ok("no data, ser")]);
        let market = Arc::new(MockMarketClient::empty());
        let bot = orchestrator(Some(provider.clone()), market.clone());

        let reply = bot.respond(&ChatTurn::new("bonk price?", Persona::Crude)).await;

        assert_eq!(reply, "no data, ser");
        assert_eq!(market.queries().await.len(), 1);
        assert!(!provider.reply_prompts()[0].contains("LIVE"));
    }

    #[tokio::test]
    async fn test_market_outage_still_answers() {
        let provider = ScriptedProvider::new(vec![ok(BONK), ok("answer without numbers")]);
        let bot = orchestrator(Some(provider.clone()), Arc::new(MockMarketClient::failing()));

        let reply = bot.respond(&ChatTurn::new("bonk price?", Persona::Nice)).await;

        assert_eq!(reply, "answer without numbers");
        assert!(!provider.reply_prompts()[0].contains("LIVE"));
    }

    #[tokio::test]
    async fn test_extraction_failure_continues_without_entity() {
        let provider = ScriptedProvider::new(vec![http_500(), ok("gm")]);
        let market = Arc::new(MockMarketClient::new());
        let bot = orchestrator(Some(provider), market.clone());

        let reply = bot.respond(&ChatTurn::new("gm", Persona::Nice)).await;

        assert_eq!(reply, "gm");
        assert!(market.queries().await.is_empty());
    }

    #[tokio::test]
    async fn test_completion_failure_falls_back() {
        let provider = ScriptedProvider::new(vec![ok(NOTHING), http_500()]);
        let bot = orchestrator(Some(provider), Arc::new(MockMarketClient::new()));

        let reply = bot.respond(&ChatTurn::new("hello there", Persona::Nice)).await;

        assert!(base_pool(Topic::General, Persona::Nice).contains(&reply.as_str()));
    }

    #[tokio::test]
    async fn test_reply_text_is_passed_through_verbatim() {
        let provider = ScriptedProvider::new(vec![ok(NOTHING), ok("\n  gm ser 🦈\n")]);
        let bot = orchestrator(Some(provider), Arc::new(MockMarketClient::new()));

        let reply = bot.respond(&ChatTurn::new("gm", Persona::Nice)).await;

        assert_eq!(reply, "\n  gm ser 🦈\n");
    }

    #[tokio::test]
    async fn test_empty_completion_gets_apology() {
        let provider = ScriptedProvider::new(vec![ok(NOTHING), ok("  ")]);
        let bot = orchestrator(Some(provider), Arc::new(MockMarketClient::new()));

        let reply = bot.respond(&ChatTurn::new("hello there", Persona::Nice)).await;

        assert_eq!(reply, EMPTY_COMPLETION_REPLY);
    }

    #[tokio::test]
    async fn test_reply_call_carries_history_and_options() {
        let provider = ScriptedProvider::new(vec![ok(NOTHING), ok("ok")]);
        let bot = orchestrator(Some(provider.clone()), Arc::new(MockMarketClient::new()));
        let history: Vec<_> = (0..15)
            .map(|i| ConversationMessage::new(format!("h{i}"), i % 2 == 1))
            .collect();

        bot.respond(&ChatTurn::new("current", Persona::Crude).with_history(history)).await;

        let calls = provider.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0][1], Message::user("current"));

        let reply_call = &calls[1];
        assert_eq!(reply_call.len(), 12);
        assert!(reply_call[0].content.contains("CRUDE MODE"));
        assert_eq!(reply_call[1].content, "h5");
        assert_eq!(reply_call[1].role, Role::User);
        assert_eq!(reply_call[11], Message::user("current"));
    }
}
