//! Entity Extractor
//!
//! Asks the model which token, if any, a chat message is about. The model is
//! prompted for a bare JSON object; anything else counts as "not found".

use std::sync::Arc;

use panel_core::{GenerationOptions, LlmProvider, Message, PanelError};

use crate::error::{BotError, Result};
use crate::model::ExtractedEntity;

/// Few-shot instructions for the extraction call
pub const EXTRACTION_PROMPT: &str = concat!(
    "You are an assistant that extracts cryptocurrency information from user input. ",
    "Analyze the message and identify if the user is asking about a specific cryptocurrency token, coin, or project. ",
    "Return a JSON object in the following format:\n\n",
    "{\n  \"token\": \"contract_address_if_mentioned\",\n  \"symbol\": \"token_symbol_like_BTC_ETH_SOL\",\n  \"name\": \"full_token_name_like_Bitcoin_Ethereum\"\n}\n\n",
    "Examples:\n",
    "- 'What's the price of Bitcoin?' → {\"token\": \"\", \"symbol\": \"BTC\", \"name\": \"Bitcoin\"}\n",
    "- 'Tell me about LUNESHARK token' → {\"token\": \"\", \"symbol\": \"LUNESHARK\", \"name\": \"Luneshark\"}\n",
    "- 'How is Solana doing?' → {\"token\": \"\", \"symbol\": \"SOL\", \"name\": \"Solana\"}\n",
    "- 'Price of tokenAddress(FYI-this is a placeholder for a sample tokens like 676YgDtdAekpjYwNvLSLFPkBooVxBqJVpgxxoHJPpump, So11111111111111111111111111111111111111112, GWPLjamb5ZxrGbTsYNWW7V3p1pAMryZSfaPFTdaEsWgC) token?' → {\"token\": \"passed_token_address\", \"symbol\": \"SOL\", \"name\": \"Solana\"}\n",
    "- 'Hello there' → {\"token\": \"\", \"symbol\": \"\", \"name\": \"\"}\n\n",
    "Only return a valid JSON object. If no cryptocurrency is mentioned, return empty strings for all fields. ",
    "Do not include any other text or explanation.",
);

const EXTRACTION_MAX_TOKENS: u32 = 150;
const EXTRACTION_TEMPERATURE: f32 = 0.1;

/// Pulls a structured token reference out of free text
#[derive(Clone)]
pub struct EntityExtractor {
    provider: Arc<dyn LlmProvider>,
    options: GenerationOptions,
}

impl EntityExtractor {
    pub fn new(provider: Arc<dyn LlmProvider>, model: impl Into<String>) -> Self {
        Self {
            provider,
            options: GenerationOptions {
                model: model.into(),
                temperature: EXTRACTION_TEMPERATURE,
                max_tokens: EXTRACTION_MAX_TOKENS,
                presence_penalty: None,
                frequency_penalty: None,
            },
        }
    }

    pub const fn options(&self) -> &GenerationOptions {
        &self.options
    }

    /// `Ok(None)` when the model says no token was mentioned
    pub async fn extract(&self, text: &str) -> Result<Option<ExtractedEntity>> {
        tracing::debug!("Extracting crypto details from message: {}", text);

        let messages = [Message::system(EXTRACTION_PROMPT), Message::user(text)];
        let completion = self.provider.complete(&messages, &self.options).await?;

        let reply = completion.content.trim();
        if reply.is_empty() {
            return Err(PanelError::EmptyResponse("entity extraction".into()).into());
        }

        let entity = parse_entity(reply)?;
        if entity.is_empty() {
            return Ok(None);
        }

        tracing::info!("Extracted crypto details: {}", entity);
        Ok(Some(entity))
    }

    /// Like [`extract`](Self::extract), with every failure read as "not found"
    pub async fn find(&self, text: &str) -> Option<ExtractedEntity> {
        match self.extract(text).await {
            Ok(Some(entity)) => Some(entity),
            Ok(None) => {
                tracing::info!("No crypto details found in message");
                None
            }
            Err(e) => {
                tracing::warn!("Crypto extraction failed: {}", e);
                None
            }
        }
    }
}

/// Strict decode of the model's reply: one JSON object with three string fields
pub fn parse_entity(reply: &str) -> Result<ExtractedEntity> {
    serde_json::from_str(reply.trim())
        .map_err(|e| BotError::MalformedExtraction(format!("{e}: {reply}")))
}
