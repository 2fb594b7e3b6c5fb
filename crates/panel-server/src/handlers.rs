//! HTTP Handlers

use axum::{body::Bytes, extract::{rejection::BytesRejection, State}, Json};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::Instrument;

use luneshark_bot::{ChatOrchestrator, ChatTurn, Persona};
use panel_core::{ConversationMessage, SessionId};

use crate::state::AppState;

/// Reply text when the request cannot be read at all
pub const GENERIC_ERROR_REPLY: &str = "Error processing request.";

// ============================================================================
// Request / Response Types
// ============================================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub llm_configured: bool,
    pub llm_reachable: bool,
    pub market_source: String,
}

/// Validated `POST /api/chat` body
#[derive(Clone, Debug)]
pub struct ChatRequest {
    pub message: String,
    pub is_nice_mode: bool,
    pub conversation_history: Vec<ConversationMessage>,
    pub session_id: Option<String>,
}

impl ChatRequest {
    pub fn into_turn(self) -> ChatTurn {
        ChatTurn::new(self.message, Persona::from_nice_mode(self.is_nice_mode))
            .with_session(SessionId::from_client(self.session_id.as_deref()))
            .with_history(self.conversation_history)
    }
}

/// Every chat response has this shape, errors included
#[derive(Debug, Serialize, Deserialize)]
pub struct ChatReply {
    pub message: String,
}

impl ChatReply {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

#[derive(Debug, Error)]
pub enum PayloadError {
    #[error("Request body is not JSON: {0}")]
    NotJson(#[from] serde_json::Error),

    #[error("Field `{0}` is missing or has the wrong type")]
    InvalidField(&'static str),

    /// `message` and `isNiceMode` were readable, so a canned reply is possible
    #[error("Conversation history is malformed: {reason}")]
    MalformedHistory {
        message: String,
        persona: Persona,
        reason: String,
    },
}

impl PayloadError {
    /// Reply for a request that failed validation
    pub fn reply(&self) -> String {
        match self {
            Self::MalformedHistory { message, persona, .. } => {
                ChatOrchestrator::fallback(message, *persona)
            }
            Self::NotJson(_) | Self::InvalidField(_) => GENERIC_ERROR_REPLY.to_string(),
        }
    }
}

/// Validate a raw chat body.
///
/// `conversationHistory` may be absent or null; `sessionId` is ignored unless
/// it is a string.
pub fn parse_chat_payload(body: &[u8]) -> Result<ChatRequest, PayloadError> {
    let value: Value = serde_json::from_slice(body)?;

    let message = value
        .get("message")
        .and_then(Value::as_str)
        .ok_or(PayloadError::InvalidField("message"))?
        .to_string();

    let is_nice_mode = value
        .get("isNiceMode")
        .and_then(Value::as_bool)
        .ok_or(PayloadError::InvalidField("isNiceMode"))?;

    let conversation_history = match value.get("conversationHistory") {
        None | Some(Value::Null) => Vec::new(),
        Some(history) => serde_json::from_value(history.clone()).map_err(|e| {
            PayloadError::MalformedHistory {
                message: message.clone(),
                persona: Persona::from_nice_mode(is_nice_mode),
                reason: e.to_string(),
            }
        })?,
    };

    let session_id = value
        .get("sessionId")
        .and_then(Value::as_str)
        .map(str::to_string);

    Ok(ChatRequest {
        message,
        is_nice_mode,
        conversation_history,
        session_id,
    })
}

// ============================================================================
// Handlers
// ============================================================================

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let llm_reachable = match state.provider() {
        Some(provider) => provider.health_check().await.unwrap_or(false),
        None => false,
    };

    Json(HealthResponse {
        status: "healthy".into(),
        version: env!("CARGO_PKG_VERSION").into(),
        llm_configured: state.provider().is_some(),
        llm_reachable,
        market_source: state.market().source().to_string(),
    })
}

/// Chat endpoint. Always 200; failures become reply text.
///
/// Body read failures (over the size limit, aborted upload) are answered
/// like any other unreadable request.
pub async fn chat_handler(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Json<ChatReply> {
    let request_id = uuid::Uuid::new_v4();
    let span = tracing::info_span!("chat", %request_id);

    async move {
        let body = match body {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!("Could not read chat body: {}", e);
                return Json(ChatReply::new(GENERIC_ERROR_REPLY));
            }
        };

        let request = match parse_chat_payload(&body) {
            Ok(request) => request,
            Err(e) => {
                tracing::warn!("Rejected chat payload: {}", e);
                return Json(ChatReply::new(e.reply()));
            }
        };

        let turn = request.into_turn();
        tracing::info!(
            persona = %turn.persona,
            session = %turn.session,
            history = turn.history.len(),
            "Chat request received"
        );

        Json(ChatReply::new(state.orchestrator.respond(&turn).await))
    }
    .instrument(span)
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use luneshark_bot::responder::{Topic, base_pool};

    #[test]
    fn test_parse_minimal_payload() {
        let request = parse_chat_payload(br#"{"message": "gm", "isNiceMode": true}"#).unwrap();

        assert_eq!(request.message, "gm");
        assert!(request.is_nice_mode);
        assert!(request.conversation_history.is_empty());
        assert!(request.session_id.is_none());
    }

    #[test]
    fn test_parse_full_payload() {
        let body = br#"{
            "message": "and the price?",
            "isNiceMode": false,
            "sessionId": "visitor-7",
            "conversationHistory": [
                {"id": "1", "content": "bonk?", "isUser": true, "timestamp": "2024-05-01T12:00:00.000Z"},
                {"id": "2", "content": "Bonk is a dog coin.", "isUser": false}
            ]
        }"#;
        let turn = parse_chat_payload(body).unwrap().into_turn();

        assert_eq!(turn.persona, Persona::Crude);
        assert_eq!(turn.session.as_str(), "visitor-7");
        assert_eq!(turn.history.len(), 2);
        assert!(turn.history[0].is_user);
        assert!(turn.history[0].timestamp.is_some());
    }

    #[test]
    fn test_history_ids_and_timestamps_of_any_type() {
        let body = br#"{
            "message": "and the price?",
            "isNiceMode": true,
            "conversationHistory": [
                {"id": 1715000000000, "content": "bonk?", "isUser": true, "timestamp": 1715000000000},
                {"id": "b", "content": "Bonk is a dog coin.", "isUser": false, "timestamp": null}
            ]
        }"#;
        let request = parse_chat_payload(body).unwrap();

        assert_eq!(request.conversation_history.len(), 2);
        assert_eq!(request.conversation_history[0].content, "bonk?");
    }

    #[test]
    fn test_missing_session_is_anonymous() {
        let turn = parse_chat_payload(br#"{"message": "gm", "isNiceMode": true, "sessionId": 42}"#)
            .unwrap()
            .into_turn();
        assert!(turn.session.is_anonymous());
    }

    #[test]
    fn test_wrong_types_get_generic_error() {
        let cases: [&[u8]; 4] = [
            b"not json",
            br#"{"message": 7, "isNiceMode": true}"#,
            br#"{"message": "hi", "isNiceMode": "true"}"#,
            br#"{"isNiceMode": true}"#,
        ];

        for body in cases {
            let err = parse_chat_payload(body).unwrap_err();
            assert_eq!(err.reply(), GENERIC_ERROR_REPLY);
        }
    }

    #[test]
    fn test_malformed_history_gets_canned_reply() {
        let err = parse_chat_payload(
            br#"{"message": "Tell me about Luneshark token", "isNiceMode": false, "conversationHistory": "nope"}"#,
        )
        .unwrap_err();

        assert!(matches!(err, PayloadError::MalformedHistory { persona: Persona::Crude, .. }));
        assert!(base_pool(Topic::Token, Persona::Crude).contains(&err.reply().as_str()));
    }
}
