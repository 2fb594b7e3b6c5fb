//! Router-level tests for the chat API.
//!
//! Every test builds its own state with the mock market source. Most run
//! without an LLM provider, so replies come from the canned responder.

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use tower::ServiceExt;

use luneshark_bot::responder::{Topic, base_pool};
use luneshark_bot::{ChatOrchestrator, MarketDataFetcher, MockMarketClient, Persona};
use panel_core::{Completion, GenerationOptions, LlmProvider, Message};
use panel_server::handlers::GENERIC_ERROR_REPLY;
use panel_server::{create_router, AppState, ChatReply, HealthResponse};

// =============================================================================
// Helpers
// =============================================================================

/// Answers every call with the same text
struct FixedProvider(&'static str);

#[async_trait]
impl LlmProvider for FixedProvider {
    fn name(&self) -> &str {
        "fixed"
    }

    async fn health_check(&self) -> panel_core::Result<bool> {
        Ok(true)
    }

    async fn complete(
        &self,
        _: &[Message],
        options: &GenerationOptions,
    ) -> panel_core::Result<Completion> {
        Ok(Completion::text(self.0, &options.model))
    }
}

fn make_app() -> axum::Router {
    let market = MarketDataFetcher::new(Arc::new(MockMarketClient::new()));
    let orchestrator = ChatOrchestrator::new(None, "gpt-3.5-turbo", market);
    create_router(AppState::new(orchestrator))
}

fn post_chat(body: &str) -> Request<Body> {
    Request::post("/api/chat")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn chat(body: &str) -> (StatusCode, ChatReply) {
    let resp = make_app().oneshot(post_chat(body)).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

// =============================================================================
// /api/chat
// =============================================================================

#[tokio::test]
async fn test_crude_token_question_without_key() {
    let (status, reply) =
        chat(r#"{"message": "Tell me about Luneshark token", "isNiceMode": false}"#).await;

    assert_eq!(status, StatusCode::OK);
    assert!(base_pool(Topic::Token, Persona::Crude).contains(&reply.message.as_str()));
}

#[tokio::test]
async fn test_nice_general_question_without_key() {
    let (status, reply) = chat(
        r#"{"message": "hello there", "isNiceMode": true, "conversationHistory": [], "sessionId": "abc"}"#,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(base_pool(Topic::General, Persona::Nice).contains(&reply.message.as_str()));
}

#[tokio::test]
async fn test_string_mode_flag_is_generic_error() {
    let (status, reply) = chat(r#"{"message": "hi", "isNiceMode": "true"}"#).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(reply.message, GENERIC_ERROR_REPLY);
}

#[tokio::test]
async fn test_non_json_body_is_generic_error() {
    let (status, reply) = chat("message=hi").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(reply.message, GENERIC_ERROR_REPLY);
}

#[tokio::test]
async fn test_malformed_history_gets_canned_reply() {
    let (status, reply) = chat(
        r#"{"message": "what tools do you have", "isNiceMode": true, "conversationHistory": [{"content": 1}]}"#,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(base_pool(Topic::Tools, Persona::Nice).contains(&reply.message.as_str()));
}

#[tokio::test]
async fn test_oversized_body_is_generic_error() {
    let padding = "x".repeat(3 * 1024 * 1024);
    let body = format!(r#"{{"message": "{padding}", "isNiceMode": true}}"#);
    let (status, reply) = chat(&body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(reply.message, GENERIC_ERROR_REPLY);
}

#[tokio::test]
async fn test_numeric_history_ids_still_reach_model() {
    let market = MarketDataFetcher::new(Arc::new(MockMarketClient::new()));
    let provider: Arc<dyn LlmProvider> = Arc::new(FixedProvider("model says gm"));
    let app = create_router(AppState::new(ChatOrchestrator::new(Some(provider), "gpt-3.5-turbo", market)));

    let resp = app
        .oneshot(post_chat(
            r#"{"message": "gm", "isNiceMode": false,
                "conversationHistory": [{"id": 1715000000000, "content": "gm", "isUser": true, "timestamp": 1715000000000}]}"#,
        ))
        .await
        .unwrap();
    let bytes = axum::body::to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
    let reply: ChatReply = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(reply.message, "model says gm");
}

// =============================================================================
// /health
// =============================================================================

#[tokio::test]
async fn test_health_without_key() {
    let resp = make_app()
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
    let health: HealthResponse = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(health.status, "healthy");
    assert!(!health.llm_configured);
    assert!(!health.llm_reachable);
    assert_eq!(health.market_source, "MockMarket");
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let resp = make_app()
        .oneshot(Request::get("/api/nope").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
