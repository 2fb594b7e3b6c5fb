//! panel-server
//!
//! HTTP surface for LunesharkBot: `POST /api/chat` and `GET /health`.

pub mod config;
pub mod handlers;
pub mod state;

use axum::{routing::{get, post}, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub use config::ServerConfig;
pub use handlers::{ChatReply, ChatRequest, HealthResponse, PayloadError};
pub use state::AppState;

/// Build the router with CORS and request tracing
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/api/chat", post(handlers::chat_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
