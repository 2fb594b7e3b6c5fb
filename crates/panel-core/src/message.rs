//! Conversation Messages
//!
//! Standard message format used across the chat pipeline, plus the
//! client-supplied history records the front-end sends along with each turn.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// How many client history entries are replayed to the model
pub const HISTORY_LIMIT: usize = 10;

/// Role of a message sender
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// System prompt/instructions
    System,
    /// User input
    User,
    /// Assistant (LLM) response
    Assistant,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::System => write!(f, "system"),
            Self::User => write!(f, "user"),
            Self::Assistant => write!(f, "assistant"),
        }
    }
}

/// A single message sent to the model
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Message role
    pub role: Role,

    /// Text content
    pub content: String,
}

impl Message {
    /// Create a new message
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    /// Create a system message
    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    /// Create a user message
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    /// Create an assistant message
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }
}

/// A chat bubble as recorded by the front-end.
///
/// Trusted as-is; only `content` and `isUser` matter to the pipeline.
/// `id` and `timestamp` are carried opaquely, whatever JSON type the client
/// used for them.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationMessage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,

    pub content: String,

    pub is_user: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<Value>,
}

impl ConversationMessage {
    pub fn new(content: impl Into<String>, is_user: bool) -> Self {
        Self {
            id: Some(Value::String(uuid::Uuid::new_v4().to_string())),
            content: content.into(),
            is_user,
            timestamp: Some(Value::String(Utc::now().to_rfc3339())),
        }
    }

    /// Map the front-end flag onto a model role
    pub const fn role(&self) -> Role {
        if self.is_user { Role::User } else { Role::Assistant }
    }
}

impl From<&ConversationMessage> for Message {
    fn from(msg: &ConversationMessage) -> Self {
        Self::new(msg.role(), msg.content.clone())
    }
}

/// Ordered message list handed to a provider
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Conversation {
    messages: Vec<Message>,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_system_prompt(prompt: impl Into<String>) -> Self {
        let mut conv = Self::new();
        conv.push(Message::system(prompt));
        conv
    }

    /// Add a message
    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Append the most recent `limit` history entries, oldest first
    pub fn extend_history(&mut self, history: &[ConversationMessage], limit: usize) {
        let start = history.len().saturating_sub(limit);
        self.messages.extend(history[start..].iter().map(Message::from));
    }

    /// Get all messages
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Number of messages
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn history(n: usize) -> Vec<ConversationMessage> {
        (0..n)
            .map(|i| ConversationMessage::new(format!("msg {i}"), i % 2 == 0))
            .collect()
    }

    #[test]
    fn test_message_creation() {
        let msg = Message::user("Hello");
        assert_eq!(msg.role, Role::User);
        assert_eq!(msg.content, "Hello");
    }

    #[test]
    fn test_history_keeps_last_ten() {
        let mut conv = Conversation::with_system_prompt("sys");
        conv.extend_history(&history(14), HISTORY_LIMIT);

        assert_eq!(conv.len(), 11);
        assert_eq!(conv.messages()[1].content, "msg 4");
        assert_eq!(conv.messages()[10].content, "msg 13");
    }

    #[test]
    fn test_history_role_mapping() {
        let mut conv = Conversation::new();
        conv.extend_history(&history(2), HISTORY_LIMIT);

        assert_eq!(conv.messages()[0].role, Role::User);
        assert_eq!(conv.messages()[1].role, Role::Assistant);
    }

    #[test]
    fn test_history_wire_format() {
        let raw = r#"[
            {"id": "1", "content": "gm", "isUser": true, "timestamp": "2024-05-01T12:00:00.000Z"},
            {"content": "gm ser", "isUser": false}
        ]"#;
        let parsed: Vec<ConversationMessage> = serde_json::from_str(raw).unwrap();

        assert_eq!(parsed.len(), 2);
        assert!(parsed[0].timestamp.is_some());
        assert!(parsed[1].id.is_none());
        assert_eq!(parsed[1].role(), Role::Assistant);
    }

    #[test]
    fn test_history_accepts_numeric_id_and_timestamp() {
        let raw = r#"[{"id": 1715000000000, "content": "gm", "isUser": true, "timestamp": 1715000000000}]"#;
        let parsed: Vec<ConversationMessage> = serde_json::from_str(raw).unwrap();

        assert_eq!(parsed[0].content, "gm");
        assert_eq!(parsed[0].id, Some(Value::from(1_715_000_000_000_i64)));
    }

    #[test]
    fn test_history_rejects_wrong_content_type() {
        let raw = r#"[{"content": 7, "isUser": true}]"#;
        assert!(serde_json::from_str::<Vec<ConversationMessage>>(raw).is_err());
    }

    #[test]
    fn test_role_serializes_lowercase() {
        let json = serde_json::to_string(&Message::assistant("hi")).unwrap();
        assert_eq!(json, r#"{"role":"assistant","content":"hi"}"#);
    }
}
