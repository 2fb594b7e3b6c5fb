//! Session State
//!
//! Chat requests carry an optional session identifier. Anything remembered
//! between turns lives in a [`SessionCache`] keyed by that identifier, so one
//! visitor's follow-up questions never see another visitor's context.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use uuid::Uuid;

/// Key used when a client does not send a session id
const ANONYMOUS: &str = "anonymous";

/// Unique session identifier
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(String);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Shared session for clients that send no identifier
    pub fn anonymous() -> Self {
        Self(ANONYMOUS.into())
    }

    /// Use the client-supplied id when it is non-blank
    pub fn from_client(id: Option<&str>) -> Self {
        match id.map(str::trim) {
            Some(id) if !id.is_empty() => Self::from_string(id),
            _ => Self::anonymous(),
        }
    }

    pub fn is_anonymous(&self) -> bool {
        self.0 == ANONYMOUS
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A cached value and when it was last written
#[derive(Clone, Debug)]
pub struct CacheEntry<T> {
    pub value: T,
    pub updated_at: DateTime<Utc>,
}

/// Sessions kept by [`SessionCache::new`]
pub const DEFAULT_SESSION_CAPACITY: usize = 1024;

/// Single-slot-per-session cache.
///
/// Each session holds at most one value; `put` replaces it. At most
/// `capacity` sessions are kept: writing a new session into a full cache
/// evicts the least recently written one.
#[derive(Debug)]
pub struct SessionCache<T> {
    entries: RwLock<HashMap<SessionId, CacheEntry<T>>>,
    capacity: usize,
}

impl<T> Default for SessionCache<T> {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_SESSION_CAPACITY)
    }
}

impl<T> SessionCache<T> {
    /// A capacity of zero is treated as one
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            capacity: capacity.max(1),
        }
    }

    pub const fn capacity(&self) -> usize {
        self.capacity
    }
}

impl<T: Clone + Send + Sync> SessionCache<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current value for a session
    pub async fn get(&self, session: &SessionId) -> Option<T> {
        self.entries
            .read()
            .await
            .get(session)
            .map(|entry| entry.value.clone())
    }

    /// Replace the value for a session, evicting the stalest session if full
    pub async fn put(&self, session: &SessionId, value: T) {
        let entry = CacheEntry {
            value,
            updated_at: Utc::now(),
        };
        let mut entries = self.entries.write().await;

        if !entries.contains_key(session) && entries.len() >= self.capacity {
            let stalest = entries
                .iter()
                .min_by_key(|(_, entry)| entry.updated_at)
                .map(|(id, _)| id.clone());
            if let Some(stalest) = stalest {
                entries.remove(&stalest);
                tracing::debug!(session = %stalest, "Evicted stalest session");
            }
        }

        entries.insert(session.clone(), entry);
        tracing::debug!(session = %session, sessions = entries.len(), "Session cache updated");
    }

    /// Number of sessions with a cached value
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}
