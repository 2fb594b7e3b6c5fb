//! Server Configuration

use panel_core::session::DEFAULT_SESSION_CAPACITY;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

/// Process-level settings read once at startup
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub bind_addr: String,

    /// Most sessions whose last token is remembered
    pub session_capacity: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.into(),
            session_capacity: DEFAULT_SESSION_CAPACITY,
        }
    }
}

impl ServerConfig {
    /// Reads `BIND_ADDR` and `SESSION_CACHE_CAPACITY`
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let bind_addr = lookup("BIND_ADDR")
            .filter(|addr| !addr.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.into());

        let session_capacity = lookup("SESSION_CACHE_CAPACITY")
            .and_then(|raw| match raw.trim().parse::<usize>() {
                Ok(capacity) if capacity > 0 => Some(capacity),
                _ => {
                    tracing::warn!("Ignoring invalid SESSION_CACHE_CAPACITY: {}", raw);
                    None
                }
            })
            .unwrap_or(DEFAULT_SESSION_CAPACITY);

        Self { bind_addr, session_capacity }
    }
}
