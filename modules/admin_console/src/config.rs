use serde::{Deserialize, Serialize};
use std::time::Duration;

/// `modules.admin_console` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConsoleConfig {
    /// Root of the users REST API, e.g. `http://127.0.0.1:8090/`.
    pub base_url: String,
    /// Quiescence window before a typed search is used.
    pub debounce_ms: u64,
    /// Upper bound for any single call to the users API.
    pub request_timeout_ms: u64,
    /// URL query parameter carrying the search term.
    pub search_param: String,
    /// How long a fetched listing page may be served from memory.
    pub cache_ttl_ms: u64,
    /// Most listing pages kept at once.
    pub cache_max_entries: usize,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8090/".to_string(),
            debounce_ms: 300,
            request_timeout_ms: 10_000,
            search_param: "query".to_string(),
            cache_ttl_ms: 60_000,
            cache_max_entries: 64,
        }
    }
}

impl ConsoleConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_millis(self.cache_ttl_ms)
    }
}
