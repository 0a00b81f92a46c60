use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use tokio::time::Instant;
use users_admin::contract::UsersPage;

use crate::config::ConsoleConfig;

/// Cache key: one entry per `(page, settled search)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PageKey {
    pub page: u64,
    pub search: String,
}

impl PageKey {
    pub fn new(page: u64, search: impl Into<String>) -> Self {
        Self {
            page,
            search: search.into(),
        }
    }
}

/// Listing pages fetched so far. Any successful mutation clears the whole map.
///
/// Entries older than `ttl` are misses, so changes made by other operators
/// show up on the next visit. At most `max_entries` pages are held; the
/// oldest goes first.
pub struct QueryCache {
    ttl: Duration,
    max_entries: usize,
    pages: DashMap<PageKey, Entry>,
}

struct Entry {
    stored_at: Instant,
    page: Arc<UsersPage>,
}

impl QueryCache {
    pub fn new(ttl: Duration, max_entries: usize) -> Self {
        Self {
            ttl,
            max_entries: max_entries.max(1),
            pages: DashMap::new(),
        }
    }

    pub fn from_config(config: &ConsoleConfig) -> Self {
        Self::new(config.cache_ttl(), config.cache_max_entries)
    }

    pub fn get(&self, key: &PageKey) -> Option<Arc<UsersPage>> {
        let fresh = {
            let entry = self.pages.get(key)?;
            (entry.stored_at.elapsed() < self.ttl).then(|| Arc::clone(&entry.page))
        };
        if fresh.is_none() {
            self.pages.remove(key);
            tracing::debug!(page = key.page, "cached page expired");
        }
        fresh
    }

    pub fn insert(&self, key: PageKey, page: Arc<UsersPage>) {
        self.pages.retain(|_, e| e.stored_at.elapsed() < self.ttl);
        if !self.pages.contains_key(&key) {
            while self.pages.len() >= self.max_entries {
                let oldest = self
                    .pages
                    .iter()
                    .min_by_key(|e| e.stored_at)
                    .map(|e| e.key().clone());
                match oldest {
                    Some(k) => {
                        self.pages.remove(&k);
                    }
                    None => break,
                }
            }
        }
        self.pages.insert(
            key,
            Entry {
                stored_at: Instant::now(),
                page,
            },
        );
    }

    pub fn invalidate_all(&self) {
        let dropped = self.pages.len();
        self.pages.clear();
        tracing::debug!(dropped, "query cache invalidated");
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}
