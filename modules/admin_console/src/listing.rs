//! Listing View state machine: `Loading -> Ready | Error`, back to `Loading`
//! on any page or settled-search change.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, instrument, warn};
use users_admin::contract::{UsersAdminApi, UsersPage, UsersQuery};

use crate::cache::{PageKey, QueryCache};
use crate::error::{with_timeout, ConsoleError};
use crate::present::{rows_for, Row};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListingState {
    Loading,
    Error(ConsoleError),
    Ready(Arc<UsersPage>),
}

pub struct ListingView {
    api: Arc<dyn UsersAdminApi>,
    cache: Arc<QueryCache>,
    timeout: Duration,
    page: u64,
    search: String,
    state: ListingState,
}

impl ListingView {
    pub fn new(
        api: Arc<dyn UsersAdminApi>,
        cache: Arc<QueryCache>,
        timeout: Duration,
        search: impl Into<String>,
    ) -> Self {
        Self {
            api,
            cache,
            timeout,
            page: 1,
            search: search.into(),
            state: ListingState::Loading,
        }
    }

    pub fn state(&self) -> &ListingState {
        &self.state
    }

    pub fn page(&self) -> u64 {
        self.page
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    /// Page count of the last successful load, if any.
    pub fn total_pages(&self) -> Option<u64> {
        match &self.state {
            ListingState::Ready(p) => Some(p.total_pages),
            _ => None,
        }
    }

    pub fn can_prev(&self) -> bool {
        self.page > 1
    }

    /// Only known once a page is loaded.
    pub fn can_next(&self) -> bool {
        self.total_pages().is_some_and(|total| self.page < total)
    }

    pub fn next_page(&mut self) -> bool {
        if !self.can_next() {
            return false;
        }
        self.page += 1;
        self.state = ListingState::Loading;
        true
    }

    pub fn prev_page(&mut self) -> bool {
        if !self.can_prev() {
            return false;
        }
        self.page -= 1;
        self.state = ListingState::Loading;
        true
    }

    /// Apply a settled search term. A new term starts again from page 1.
    pub fn set_search(&mut self, search: &str) -> bool {
        if self.search == search {
            return false;
        }
        self.search = search.to_string();
        self.page = 1;
        self.state = ListingState::Loading;
        true
    }

    /// Enter `Loading` for the current `(page, search)`.
    pub fn begin_load(&mut self) -> PageKey {
        self.state = ListingState::Loading;
        PageKey::new(self.page, self.search.clone())
    }

    /// Apply a load result. Results for a key that is no longer current are ignored.
    pub fn finish_load(&mut self, key: &PageKey, result: Result<Arc<UsersPage>, ConsoleError>) {
        if key.page != self.page || key.search != self.search {
            debug!(page = key.page, "dropping stale listing result");
            return;
        }
        self.state = match result {
            Ok(page) => ListingState::Ready(page),
            Err(e) => ListingState::Error(e),
        };
    }

    /// Load the current page, from the cache when possible.
    #[instrument(name = "admin_console.listing.refresh", skip(self), fields(page = self.page))]
    pub async fn refresh(&mut self) {
        let key = self.begin_load();

        let result = match self.cache.get(&key) {
            Some(hit) => {
                debug!("listing served from cache");
                Ok(hit)
            }
            None => {
                let query = UsersQuery::new(key.page, key.search.clone());
                match with_timeout(self.timeout, self.api.list_users(query)).await {
                    Ok(page) => {
                        let page = Arc::new(page);
                        self.cache.insert(key.clone(), Arc::clone(&page));
                        Ok(page)
                    }
                    Err(e) => {
                        warn!(error = %e, "listing load failed");
                        Err(e)
                    }
                }
            }
        };

        self.finish_load(&key, result);
    }

    /// Table rows; empty unless a page is loaded.
    pub fn rows(&self) -> Vec<Row> {
        match &self.state {
            ListingState::Ready(p) => rows_for(&p.items),
            _ => Vec::new(),
        }
    }
}
