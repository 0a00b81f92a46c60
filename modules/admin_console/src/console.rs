//! The users admin page, minus the pixels: search box, table, pager, confirm
//! dialog and edit modal wired to the users API.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tracing::{debug, info};
use url::Url;
use users_admin::contract::{User, UserPatch, UsersAdminApi};

use crate::cache::QueryCache;
use crate::config::ConsoleConfig;
use crate::debounce::Debouncer;
use crate::error::{with_timeout, ConsoleError};
use crate::gateways::http::HttpUsersAdminClient;
use crate::listing::ListingView;
use crate::moderation::{ModerationError, ModerationFlow, Notice};
use crate::present::{pager_label, ConfirmPrompt, Row};
use crate::search::{read_search, write_search};

pub struct AdminConsole {
    api: Arc<dyn UsersAdminApi>,
    config: ConsoleConfig,
    cache: Arc<QueryCache>,
    debouncer: Debouncer<String>,
    settled: mpsc::UnboundedReceiver<String>,
    listing: ListingView,
    moderation: ModerationFlow,
    location: Url,
    raw_search: String,
}

impl AdminConsole {
    /// The initial search term is taken from `location`.
    pub fn new(api: Arc<dyn UsersAdminApi>, config: ConsoleConfig, location: Url) -> Self {
        let search = read_search(&location, &config.search_param);
        let cache = Arc::new(QueryCache::from_config(&config));
        let (debouncer, settled) = Debouncer::new(config.debounce());
        let listing = ListingView::new(
            Arc::clone(&api),
            Arc::clone(&cache),
            config.request_timeout(),
            search.clone(),
        );
        Self {
            api,
            config,
            cache,
            debouncer,
            settled,
            listing,
            moderation: ModerationFlow::new(),
            location,
            raw_search: search,
        }
    }

    /// Console talking to the REST endpoints at `config.base_url`.
    pub fn connect(config: ConsoleConfig, location: Url) -> anyhow::Result<Self> {
        let api = Arc::new(HttpUsersAdminClient::from_config(&config)?);
        Ok(Self::new(api, config, location))
    }

    pub fn listing(&self) -> &ListingView {
        &self.listing
    }

    pub fn moderation(&self) -> &ModerationFlow {
        &self.moderation
    }

    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }

    pub fn location(&self) -> &Url {
        &self.location
    }

    /// What is in the search box right now, settled or not.
    pub fn raw_search(&self) -> &str {
        &self.raw_search
    }

    pub fn rows(&self) -> Vec<Row> {
        self.listing.rows()
    }

    pub fn pager_label(&self) -> String {
        pager_label(self.listing.page())
    }

    fn timeout(&self) -> Duration {
        self.config.request_timeout()
    }

    pub async fn load(&mut self) {
        self.listing.refresh().await;
    }

    /// Keystroke in the search box.
    pub fn type_search(&mut self, raw: &str) {
        self.raw_search = raw.to_string();
        self.debouncer.reschedule(raw.to_string());
    }

    /// Wait for the next settled search value and apply it: URL first, then
    /// a reload from page 1 when the term actually changed.
    pub async fn next_settled(&mut self) -> Option<String> {
        let term = self.settled.recv().await?;
        debug!(len = term.len(), "search settled");

        write_search(&mut self.location, &self.config.search_param, &term);
        if self.listing.set_search(&term) {
            self.listing.refresh().await;
        }
        Some(term)
    }

    pub async fn next_page(&mut self) -> bool {
        let moved = self.listing.next_page();
        if moved {
            self.listing.refresh().await;
        }
        moved
    }

    pub async fn prev_page(&mut self) -> bool {
        let moved = self.listing.prev_page();
        if moved {
            self.listing.refresh().await;
        }
        moved
    }

    pub fn request_toggle(&mut self, user: &User) -> Result<ConfirmPrompt, ModerationError> {
        self.moderation.request_toggle(user.clone())
    }

    pub fn cancel_toggle(&mut self) -> Result<(), ModerationError> {
        self.moderation.cancel()
    }

    /// Submit the pending block/unblock. On success every cached page is
    /// dropped and the current page reloaded.
    pub async fn confirm_toggle(&mut self) -> Result<Notice, ModerationError> {
        let timeout = self.timeout();
        let notice = self.moderation.confirm(self.api.as_ref(), timeout).await?;
        if notice.is_success() {
            self.cache.invalidate_all();
            self.listing.refresh().await;
        }
        Ok(notice)
    }

    pub fn begin_edit(&mut self, user: &User) -> Result<(), ModerationError> {
        self.moderation.begin_edit(user.clone())
    }

    pub fn cancel_edit(&mut self) -> Result<(), ModerationError> {
        self.moderation.finish_edit().map(|_| ())
    }

    /// Save the edit modal. The modal stays open when the save fails.
    pub async fn save_edit(&mut self, patch: UserPatch) -> Result<User, ConsoleError> {
        let id = match self.moderation.editing() {
            Some(u) => u.id,
            None => {
                return Err(ConsoleError::Validation(
                    ModerationError::NotEditing.to_string(),
                ))
            }
        };

        let updated = with_timeout(self.timeout(), self.api.update_user(id, patch)).await?;
        info!(user_id = %id, "user profile saved");

        let _ = self.moderation.finish_edit();
        self.cache.invalidate_all();
        self.listing.refresh().await;
        Ok(updated)
    }
}
