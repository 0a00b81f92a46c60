use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::contract::model::User;

/// A slice of matching users plus the total match count.
#[derive(Debug, Clone, Default)]
pub struct UserSlice {
    pub items: Vec<User>,
    pub total: u64,
}

/// Persistence operations the domain needs.
#[async_trait]
pub trait UsersRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>>;

    /// Users whose username, email or name contains `search` (case-insensitive,
    /// `%`/`_` literal), ordered by `created_at` then `id`.
    async fn search(&self, search: Option<&str>, offset: u64, limit: u64)
        -> anyhow::Result<UserSlice>;

    /// Number of users `search` would match.
    async fn count(&self, search: Option<&str>) -> anyhow::Result<u64>;

    /// Conditional single-row update. Returns `false` when no row changed
    /// (unknown id, or `active` already had this value).
    async fn set_active(&self, id: Uuid, active: bool, at: DateTime<Utc>) -> anyhow::Result<bool>;

    async fn username_taken(&self, username: &str, except: Option<Uuid>) -> anyhow::Result<bool>;

    async fn email_taken(&self, email: &str, except: Option<Uuid>) -> anyhow::Result<bool>;

    async fn insert(&self, u: User) -> anyhow::Result<()>;

    /// Persist profile fields of an existing user; `active` is left alone.
    async fn update_profile(&self, u: User) -> anyhow::Result<()>;
}
