use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Pure user model for inter-module communication (no serde)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub name: String,
    pub email: String,
    pub profile_image: Option<String>,
    /// `false` means blocked.
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub username: String,
    pub name: String,
    pub email: String,
    pub profile_image: Option<String>,
}

/// Partial update from the edit flow. Never touches `active`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UserPatch {
    pub username: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub profile_image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsersQuery {
    /// 1-based.
    pub page: u64,
    /// Raw term; empty matches everyone.
    pub search: String,
}

impl Default for UsersQuery {
    fn default() -> Self {
        Self {
            page: 1,
            search: String::new(),
        }
    }
}

impl UsersQuery {
    pub fn new(page: u64, search: impl Into<String>) -> Self {
        Self {
            page,
            search: search.into(),
        }
    }
}

/// One page of users plus the page count at the time of the query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsersPage {
    pub items: Vec<User>,
    pub page: u64,
    /// Always >= 1, even for an empty result.
    pub total_pages: u64,
}

/// Outcome of a block/unblock request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusChange {
    pub success: bool,
    pub message: String,
    pub user: User,
    /// `false` when the user already had the requested status.
    pub changed: bool,
}
