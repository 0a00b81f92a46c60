use async_trait::async_trait;
use uuid::Uuid;

use crate::contract::{
    error::UsersAdminError,
    model::{NewUser, StatusChange, User, UserPatch, UsersPage, UsersQuery},
};

/// Users administration API, published to the `ClientHub` in-process and
/// implemented over HTTP by the admin console gateway.
#[async_trait]
pub trait UsersAdminApi: Send + Sync {
    /// Page of users matching `query.search` (username, email or name).
    async fn list_users(&self, query: UsersQuery) -> Result<UsersPage, UsersAdminError>;

    /// Block (`active = false`) or unblock a user. Idempotent.
    async fn set_user_active(&self, id: Uuid, active: bool)
        -> Result<StatusChange, UsersAdminError>;

    async fn get_user(&self, id: Uuid) -> Result<User, UsersAdminError>;

    async fn update_user(&self, id: Uuid, patch: UserPatch) -> Result<User, UsersAdminError>;

    async fn create_user(&self, new_user: NewUser) -> Result<User, UsersAdminError>;
}
