use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::contract::{
    client::UsersAdminApi,
    error::UsersAdminError,
    model::{NewUser, StatusChange, User, UserPatch, UsersPage, UsersQuery},
};
use crate::domain::service::Service;

/// In-process `UsersAdminApi` that delegates to the domain service.
pub struct UsersAdminLocalClient {
    service: Arc<Service>,
}

impl UsersAdminLocalClient {
    pub fn new(service: Arc<Service>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl UsersAdminApi for UsersAdminLocalClient {
    async fn list_users(&self, query: UsersQuery) -> Result<UsersPage, UsersAdminError> {
        self.service.list_users(query).await.map_err(Into::into)
    }

    async fn set_user_active(
        &self,
        id: Uuid,
        active: bool,
    ) -> Result<StatusChange, UsersAdminError> {
        self.service
            .set_user_active(id, active)
            .await
            .map_err(Into::into)
    }

    async fn get_user(&self, id: Uuid) -> Result<User, UsersAdminError> {
        self.service.get_user(id).await.map_err(Into::into)
    }

    async fn update_user(&self, id: Uuid, patch: UserPatch) -> Result<User, UsersAdminError> {
        self.service
            .update_user(id, patch)
            .await
            .map_err(Into::into)
    }

    async fn create_user(&self, new_user: NewUser) -> Result<User, UsersAdminError> {
        self.service.create_user(new_user).await.map_err(Into::into)
    }
}
