#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use parking_lot::Mutex;
use users_admin::contract::{
    NewUser, StatusChange, User, UserPatch, UsersAdminApi, UsersAdminError, UsersPage, UsersQuery,
};
use uuid::Uuid;

/// In-memory stand-in for the users service with call counters.
pub struct FakeUsersApi {
    users: Mutex<Vec<User>>,
    page_size: u64,
    pub list_calls: AtomicUsize,
    pub status_calls: AtomicUsize,
    fail_next: Mutex<Option<UsersAdminError>>,
    delay: Mutex<Option<Duration>>,
}

impl FakeUsersApi {
    pub fn with_users(count: usize, page_size: u64) -> Self {
        let users = (0..count)
            .map(|i| {
                let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
                    + chrono::Duration::minutes(i as i64);
                User {
                    id: Uuid::new_v4(),
                    username: format!("user{i:02}"),
                    name: format!("User Number{i}"),
                    email: format!("user{i:02}@example.com"),
                    profile_image: None,
                    active: true,
                    created_at: at,
                    updated_at: at,
                }
            })
            .collect();
        Self {
            users: Mutex::new(users),
            page_size,
            list_calls: AtomicUsize::new(0),
            status_calls: AtomicUsize::new(0),
            fail_next: Mutex::new(None),
            delay: Mutex::new(None),
        }
    }

    pub fn user(&self, idx: usize) -> User {
        self.users.lock()[idx].clone()
    }

    pub fn fail_next(&self, e: UsersAdminError) {
        *self.fail_next.lock() = Some(e);
    }

    pub fn set_delay(&self, d: Duration) {
        *self.delay.lock() = Some(d);
    }

    pub fn lists(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    async fn before_call(&self) -> Result<(), UsersAdminError> {
        let delay = *self.delay.lock();
        if let Some(d) = delay {
            tokio::time::sleep(d).await;
        }
        match self.fail_next.lock().take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl UsersAdminApi for FakeUsersApi {
    async fn list_users(&self, query: UsersQuery) -> Result<UsersPage, UsersAdminError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        self.before_call().await?;

        let term = query.search.trim().to_lowercase();
        let matching: Vec<User> = self
            .users
            .lock()
            .iter()
            .filter(|u| {
                term.is_empty()
                    || u.username.to_lowercase().contains(&term)
                    || u.email.to_lowercase().contains(&term)
                    || u.name.to_lowercase().contains(&term)
            })
            .cloned()
            .collect();
        let total = matching.len() as u64;
        let items = matching
            .into_iter()
            .skip(((query.page - 1) * self.page_size) as usize)
            .take(self.page_size as usize)
            .collect();
        Ok(UsersPage {
            items,
            page: query.page,
            total_pages: total.div_ceil(self.page_size).max(1),
        })
    }

    async fn set_user_active(
        &self,
        id: Uuid,
        active: bool,
    ) -> Result<StatusChange, UsersAdminError> {
        self.status_calls.fetch_add(1, Ordering::SeqCst);
        self.before_call().await?;

        let mut users = self.users.lock();
        let user = users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or_else(|| UsersAdminError::not_found(format!("User with id {id} was not found")))?;
        let changed = user.active != active;
        user.active = active;
        let verb = if active { "unblocked" } else { "blocked" };
        Ok(StatusChange {
            success: true,
            message: format!("User {} has been {verb}", user.username),
            user: user.clone(),
            changed,
        })
    }

    async fn get_user(&self, id: Uuid) -> Result<User, UsersAdminError> {
        self.users
            .lock()
            .iter()
            .find(|u| u.id == id)
            .cloned()
            .ok_or_else(|| UsersAdminError::not_found("User not found"))
    }

    async fn update_user(&self, id: Uuid, patch: UserPatch) -> Result<User, UsersAdminError> {
        self.before_call().await?;
        let mut users = self.users.lock();
        let user = users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or_else(|| UsersAdminError::not_found("User not found"))?;
        if let Some(name) = patch.name {
            user.name = name;
        }
        if let Some(email) = patch.email {
            user.email = email;
        }
        Ok(user.clone())
    }

    async fn create_user(&self, _new_user: NewUser) -> Result<User, UsersAdminError> {
        Err(UsersAdminError::validation("not supported by the fake"))
    }
}
