use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::contract::model::{NewUser, StatusChange, User, UserPatch, UsersPage, UsersQuery};
use crate::domain::error::DomainError;
use crate::domain::repo::{UserSlice, UsersRepository};

/// Domain service with the listing and moderation rules.
/// Depends only on the repository port, not on infra types.
#[derive(Clone)]
pub struct Service {
    repo: Arc<dyn UsersRepository>,
    config: ServiceConfig,
}

#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub page_size: u64,
    pub max_search_len: usize,
    pub max_name_len: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            page_size: 10,
            max_search_len: 100,
            max_name_len: 100,
        }
    }
}

/// `max(1, ceil(total / page_size))`
pub fn total_pages(total: u64, page_size: u64) -> u64 {
    total.div_ceil(page_size.max(1)).max(1)
}

/// Row offset of a 1-based page, if it fits a SQL `OFFSET`.
fn page_offset(page: u64, page_size: u64) -> Option<u64> {
    (page - 1)
        .checked_mul(page_size)
        .filter(|offset| i64::try_from(*offset).is_ok())
}

fn status_message(username: &str, active: bool, changed: bool) -> String {
    match (changed, active) {
        (true, false) => format!("User {username} has been blocked"),
        (true, true) => format!("User {username} has been unblocked"),
        (false, false) => format!("User {username} is already blocked"),
        (false, true) => format!("User {username} is already active"),
    }
}

impl Service {
    pub fn new(repo: Arc<dyn UsersRepository>, config: ServiceConfig) -> Self {
        Self { repo, config }
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    #[instrument(
        name = "users_admin.service.list_users",
        skip(self, query),
        fields(page = query.page, search_len = query.search.len())
    )]
    pub async fn list_users(&self, query: UsersQuery) -> Result<UsersPage, DomainError> {
        if query.page < 1 {
            return Err(DomainError::InvalidPage { page: query.page });
        }
        let search = query.search.trim();
        let len = search.chars().count();
        if len > self.config.max_search_len {
            return Err(DomainError::SearchTooLong {
                len,
                max: self.config.max_search_len,
            });
        }

        let page_size = self.config.page_size.max(1);
        let term = (!search.is_empty()).then_some(search);

        let slice = match page_offset(query.page, page_size) {
            Some(offset) => self.repo.search(term, offset, page_size).await?,
            // Far past any real data; SQL offsets are signed 64-bit.
            None => UserSlice {
                items: Vec::new(),
                total: self.repo.count(term).await?,
            },
        };
        let page = UsersPage {
            items: slice.items,
            page: query.page,
            total_pages: total_pages(slice.total, page_size),
        };

        debug!(
            total = slice.total,
            returned = page.items.len(),
            total_pages = page.total_pages,
            "listed users"
        );
        Ok(page)
    }

    #[instrument(
        name = "users_admin.service.set_user_active",
        skip(self),
        fields(user_id = %id, active)
    )]
    pub async fn set_user_active(&self, id: Uuid, active: bool) -> Result<StatusChange, DomainError> {
        let changed = self.repo.set_active(id, active, Utc::now()).await?;

        let user = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::user_not_found(id))?;

        let message = status_message(&user.username, active, changed);
        if changed {
            info!(username = %user.username, "user status changed");
        } else {
            debug!(username = %user.username, "user status unchanged");
        }

        Ok(StatusChange {
            success: true,
            message,
            user,
            changed,
        })
    }

    #[instrument(name = "users_admin.service.get_user", skip(self), fields(user_id = %id))]
    pub async fn get_user(&self, id: Uuid) -> Result<User, DomainError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::user_not_found(id))
    }

    #[instrument(
        name = "users_admin.service.create_user",
        skip(self, new_user),
        fields(username = %new_user.username)
    )]
    pub async fn create_user(&self, new_user: NewUser) -> Result<User, DomainError> {
        let username = self.validate_name("username", &new_user.username)?;
        let name = self.validate_name("name", &new_user.name)?;
        let email = validate_email(&new_user.email)?;

        if self.repo.username_taken(&username, None).await? {
            return Err(DomainError::UsernameTaken { username });
        }
        if self.repo.email_taken(&email, None).await? {
            return Err(DomainError::EmailTaken { email });
        }

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            username,
            name,
            email,
            profile_image: normalize_image(new_user.profile_image),
            active: true,
            created_at: now,
            updated_at: now,
        };
        self.repo.insert(user.clone()).await?;

        info!(user_id = %user.id, "created user");
        Ok(user)
    }

    #[instrument(name = "users_admin.service.update_user", skip(self, patch), fields(user_id = %id))]
    pub async fn update_user(&self, id: Uuid, patch: UserPatch) -> Result<User, DomainError> {
        let mut current = self.get_user(id).await?;

        if let Some(username) = patch.username {
            let username = self.validate_name("username", &username)?;
            if username != current.username && self.repo.username_taken(&username, Some(id)).await? {
                return Err(DomainError::UsernameTaken { username });
            }
            current.username = username;
        }
        if let Some(name) = patch.name {
            current.name = self.validate_name("name", &name)?;
        }
        if let Some(email) = patch.email {
            let email = validate_email(&email)?;
            if email != current.email && self.repo.email_taken(&email, Some(id)).await? {
                return Err(DomainError::EmailTaken { email });
            }
            current.email = email;
        }
        if patch.profile_image.is_some() {
            current.profile_image = normalize_image(patch.profile_image);
        }
        current.updated_at = Utc::now();

        self.repo.update_profile(current.clone()).await?;
        info!("updated user profile");
        Ok(current)
    }

    // --- validation helpers ---

    fn validate_name(&self, field: &'static str, value: &str) -> Result<String, DomainError> {
        let value = value.trim();
        if value.is_empty() {
            return Err(DomainError::EmptyField { field });
        }
        let len = value.chars().count();
        if len > self.config.max_name_len {
            return Err(DomainError::FieldTooLong {
                field,
                len,
                max: self.config.max_name_len,
            });
        }
        Ok(value.to_string())
    }
}

fn validate_email(email: &str) -> Result<String, DomainError> {
    let email = email.trim();
    if email.is_empty() || !email.contains('@') || !email.contains('.') {
        return Err(DomainError::InvalidEmail {
            email: email.to_string(),
        });
    }
    Ok(email.to_string())
}

/// Blank image URLs mean "no image".
fn normalize_image(image: Option<String>) -> Option<String> {
    image
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
