use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::contract::model::{NewUser, StatusChange, User, UserPatch, UsersPage, UsersQuery};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: Uuid,
    pub username: String,
    pub name: String,
    pub email: String,
    pub profile_image: Option<String>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// `{ data, page, totalPages }`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UsersPageDto {
    pub data: Vec<UserDto>,
    pub page: u64,
    pub total_pages: u64,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListUsersQuery {
    /// 1-based page number (default 1)
    pub page: Option<u64>,
    /// Case-insensitive substring of username, email or name
    pub search: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SetUserStatusReq {
    pub user_id: Uuid,
    pub active: bool,
}

/// `{ success, message }` plus the resulting user row.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StatusChangeDto {
    pub success: bool,
    pub message: String,
    /// `false` when the user already had the requested status.
    pub changed: bool,
    pub user: UserDto,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserReq {
    pub username: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub profile_image: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserReq {
    pub username: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub profile_image: Option<String>,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            name: user.name,
            email: user.email,
            profile_image: user.profile_image,
            active: user.active,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

impl From<UsersPage> for UsersPageDto {
    fn from(p: UsersPage) -> Self {
        Self {
            data: p.items.into_iter().map(UserDto::from).collect(),
            page: p.page,
            total_pages: p.total_pages,
        }
    }
}

impl From<ListUsersQuery> for UsersQuery {
    fn from(q: ListUsersQuery) -> Self {
        Self {
            page: q.page.unwrap_or(1),
            search: q.search.unwrap_or_default(),
        }
    }
}

impl From<StatusChange> for StatusChangeDto {
    fn from(c: StatusChange) -> Self {
        Self {
            success: c.success,
            message: c.message,
            changed: c.changed,
            user: c.user.into(),
        }
    }
}

impl From<CreateUserReq> for NewUser {
    fn from(req: CreateUserReq) -> Self {
        Self {
            username: req.username,
            name: req.name,
            email: req.email,
            profile_image: req.profile_image,
        }
    }
}

impl From<UpdateUserReq> for UserPatch {
    fn from(req: UpdateUserReq) -> Self {
        Self {
            username: req.username,
            name: req.name,
            email: req.email,
            profile_image: req.profile_image,
        }
    }
}
