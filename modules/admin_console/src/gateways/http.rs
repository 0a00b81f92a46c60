//! `UsersAdminApi` over the users REST endpoints.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use modkit::{HttpClientError, TracedClient};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use url::Url;
use users_admin::contract::{
    NewUser, StatusChange, User, UserPatch, UsersAdminApi, UsersAdminError, UsersPage, UsersQuery,
};
use uuid::Uuid;

use crate::config::ConsoleConfig;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireUser {
    id: Uuid,
    username: String,
    #[serde(default)]
    name: String,
    email: String,
    #[serde(default)]
    profile_image: Option<String>,
    active: bool,
    #[serde(default)]
    created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    updated_at: Option<DateTime<Utc>>,
}

impl TryFrom<WireUser> for User {
    type Error = UsersAdminError;

    fn try_from(w: WireUser) -> Result<Self, Self::Error> {
        // Older records may lack `createdAt`; the joined date then falls back to `updatedAt`.
        let Some(created_at) = w.created_at.or(w.updated_at) else {
            tracing::warn!(user_id = %w.id, "users API returned a user without timestamps");
            return Err(UsersAdminError::unavailable(
                "Unexpected response from the users service",
            ));
        };
        Ok(Self {
            id: w.id,
            username: w.username,
            name: w.name,
            email: w.email,
            profile_image: w.profile_image,
            active: w.active,
            created_at,
            updated_at: w.updated_at.unwrap_or(created_at),
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WirePage {
    data: Vec<WireUser>,
    #[serde(default)]
    page: Option<u64>,
    total_pages: u64,
}

#[derive(Debug, Deserialize)]
struct WireStatus {
    success: bool,
    message: String,
    #[serde(default)]
    changed: Option<bool>,
    #[serde(default)]
    user: Option<WireUser>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StatusBody {
    user_id: Uuid,
    active: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ProfileBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    username: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    email: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    profile_image: Option<&'a str>,
}

/// Turn a transport or status failure into the contract taxonomy, keeping the
/// server's `detail` as the admin-facing message.
fn map_http_error(e: HttpClientError) -> UsersAdminError {
    let (status, body) = match e {
        HttpClientError::Status { status, body } => (status, body),
        HttpClientError::Transport(err) => {
            tracing::warn!(error = %err, timeout = err.is_timeout(), "users API unreachable");
            return UsersAdminError::unavailable("Could not reach the users service");
        }
        HttpClientError::Decode(err) => {
            tracing::warn!(error = %err, "users API returned an unexpected body");
            return UsersAdminError::unavailable("Unexpected response from the users service");
        }
    };

    let detail = serde_json::from_str::<serde_json::Value>(&body)
        .ok()
        .and_then(|v| {
            v.get("detail")
                .or_else(|| v.get("message"))
                .and_then(|d| d.as_str())
                .map(str::to_owned)
        });

    match status {
        404 => UsersAdminError::not_found(detail.unwrap_or_else(|| "User not found".into())),
        409 => UsersAdminError::conflict(detail.unwrap_or_else(|| "Conflicting user data".into())),
        400 | 422 => UsersAdminError::validation(detail.unwrap_or_else(|| "Invalid request".into())),
        _ => {
            tracing::warn!(status, "users API failed");
            UsersAdminError::unavailable(
                detail.unwrap_or_else(|| "Users service is temporarily unavailable".into()),
            )
        }
    }
}

pub struct HttpUsersAdminClient {
    base: Url,
    http: TracedClient,
}

impl HttpUsersAdminClient {
    pub fn new(base_url: &str, request_timeout: Duration) -> anyhow::Result<Self> {
        let mut base = Url::parse(base_url)?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let inner = reqwest::Client::builder().timeout(request_timeout).build()?;
        Ok(Self {
            base,
            http: TracedClient::new(inner),
        })
    }

    pub fn from_config(cfg: &ConsoleConfig) -> anyhow::Result<Self> {
        Self::new(&cfg.base_url, cfg.request_timeout())
    }

    fn url(&self, path: &str) -> Result<Url, UsersAdminError> {
        self.base
            .join(path)
            .map_err(|e| UsersAdminError::validation(format!("invalid users API path: {e}")))
    }
}

#[async_trait]
impl UsersAdminApi for HttpUsersAdminClient {
    async fn list_users(&self, query: UsersQuery) -> Result<UsersPage, UsersAdminError> {
        let mut url = self.url("users")?;
        url.query_pairs_mut()
            .append_pair("page", &query.page.to_string())
            .append_pair("search", &query.search);

        let page: WirePage = self
            .http
            .get_json(url.as_str())
            .await
            .map_err(map_http_error)?;
        Ok(UsersPage {
            items: page
                .data
                .into_iter()
                .map(User::try_from)
                .collect::<Result<_, _>>()?,
            page: page.page.unwrap_or(query.page),
            total_pages: page.total_pages.max(1),
        })
    }

    async fn set_user_active(
        &self,
        id: Uuid,
        active: bool,
    ) -> Result<StatusChange, UsersAdminError> {
        let url = self.url("users/status")?;
        let body = StatusBody {
            user_id: id,
            active,
        };
        let res: WireStatus = self
            .http
            .send_json(Method::PATCH, url.as_str(), &body)
            .await
            .map_err(map_http_error)?;

        let user = match res.user {
            Some(u) => u.try_into()?,
            None => self.get_user(id).await?,
        };
        Ok(StatusChange {
            success: res.success,
            message: res.message,
            changed: res.changed.unwrap_or(res.success),
            user,
        })
    }

    async fn get_user(&self, id: Uuid) -> Result<User, UsersAdminError> {
        let url = self.url(&format!("users/{id}"))?;
        let user: WireUser = self
            .http
            .get_json(url.as_str())
            .await
            .map_err(map_http_error)?;
        user.try_into()
    }

    async fn update_user(&self, id: Uuid, patch: UserPatch) -> Result<User, UsersAdminError> {
        let url = self.url(&format!("users/{id}"))?;
        let body = ProfileBody {
            username: patch.username.as_deref(),
            name: patch.name.as_deref(),
            email: patch.email.as_deref(),
            profile_image: patch.profile_image.as_deref(),
        };
        let user: WireUser = self
            .http
            .send_json(Method::PUT, url.as_str(), &body)
            .await
            .map_err(map_http_error)?;
        user.try_into()
    }

    async fn create_user(&self, new_user: NewUser) -> Result<User, UsersAdminError> {
        let url = self.url("users")?;
        let body = ProfileBody {
            username: Some(&new_user.username),
            name: Some(&new_user.name),
            email: Some(&new_user.email),
            profile_image: new_user.profile_image.as_deref(),
        };
        let user: WireUser = self
            .http
            .send_json(Method::POST, url.as_str(), &body)
            .await
            .map_err(map_http_error)?;
        user.try_into()
    }
}
