use std::future::Future;
use std::time::Duration;

use thiserror::Error;
use users_admin::contract::UsersAdminError;

/// Failure as the console presents it. `Display` is the text shown to the admin.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConsoleError {
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Unavailable(String),
    #[error("The server did not respond within {}s", .0.as_secs_f32())]
    Timeout(Duration),
}

impl ConsoleError {
    /// Store/network trouble; the admin may simply retry.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Unavailable(_) | Self::Timeout(_))
    }
}

impl From<UsersAdminError> for ConsoleError {
    fn from(e: UsersAdminError) -> Self {
        match e {
            UsersAdminError::NotFound { message } => Self::NotFound(message),
            UsersAdminError::Conflict { message } => Self::Conflict(message),
            UsersAdminError::Validation { message } => Self::Validation(message),
            UsersAdminError::Unavailable { message } => Self::Unavailable(message),
        }
    }
}

/// Await `fut` for at most `limit`.
pub async fn with_timeout<T, F>(limit: Duration, fut: F) -> Result<T, ConsoleError>
where
    F: Future<Output = Result<T, UsersAdminError>>,
{
    match tokio::time::timeout(limit, fut).await {
        Ok(res) => res.map_err(Into::into),
        Err(_) => {
            tracing::warn!(timeout_ms = limit.as_millis() as u64, "users API call timed out");
            Err(ConsoleError::Timeout(limit))
        }
    }
}
