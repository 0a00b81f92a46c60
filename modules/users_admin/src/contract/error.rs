use thiserror::Error;

/// Errors that are safe to expose to other modules and clients.
///
/// `Display` is the message an admin sees.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UsersAdminError {
    #[error("{message}")]
    NotFound { message: String },

    #[error("{message}")]
    Conflict { message: String },

    #[error("{message}")]
    Validation { message: String },

    /// Store or network unavailable; the caller may reissue the action.
    #[error("{message}")]
    Unavailable { message: String },
}

impl UsersAdminError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Unavailable { .. })
    }
}

impl From<crate::domain::error::DomainError> for UsersAdminError {
    fn from(e: crate::domain::error::DomainError) -> Self {
        use crate::domain::error::DomainError::*;
        let message = e.to_string();
        match e {
            UserNotFound { .. } => Self::not_found(message),
            UsernameTaken { .. } | EmailTaken { .. } => Self::conflict(message),
            InvalidPage { .. }
            | SearchTooLong { .. }
            | InvalidEmail { .. }
            | EmptyField { .. }
            | FieldTooLong { .. } => Self::validation(message),
            Database { .. } => Self::unavailable("User store is temporarily unavailable"),
        }
    }
}
