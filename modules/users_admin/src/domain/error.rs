use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("User with id {id} was not found")]
    UserNotFound { id: Uuid },

    #[error("Username '{username}' is already taken")]
    UsernameTaken { username: String },

    #[error("Email '{email}' is already in use")]
    EmailTaken { email: String },

    #[error("Page must be 1 or greater, got {page}")]
    InvalidPage { page: u64 },

    #[error("Search term too long: {len} characters (max: {max})")]
    SearchTooLong { len: usize, max: usize },

    #[error("Invalid email format: '{email}'")]
    InvalidEmail { email: String },

    #[error("{field} cannot be empty")]
    EmptyField { field: &'static str },

    #[error("{field} too long: {len} characters (max: {max})")]
    FieldTooLong {
        field: &'static str,
        len: usize,
        max: usize,
    },

    #[error("Database error: {message}")]
    Database { message: String },
}

impl DomainError {
    pub fn user_not_found(id: Uuid) -> Self {
        Self::UserNotFound { id }
    }

    pub fn database(message: impl Into<String>) -> Self {
        Self::Database {
            message: message.into(),
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidPage { .. }
                | Self::SearchTooLong { .. }
                | Self::InvalidEmail { .. }
                | Self::EmptyField { .. }
                | Self::FieldTooLong { .. }
        )
    }
}

impl From<anyhow::Error> for DomainError {
    fn from(e: anyhow::Error) -> Self {
        Self::database(format!("{e:#}"))
    }
}
