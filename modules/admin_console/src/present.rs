//! What the users table shows for each row.

use chrono::{DateTime, Utc};
use users_admin::contract::User;
use uuid::Uuid;

pub const EMPTY_MESSAGE: &str = "No users found matching your search criteria";
pub const CONFIRM_TITLE: &str = "Confirmation Required";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Avatar {
    Image(String),
    Initials(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLabel {
    Active,
    Blocked,
}

impl StatusLabel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Blocked => "Blocked",
        }
    }
}

/// The one moderation action a row offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModerationAction {
    Block,
    Unblock,
}

impl ModerationAction {
    pub fn for_user(user: &User) -> Self {
        if user.active {
            Self::Block
        } else {
            Self::Unblock
        }
    }

    /// `active` value the action requests.
    pub fn target_active(self) -> bool {
        matches!(self, Self::Unblock)
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Block => "Block",
            Self::Unblock => "Unblock",
        }
    }

    fn verb(self) -> &'static str {
        match self {
            Self::Block => "block",
            Self::Unblock => "unblock",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRow {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub avatar: Avatar,
    pub joined: String,
    pub status: StatusLabel,
    pub action: ModerationAction,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Row {
    User(UserRow),
    Empty { message: &'static str },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmPrompt {
    pub title: &'static str,
    pub message: String,
}

impl ConfirmPrompt {
    pub fn for_user(user: &User) -> Self {
        let action = ModerationAction::for_user(user);
        Self {
            title: CONFIRM_TITLE,
            message: format!("Are you sure you want to {} {}?", action.verb(), user.username),
        }
    }
}

/// First letter of each word of the display name, upper-cased.
pub fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|w| w.chars().next())
        .flat_map(char::to_uppercase)
        .collect()
}

/// `March 5, 2024`
pub fn joined_label(at: DateTime<Utc>) -> String {
    at.format("%B %-d, %Y").to_string()
}

pub fn pager_label(page: u64) -> String {
    format!("Page {page}")
}

impl From<&User> for UserRow {
    fn from(user: &User) -> Self {
        let avatar = match &user.profile_image {
            Some(url) if !url.is_empty() => Avatar::Image(url.clone()),
            _ => {
                let from_name = initials(&user.name);
                if from_name.is_empty() {
                    Avatar::Initials(initials(&user.username))
                } else {
                    Avatar::Initials(from_name)
                }
            }
        };
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            avatar,
            joined: joined_label(user.created_at),
            status: if user.active {
                StatusLabel::Active
            } else {
                StatusLabel::Blocked
            },
            action: ModerationAction::for_user(user),
        }
    }
}

/// Rows for a fetched page. An empty page yields the single empty-state row.
pub fn rows_for(users: &[User]) -> Vec<Row> {
    if users.is_empty() {
        return vec![Row::Empty {
            message: EMPTY_MESSAGE,
        }];
    }
    users.iter().map(|u| Row::User(u.into())).collect()
}
