//! Client-side core of the users admin page.
//!
//! [`AdminConsole`] ties together the debounced search box, the paged listing
//! with its query cache, and the confirm-gated block/unblock flow. It talks to
//! the server through [`users_admin::contract::UsersAdminApi`], either
//! in-process or over HTTP with [`HttpUsersAdminClient`].

pub mod cache;
pub mod config;
pub mod console;
pub mod debounce;
pub mod error;
pub mod gateways;
pub mod listing;
pub mod moderation;
pub mod present;
pub mod search;

pub use config::ConsoleConfig;
pub use console::AdminConsole;
pub use error::ConsoleError;
pub use gateways::http::HttpUsersAdminClient;
pub use listing::{ListingState, ListingView};
pub use moderation::{ModerationError, ModerationFlow, ModerationPhase, Notice, Selection};
