pub mod client;
pub mod error;
pub mod model;

pub use client::UsersAdminApi;
pub use error::UsersAdminError;
pub use model::{NewUser, StatusChange, User, UserPatch, UsersPage, UsersQuery};
