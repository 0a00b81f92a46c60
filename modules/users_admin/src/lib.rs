// === PUBLIC CONTRACT ===
pub mod contract;
pub use contract::{client, error, model};

// === MODULE DEFINITION ===
pub mod module;
pub use module::UsersAdmin;

/// OpenAPI document for the REST surface, merged by the HTTP host.
pub use api::rest::openapi::api_doc;

// === INTERNAL MODULES ===
// Exposed for tests only; other crates should stick to `contract`.
#[doc(hidden)]
pub mod api;
#[doc(hidden)]
pub mod config;
#[doc(hidden)]
pub mod domain;
#[doc(hidden)]
pub mod gateways;
#[doc(hidden)]
pub mod infra;
