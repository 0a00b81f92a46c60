//! # ModKit - small module kit
//!
//! Modules implement a handful of capability traits and are wired explicitly by
//! the binary into a [`ModuleRegistry`]. The runner drives the phases:
//!
//! init → migrate → rest (router composition) → serve → stop
//!
//! ```rust,ignore
//! let registry = ModuleRegistry::new()
//!     .with(ModuleEntry::new("users_admin", users.clone()).db(users.clone()).rest(users));
//! modkit::run(RunOptions { registry, host, db: Some(conn), modules_cfg, shutdown }).await?;
//! ```

pub use anyhow::Result;
pub use async_trait::async_trait;

pub mod contracts;
pub use contracts::*;

pub mod context;
pub use context::{ConfigProvider, ModuleCtx, ModuleCtxBuilder};

pub mod client_hub;
pub use client_hub::ClientHub;

pub mod api;
pub use api::problem::{Problem, ProblemResponse, ValidationError, APPLICATION_PROBLEM_JSON};

pub mod http;
pub use http::client::{HttpClientError, TracedClient};

pub mod runtime;
pub use runtime::{run, ModuleEntry, ModuleRegistry, RunOptions, ShutdownOptions};
