//! Drives one process lifecycle over an explicit [`ModuleRegistry`].
//!
//! A single base `ModuleCtx` is built up front and reused, scoped per module,
//! across init → migrate → rest → serve. Shutdown comes from OS signals, an
//! external `CancellationToken`, or an arbitrary future.

use sea_orm::DatabaseConnection;
use std::{future::Future, pin::Pin, sync::Arc};
use tokio_util::sync::CancellationToken;

use crate::client_hub::ClientHub;
use crate::context::{ConfigProvider, ModuleCtxBuilder};
use crate::contracts::RestHost;
use crate::runtime::{shutdown, ModuleRegistry};

pub enum ShutdownOptions {
    /// Listen for OS signals (Ctrl+C / SIGTERM).
    Signals,
    /// An external `CancellationToken` controls the lifecycle.
    Token(CancellationToken),
    /// When the future completes, shutdown starts.
    Future(Pin<Box<dyn Future<Output = ()> + Send>>),
}

pub struct RunOptions {
    pub registry: ModuleRegistry,
    pub host: Arc<dyn RestHost>,
    pub db: Option<DatabaseConnection>,
    pub modules_cfg: Arc<dyn ConfigProvider>,
    pub shutdown: ShutdownOptions,
}

pub async fn run(opts: RunOptions) -> anyhow::Result<()> {
    let RunOptions {
        registry,
        host,
        db,
        modules_cfg,
        shutdown,
    } = opts;

    registry.validate()?;

    let cancel = match &shutdown {
        ShutdownOptions::Token(t) => t.clone(),
        _ => CancellationToken::new(),
    };

    match shutdown {
        ShutdownOptions::Signals => {
            let c = cancel.clone();
            tokio::spawn(async move {
                if let Err(e) = shutdown::wait_for_shutdown().await {
                    tracing::warn!(error = %e, "shutdown: signal waiter failed; falling back to ctrl_c()");
                    let _ = tokio::signal::ctrl_c().await;
                }
                c.cancel();
            });
        }
        ShutdownOptions::Future(waiter) => {
            let c = cancel.clone();
            tokio::spawn(async move {
                waiter.await;
                tracing::info!("shutdown: external future completed");
                c.cancel();
            });
        }
        ShutdownOptions::Token(_) => {
            tracing::debug!("shutdown: external token controls lifecycle");
        }
    }

    let mut builder = ModuleCtxBuilder::new(cancel.clone())
        .with_client_hub(Arc::new(ClientHub::new()))
        .with_config_provider(modules_cfg);
    if let Some(conn) = &db {
        builder = builder.with_db(conn.clone());
    }
    let base_ctx = builder.build();

    tracing::info!(modules = registry.modules().len(), "Phase: init");
    registry.run_init_phase(&base_ctx).await?;

    tracing::info!("Phase: migrate");
    registry.run_db_phase(db.as_ref()).await?;

    tracing::info!("Phase: rest");
    let router = registry.run_rest_phase(&base_ctx, host.as_ref(), axum::Router::new())?;

    tracing::info!("Phase: serve");
    host.serve(router, cancel.clone()).await?;

    tracing::info!("Phase: stop");
    if let Some(conn) = db {
        if let Err(e) = conn.close().await {
            tracing::warn!(error = %e, "failed to close database pool");
        }
    }
    Ok(())
}
