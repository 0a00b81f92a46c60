use async_trait::async_trait;
use axum::Router;
use sea_orm::DatabaseConnection;
use tokio_util::sync::CancellationToken;

/// Core module: DI/wiring; do not rely on migrated schema here.
#[async_trait]
pub trait Module: Send + Sync + 'static {
    async fn init(&self, ctx: &crate::context::ModuleCtx) -> anyhow::Result<()>;
    fn as_any(&self) -> &dyn std::any::Any;
}

#[async_trait]
pub trait DbModule: Send + Sync {
    /// Runs AFTER init, BEFORE REST.
    async fn migrate(&self, db: &DatabaseConnection) -> anyhow::Result<()>;
}

/// Pure wiring; must be sync. Runs AFTER DB migrations.
pub trait RestfulModule: Send + Sync {
    fn register_rest(
        &self,
        ctx: &crate::context::ModuleCtx,
        router: Router,
    ) -> anyhow::Result<Router>;
}

/// Owner of the HTTP listener. Receives the composed router once all
/// modules have registered their routes.
#[async_trait]
pub trait RestHost: Send + Sync + 'static {
    /// Attach host-level routes and middleware. Must not start serving.
    fn rest_finalize(&self, router: Router) -> anyhow::Result<Router>;

    /// Bind and serve until `cancel` fires.
    async fn serve(&self, router: Router, cancel: CancellationToken) -> anyhow::Result<()>;
}
