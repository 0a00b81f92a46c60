use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use arc_swap::ArcSwapOption;
use async_trait::async_trait;
use modkit::{DbModule, Module, ModuleCtx, RestfulModule};
use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;
use tracing::{debug, info};

use crate::api::rest::routes;
use crate::config::UsersAdminConfig;
use crate::contract::client::UsersAdminApi;
use crate::contract::model::UsersQuery;
use crate::domain::demo::demo_users;
use crate::domain::service::Service;
use crate::gateways::local::UsersAdminLocalClient;
use crate::infra::storage::migrations::Migrator;
use crate::infra::storage::SeaOrmUsersRepository;

/// Users administration module: store, query/mutation services, REST API.
#[derive(Default)]
pub struct UsersAdmin {
    service: ArcSwapOption<Service>,
    seed_demo: AtomicBool,
}

impl UsersAdmin {
    pub const NAME: &'static str = "users_admin";

    fn service(&self) -> anyhow::Result<Arc<Service>> {
        self.service
            .load_full()
            .ok_or_else(|| anyhow::anyhow!("users_admin service not initialized"))
    }

    async fn seed_if_empty(&self, service: &Service) -> anyhow::Result<()> {
        let first = service.list_users(UsersQuery::default()).await?;
        if !first.items.is_empty() {
            debug!("users table not empty; skipping demo seed");
            return Ok(());
        }
        let users = demo_users();
        let count = users.len();
        for u in users {
            service.create_user(u).await?;
        }
        info!(count, "seeded demo users");
        Ok(())
    }
}

#[async_trait]
impl Module for UsersAdmin {
    async fn init(&self, ctx: &ModuleCtx) -> anyhow::Result<()> {
        let cfg: UsersAdminConfig = ctx.module_config();
        debug!(
            page_size = cfg.page_size,
            max_search_len = cfg.max_search_len,
            "loaded users_admin config"
        );

        let db = ctx
            .db()
            .ok_or_else(|| anyhow::anyhow!("users_admin requires a database connection"))?;

        let repo = SeaOrmUsersRepository::new(db);
        let service = Arc::new(Service::new(Arc::new(repo), (&cfg).into()));
        self.service.store(Some(service.clone()));
        self.seed_demo.store(cfg.seed_demo, Ordering::Relaxed);

        let api: Arc<dyn UsersAdminApi> = Arc::new(UsersAdminLocalClient::new(service));
        ctx.client_hub().register::<dyn UsersAdminApi>(api);
        info!("UsersAdmin API exposed to ClientHub");
        Ok(())
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

#[async_trait]
impl DbModule for UsersAdmin {
    async fn migrate(&self, db: &DatabaseConnection) -> anyhow::Result<()> {
        info!("Running users_admin database migrations");
        Migrator::up(db, None).await?;

        if self.seed_demo.load(Ordering::Relaxed) {
            self.seed_if_empty(&*self.service()?).await?;
        }
        Ok(())
    }
}

impl RestfulModule for UsersAdmin {
    fn register_rest(&self, _ctx: &ModuleCtx, router: axum::Router) -> anyhow::Result<axum::Router> {
        let router = routes::register_routes(router, self.service()?);
        info!("users_admin REST routes registered");
        Ok(router)
    }
}
