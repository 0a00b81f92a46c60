use axum::Router;
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use thiserror::Error;

use crate::context::ModuleCtx;
use crate::contracts::{DbModule, Module, RestHost, RestfulModule};

/// One module plus the optional capabilities it exposes.
pub struct ModuleEntry {
    pub name: &'static str,
    pub core: Arc<dyn Module>,
    pub db: Option<Arc<dyn DbModule>>,
    pub rest: Option<Arc<dyn RestfulModule>>,
}

impl ModuleEntry {
    pub fn new(name: &'static str, core: Arc<dyn Module>) -> Self {
        Self {
            name,
            core,
            db: None,
            rest: None,
        }
    }

    pub fn db(mut self, db: Arc<dyn DbModule>) -> Self {
        self.db = Some(db);
        self
    }

    pub fn rest(mut self, rest: Arc<dyn RestfulModule>) -> Self {
        self.rest = Some(rest);
        self
    }
}

impl std::fmt::Debug for ModuleEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModuleEntry")
            .field("name", &self.name)
            .field("has_db", &self.db.is_some())
            .field("has_rest", &self.rest.is_some())
            .finish()
    }
}

/// Modules in registration order; phases run in this order.
#[derive(Debug, Default)]
pub struct ModuleRegistry {
    modules: Vec<ModuleEntry>,
}

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("duplicate module name '{0}'")]
    DuplicateModule(&'static str),
    #[error("module '{0}' needs a database but none was configured")]
    DbRequired(&'static str),
    #[error("init failed for module '{module}'")]
    Init {
        module: &'static str,
        #[source]
        source: anyhow::Error,
    },
    #[error("migration failed for module '{module}'")]
    DbMigrate {
        module: &'static str,
        #[source]
        source: anyhow::Error,
    },
    #[error("REST registration failed for module '{module}'")]
    RestRegister {
        module: &'static str,
        #[source]
        source: anyhow::Error,
    },
    #[error("REST host finalize failed")]
    RestFinalize(#[source] anyhow::Error),
}

impl ModuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, entry: ModuleEntry) -> Self {
        self.modules.push(entry);
        self
    }

    pub fn modules(&self) -> &[ModuleEntry] {
        &self.modules
    }

    pub fn validate(&self) -> Result<(), RegistryError> {
        for (i, e) in self.modules.iter().enumerate() {
            if self.modules[..i].iter().any(|prev| prev.name == e.name) {
                return Err(RegistryError::DuplicateModule(e.name));
            }
        }
        Ok(())
    }

    pub async fn run_init_phase(&self, base_ctx: &ModuleCtx) -> Result<(), RegistryError> {
        for e in &self.modules {
            let ctx = base_ctx.clone().for_module(e.name);
            e.core
                .init(&ctx)
                .await
                .map_err(|source| RegistryError::Init {
                    module: e.name,
                    source,
                })?;
            tracing::debug!(module = e.name, "module initialized");
        }
        Ok(())
    }

    pub async fn run_db_phase(&self, db: Option<&DatabaseConnection>) -> Result<(), RegistryError> {
        for e in &self.modules {
            let Some(dbm) = &e.db else { continue };
            let db = db.ok_or(RegistryError::DbRequired(e.name))?;
            dbm.migrate(db)
                .await
                .map_err(|source| RegistryError::DbMigrate {
                    module: e.name,
                    source,
                })?;
            tracing::debug!(module = e.name, "migrations applied");
        }
        Ok(())
    }

    pub fn run_rest_phase(
        &self,
        base_ctx: &ModuleCtx,
        host: &dyn RestHost,
        mut router: Router,
    ) -> Result<Router, RegistryError> {
        for e in &self.modules {
            if let Some(rest) = &e.rest {
                let ctx = base_ctx.clone().for_module(e.name);
                router = rest
                    .register_rest(&ctx, router)
                    .map_err(|source| RegistryError::RestRegister {
                        module: e.name,
                        source,
                    })?;
            }
        }
        host.rest_finalize(router)
            .map_err(RegistryError::RestFinalize)
    }
}
