#![allow(dead_code)]

use std::sync::Arc;

use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;

use users_admin::contract::model::{NewUser, User};
use users_admin::domain::service::{Service, ServiceConfig};
use users_admin::infra::storage::migrations::Migrator;
use users_admin::infra::storage::SeaOrmUsersRepository;

/// Private in-memory SQLite database with the schema applied.
///
/// One pooled connection: every sqlite memory connection is its own database.
pub async fn memory_db() -> DatabaseConnection {
    let mut opts = ConnectOptions::new("sqlite::memory:");
    opts.max_connections(1).min_connections(1).sqlx_logging(false);
    let db = Database::connect(opts).await.expect("connect sqlite");
    Migrator::up(&db, None).await.expect("migrate");
    db
}

pub async fn service_with(page_size: u64) -> Arc<Service> {
    let db = memory_db().await;
    let repo = SeaOrmUsersRepository::new(db);
    Arc::new(Service::new(
        Arc::new(repo),
        ServiceConfig {
            page_size,
            ..ServiceConfig::default()
        },
    ))
}

pub fn new_user(username: &str, name: &str) -> NewUser {
    NewUser {
        username: username.to_string(),
        name: name.to_string(),
        email: format!("{username}@example.com"),
        profile_image: None,
    }
}

pub async fn seed_numbered(svc: &Service, n: usize) -> Vec<User> {
    let mut out = Vec::with_capacity(n);
    for i in 0..n {
        let u = svc
            .create_user(new_user(&format!("user{i:02}"), &format!("User Number {i}")))
            .await
            .expect("seed user");
        out.push(u);
    }
    out
}
