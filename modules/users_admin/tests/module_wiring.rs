//! Drives the module through the same phases the server runner uses.

mod common;

use std::collections::HashMap;
use std::sync::Arc;

use axum::{body::Body, http::Request, Router};
use modkit::{ConfigProvider, ModuleCtxBuilder, ModuleEntry, ModuleRegistry};
use serde_json::{json, Value};
use tokio_util::sync::CancellationToken;
use tower::ServiceExt;

use api_ingress::ApiIngress;
use users_admin::contract::client::UsersAdminApi;
use users_admin::contract::model::UsersQuery;
use users_admin::UsersAdmin;

struct MapConfig(HashMap<String, Value>);

impl ConfigProvider for MapConfig {
    fn get_module_config(&self, module_name: &str) -> Option<&Value> {
        self.0.get(module_name)
    }
}

#[tokio::test]
async fn phases_wire_client_routes_and_demo_seed() {
    let db = common::memory_db().await;
    let mut sections = HashMap::new();
    sections.insert(
        UsersAdmin::NAME.to_string(),
        json!({ "page_size": 5, "seed_demo": true }),
    );

    let ctx = ModuleCtxBuilder::new(CancellationToken::new())
        .with_db(db.clone())
        .with_config_provider(Arc::new(MapConfig(sections)))
        .build();

    let users = Arc::new(UsersAdmin::default());
    let registry = ModuleRegistry::new()
        .with(ModuleEntry::new(UsersAdmin::NAME, users.clone()).db(users.clone()).rest(users));
    let host = ApiIngress::default().with_openapi(users_admin::api_doc());

    registry.run_init_phase(&ctx).await.unwrap();
    registry.run_db_phase(Some(&db)).await.unwrap();
    let router: Router = registry.run_rest_phase(&ctx, &host, Router::new()).unwrap();

    // in-process client published during init
    let api = ctx.client_hub().get::<dyn UsersAdminApi>().unwrap();
    let page = api.list_users(UsersQuery::default()).await.unwrap();
    assert_eq!(page.items.len(), 5);
    assert!(page.total_pages >= 2);

    // routes mounted under the host's middleware
    let resp = router
        .oneshot(Request::builder().uri("/users?page=1").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert!(resp.headers().contains_key("x-request-id"));
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["data"].as_array().unwrap().len(), 5);

    // the merged OpenAPI document lists the users paths
    let doc = host.openapi_json().unwrap();
    assert!(doc["paths"]["/users/status"]["patch"].is_object());
}

#[tokio::test]
async fn init_without_database_fails() {
    let ctx = ModuleCtxBuilder::new(CancellationToken::new())
        .build()
        .for_module(UsersAdmin::NAME);
    let users = UsersAdmin::default();
    let err = modkit::Module::init(&users, &ctx).await.unwrap_err();
    assert!(err.to_string().contains("requires a database"));
}
