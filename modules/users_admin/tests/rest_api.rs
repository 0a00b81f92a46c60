mod common;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use users_admin::api::rest::routes::register_routes;

use common::{new_user, seed_numbered, service_with};

async fn app_with(n: usize) -> (Router, std::sync::Arc<users_admin::domain::service::Service>) {
    let svc = service_with(10).await;
    seed_numbered(&svc, n).await;
    (register_routes(Router::new(), svc.clone()), svc)
}

async fn call(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value, String) {
    let mut req = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(v) => {
            req = req.header(header::CONTENT_TYPE, "application/json");
            Body::from(v.to_string())
        }
        None => Body::empty(),
    };
    let resp = app.clone().oneshot(req.body(body).unwrap()).await.unwrap();
    let status = resp.status();
    let ct = resp
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json, ct)
}

#[tokio::test]
async fn list_defaults_to_first_page() {
    let (app, _) = app_with(12).await;

    let (status, body, _) = call(&app, Method::GET, "/users", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["page"], 1);
    assert_eq!(body["totalPages"], 2);
    assert_eq!(body["data"].as_array().unwrap().len(), 10);
    assert!(body["data"][0]["createdAt"].is_string());
}

#[tokio::test]
async fn list_with_unmatched_search_returns_empty_data() {
    let (app, _) = app_with(3).await;

    let (status, body, _) =
        call(&app, Method::GET, "/users?page=1&search=zzz_no_such_user", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!([]));
    assert_eq!(body["totalPages"], 1);
}

#[tokio::test]
async fn page_near_u64_max_is_an_empty_page() {
    let (app, _) = app_with(3).await;

    for uri in ["/users?page=922337203685477585", "/users?page=18446744073709551615"] {
        let (status, body, _) = call(&app, Method::GET, uri, None).await;
        assert_eq!(status, StatusCode::OK, "{uri}");
        assert_eq!(body["data"], json!([]));
        assert_eq!(body["totalPages"], 1);
    }
}

#[tokio::test]
async fn invalid_page_is_a_problem_response() {
    let (app, _) = app_with(0).await;

    let (status, body, ct) = call(&app, Method::GET, "/users?page=0", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(ct, modkit::APPLICATION_PROBLEM_JSON);
    assert_eq!(body["code"], "USERS_VALIDATION");
    assert_eq!(body["errors"][0]["pointer"], "/page");

    let (status, body, _) = call(&app, Method::GET, "/users?page=abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "USERS_VALIDATION");
}

#[tokio::test]
async fn block_then_list_reports_inactive() {
    let (app, svc) = app_with(0).await;
    let ann = svc.create_user(new_user("ann", "Ann Lee")).await.unwrap();

    let (status, body, _) = call(
        &app,
        Method::PATCH,
        "/users/status",
        Some(json!({ "userId": ann.id, "active": false })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "User ann has been blocked");
    assert_eq!(body["changed"], true);
    assert_eq!(body["user"]["active"], false);

    let (_, body, _) = call(&app, Method::GET, "/users?search=ann", None).await;
    assert_eq!(body["data"][0]["active"], false);

    let (status, body, _) = call(
        &app,
        Method::PATCH,
        "/users/status",
        Some(json!({ "userId": ann.id, "active": false })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "User ann is already blocked");
    assert_eq!(body["changed"], false);
}

#[tokio::test]
async fn status_change_for_unknown_user_is_404() {
    let (app, _) = app_with(0).await;
    let id = uuid::Uuid::new_v4();

    let (status, body, _) = call(
        &app,
        Method::PATCH,
        "/users/status",
        Some(json!({ "userId": id, "active": true })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "USERS_NOT_FOUND");
    assert_eq!(body["detail"], format!("User with id {id} was not found"));
    assert_eq!(body["instance"], "/users/status");
}

#[tokio::test]
async fn malformed_status_body_is_rejected() {
    let (app, _) = app_with(0).await;

    let (status, body, _) = call(
        &app,
        Method::PATCH,
        "/users/status",
        Some(json!({ "userId": "not-a-uuid", "active": "yes" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "USERS_VALIDATION");
}

#[tokio::test]
async fn create_get_and_update_round_trip() {
    let (app, _) = app_with(0).await;

    let (status, created, _) = call(
        &app,
        Method::POST,
        "/users",
        Some(json!({ "username": "zoe", "name": "Zoe Kim", "email": "zoe@example.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["active"], true);
    let id = created["id"].as_str().unwrap().to_string();

    let (status, updated, _) = call(
        &app,
        Method::PUT,
        &format!("/users/{id}"),
        Some(json!({ "name": "Zoe K." })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["name"], "Zoe K.");
    assert_eq!(updated["username"], "zoe");

    let (status, fetched, _) = call(&app, Method::GET, &format!("/users/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["name"], "Zoe K.");

    let (status, body, _) = call(
        &app,
        Method::POST,
        "/users",
        Some(json!({ "username": "zoe", "name": "Another", "email": "z2@example.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "USERS_CONFLICT");
}
