use axum::{
    body::Body,
    http::{Request, StatusCode},
    routing::get,
    Router,
};
use modkit::RestHost;
use tower::util::ServiceExt;
use utoipa::OpenApi;

use api_ingress::{ApiIngress, ApiIngressConfig};

#[derive(OpenApi)]
#[openapi(paths(ping))]
struct PingDoc;

#[utoipa::path(get, path = "/ping", responses((status = 200, description = "pong")))]
async fn ping() -> &'static str {
    "pong"
}

fn host(enable_docs: bool) -> ApiIngress {
    ApiIngress::new(ApiIngressConfig {
        enable_docs,
        ..Default::default()
    })
    .with_openapi(PingDoc::openapi())
}

fn get_req(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn finalize_adds_health_and_keeps_module_routes() {
    let router = host(false)
        .rest_finalize(Router::new().route("/ping", get(ping)))
        .unwrap();

    let resp = router.clone().oneshot(get_req("/health")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(json["status"], "healthy");

    let resp = router.oneshot(get_req("/ping")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn openapi_served_only_when_docs_enabled() {
    let hidden = host(false).rest_finalize(Router::new()).unwrap();
    let resp = hidden.oneshot(get_req("/openapi.json")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let shown = host(true).rest_finalize(Router::new()).unwrap();
    let resp = shown.oneshot(get_req("/openapi.json")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    let doc: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(doc["info"]["title"], "BlogDesk API");
    assert!(doc["paths"]["/ping"]["get"].is_object());
}
