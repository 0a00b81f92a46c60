use async_trait::async_trait;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use arc_swap::ArcSwap;
use axum::{middleware::from_fn, routing::get, Router};
use parking_lot::Mutex;
use tokio_util::sync::CancellationToken;
use tower_http::{
    cors::CorsLayer,
    limit::RequestBodyLimitLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
};
use utoipa::openapi::{Info, OpenApi, Paths};

mod config;
pub mod request_id;
mod web;

pub use config::ApiIngressConfig;

const BODY_LIMIT_BYTES: usize = 16 * 1024 * 1024;

/// HTTP host: owns the listener and the global middleware stack.
pub struct ApiIngress {
    config: ArcSwap<ApiIngressConfig>,
    openapi: Mutex<OpenApi>,
}

impl Default for ApiIngress {
    fn default() -> Self {
        Self::new(ApiIngressConfig::default())
    }
}

impl ApiIngress {
    pub fn new(config: ApiIngressConfig) -> Self {
        Self {
            config: ArcSwap::from_pointee(config),
            openapi: Mutex::new(OpenApi::new(
                Info::new("BlogDesk API", env!("CARGO_PKG_VERSION")),
                Paths::new(),
            )),
        }
    }

    /// Merge a module's OpenAPI document into the served one.
    pub fn with_openapi(self, doc: OpenApi) -> Self {
        self.openapi.lock().merge(doc);
        self
    }

    pub fn get_config(&self) -> ApiIngressConfig {
        (**self.config.load()).clone()
    }

    pub fn openapi_json(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(&*self.openapi.lock())?)
    }

    /// Attach the global middleware stack.
    ///
    /// Outermost to innermost: SetRequestId -> PropagateRequestId -> Trace ->
    /// push_req_id_to_extensions -> Timeout -> CORS -> BodyLimit.
    /// Layers added later wrap the earlier ones.
    pub fn apply_layers(&self, mut router: Router) -> Router {
        let cfg = self.get_config();
        let x_request_id = crate::request_id::header();

        router = router.layer(RequestBodyLimitLayer::new(BODY_LIMIT_BYTES));
        if cfg.cors_enabled {
            router = router.layer(CorsLayer::permissive());
        }
        router = router.layer(TimeoutLayer::new(Duration::from_secs(
            cfg.request_timeout_secs,
        )));
        router = router.layer(from_fn(crate::request_id::push_req_id_to_extensions));
        router = router.layer(crate::request_id::create_trace_layer());
        router = router.layer(PropagateRequestIdLayer::new(x_request_id.clone()));
        router.layer(SetRequestIdLayer::new(
            x_request_id,
            crate::request_id::MakeReqId,
        ))
    }
}

#[async_trait]
impl modkit::Module for ApiIngress {
    async fn init(&self, ctx: &modkit::ModuleCtx) -> anyhow::Result<()> {
        let cfg = ctx.module_config::<ApiIngressConfig>();
        tracing::debug!(bind_addr = %cfg.bind_addr, docs = cfg.enable_docs, "api_ingress configured");
        self.config.store(Arc::new(cfg));
        Ok(())
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

#[async_trait]
impl modkit::RestHost for ApiIngress {
    fn rest_finalize(&self, mut router: Router) -> anyhow::Result<Router> {
        router = router.route("/health", get(web::health_check));

        if self.get_config().enable_docs {
            let doc = Arc::new(self.openapi_json()?);
            tracing::info!(
                paths = doc["paths"].as_object().map_or(0, |p| p.len()),
                "serving OpenAPI document at /openapi.json"
            );
            router = router.route(
                "/openapi.json",
                get(move || {
                    let doc = doc.clone();
                    async move { axum::Json((*doc).clone()) }
                }),
            );
        }

        Ok(self.apply_layers(router))
    }

    async fn serve(&self, router: Router, cancel: CancellationToken) -> anyhow::Result<()> {
        let cfg = self.get_config();
        let addr: SocketAddr = cfg
            .bind_addr
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid bind address '{}': {}", cfg.bind_addr, e))?;

        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!(addr = %listener.local_addr()?, "HTTP server bound");

        let shutdown = async move {
            cancel.cancelled().await;
            tracing::info!("HTTP server shutting down gracefully");
        };

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|e| anyhow::anyhow!(e))
    }
}
