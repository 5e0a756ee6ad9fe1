//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with a catch-all proxy handler
//! - Wire up middleware (tracing, request ID)
//! - Buffer request bodies within the configured limit
//! - Bind server to listener and shut down gracefully

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    response::Response,
    routing::any,
    Router,
};
use http_body_util::LengthLimitError;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::cache::CacheStore;
use crate::config::ProxyConfig;
use crate::http::handler::ProxyHandler;
use crate::http::request::ProxyRequest;
use crate::http::response;
use crate::origin::{HttpOriginClient, OriginClient, OriginError};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub handler: ProxyHandler,
    pub max_body_size: usize,
}

/// HTTP server for the caching proxy.
pub struct HttpServer {
    router: Router,
    config: ProxyConfig,
    cache: CacheStore,
}

impl HttpServer {
    /// Create a server that forwards to the configured origin.
    pub fn new(config: ProxyConfig) -> Result<Self, OriginError> {
        let origin = Arc::new(HttpOriginClient::new(&config.origin)?);
        Ok(Self::with_origin(config, origin))
    }

    /// Create a server with a custom origin client.
    pub fn with_origin(config: ProxyConfig, origin: Arc<dyn OriginClient>) -> Self {
        let cache = CacheStore::new(config.cache.ttl());
        let state = AppState {
            handler: ProxyHandler::new(cache.clone(), origin),
            max_body_size: config.listener.max_body_size,
        };

        let router = Self::build_router(state);
        Self {
            router,
            config,
            cache,
        }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(state: AppState) -> Router {
        Router::new()
            .route("/{*path}", any(proxy_handler))
            .route("/", any(proxy_handler))
            .with_state(state)
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    }

    /// The router, for serving on a custom transport or in-process testing.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// The cache owned by this server instance.
    pub fn cache(&self) -> &CacheStore {
        &self.cache
    }

    /// Run the server until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            origin = %self.config.origin.url,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Catch-all handler: buffer the body, then delegate to the proxy pipeline.
async fn proxy_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let (parts, body) = request.into_parts();

    let body = match axum::body::to_bytes(body, state.max_body_size).await {
        Ok(bytes) => bytes,
        Err(e) => {
            let inner = e.into_inner();
            if inner.is::<LengthLimitError>() {
                tracing::warn!(
                    method = %parts.method,
                    uri = %parts.uri,
                    limit = state.max_body_size,
                    "Request body too large"
                );
                return response::proxy_error(StatusCode::PAYLOAD_TOO_LARGE, "Request body too large");
            }
            tracing::warn!(
                method = %parts.method,
                uri = %parts.uri,
                error = %inner,
                "Failed to read request body"
            );
            return response::proxy_error(StatusCode::BAD_REQUEST, "Failed to read request body");
        }
    };

    state
        .handler
        .handle(ProxyRequest::from_parts(parts, body))
        .await
}
