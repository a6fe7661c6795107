//! HTTP server setup and request dispatch.
//!
//! # Responsibilities
//! - Build the Axum app with a single catch-all entry point
//! - Wire up middleware (tracing, timeout, request ID)
//! - Hand every request to the route table dispatcher
//! - Fall through to static frontend serving for unmatched GETs

use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::State,
    http::{Method, Request, StatusCode},
    response::{IntoResponse, Response},
    routing::any,
    Router as AxumRouter,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::api::handlers;
use crate::api::registry::EnvironmentRegistry;
use crate::config::ServerConfig;
use crate::http::static_files;
use crate::observability::metrics;
use crate::routing::{Match, PatternError, RouteTable, Router};

/// Application state injected into the dispatch handler.
#[derive(Clone)]
pub struct AppState {
    pub router: Arc<Router>,
    pub registry: Arc<EnvironmentRegistry>,
    pub static_root: Arc<PathBuf>,
}

/// HTTP server for the management API and frontend assets.
pub struct HttpServer {
    app: AxumRouter,
    config: ServerConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    ///
    /// The route table and static root are resolved here, once; both are
    /// immutable for the life of the process.
    pub fn new(
        config: ServerConfig,
        registry: Arc<EnvironmentRegistry>,
    ) -> Result<Self, PatternError> {
        let router = Arc::new(Router::new(RouteTable::standard()?));
        let static_root = Arc::new(static_files::resolve_root(&config.static_files));

        tracing::info!(
            routes = 6,
            static_root = %static_root.display(),
            "Dispatcher initialized"
        );

        let state = AppState {
            router,
            registry,
            static_root,
        };
        let app = Self::build_app(&config, state);
        Ok(Self { app, config })
    }

    /// Build the Axum app with all middleware layers.
    fn build_app(config: &ServerConfig, state: AppState) -> AxumRouter {
        AxumRouter::new()
            .route("/{*path}", any(dispatch))
            .route("/", any(dispatch))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.timeouts.request_secs,
            )))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.app)
            .with_graceful_shutdown(shutdown_signal(shutdown))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }
}

/// Single entry point for every inbound request.
///
/// Consults the route table first; exactly one handler (or the static
/// fallback) runs per request. Unmatched GETs go to the static frontend,
/// anything else answers not-found.
async fn dispatch(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let (route_label, response) = match state.router.dispatch(&method, &path) {
        Some(Match { route, params }) => {
            tracing::debug!(
                method = %method,
                path = %path,
                route = route.name,
                "Dispatching request"
            );
            let response = handlers::invoke(route.operation, &state, request, params).await;
            (route.name, response)
        }
        None if method == Method::GET => {
            tracing::debug!(path = %path, "No API route matched, trying static assets");
            let response = static_files::serve(&state.static_root, &path).await;
            ("StaticFallback", response)
        }
        None => {
            tracing::debug!(method = %method, path = %path, "No route matched");
            ("none", (StatusCode::NOT_FOUND, "no matching route").into_response())
        }
    };

    metrics::record_dispatch(method.as_str(), route_label, response.status().as_u16(), start);
    response
}

/// Wait for shutdown: Ctrl+C or the coordinator's broadcast signal.
async fn shutdown_signal(mut shutdown: broadcast::Receiver<()>) {
    tokio::select! {
        _ = tokio::signal::ctrl_c() => {}
        _ = shutdown.recv() => {}
    }
    tracing::info!("Shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use tower::ServiceExt;

    use crate::api::registry::default_inventory;

    fn test_app() -> AxumRouter {
        let state = AppState {
            router: Arc::new(Router::new(RouteTable::standard().unwrap())),
            registry: Arc::new(EnvironmentRegistry::new(Box::new(default_inventory))),
            static_root: Arc::new(PathBuf::from("/definitely/not/a/real/dir")),
        };
        HttpServer::build_app(&ServerConfig::default(), state)
    }

    fn request(method: Method, path: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(path)
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn test_version_dispatches_to_api() {
        let response = test_app()
            .oneshot(request(Method::GET, "/api/v1/version"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["api_version"], "1");
        assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
    }

    #[tokio::test]
    async fn test_constrained_miss_on_post_is_not_found() {
        // state outside {start|stop}: the route must not match, and POST
        // never reaches the static fallback.
        let response = test_app()
            .oneshot(request(Method::POST, "/api/v1/env/42/pause"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_unmatched_get_reaches_static_fallback() {
        // No file under the test root, so the fallback answers 404.
        let response = test_app()
            .oneshot(request(Method::GET, "/some/spa/route"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_power_toggle_round_trip() {
        let app = test_app();
        let response = app
            .clone()
            .oneshot(request(Method::POST, "/api/v1/env/alpha/stop"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["id"], "alpha");
        assert_eq!(json["state"], "stopped");
        assert_eq!(json["instances_affected"], 2);
    }
}
