//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router with a single catch-all handler
//! - Wire up middleware (tracing, timeout, request ID)
//! - Dispatch every request to the composed handler chain
//! - Serve until the shutdown future resolves

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    extract::State,
    http::Request,
    response::Response,
    routing::any,
    Router,
};
use tokio::net::TcpListener;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::TimeoutConfig;
use crate::routing::HandlerChain;

/// Application state injected into handlers.
#[derive(Clone)]
struct AppState {
    chain: Arc<HandlerChain>,
}

/// HTTP front end for the handler chain.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    pub fn new(chain: HandlerChain, timeouts: &TimeoutConfig) -> Self {
        let state = AppState {
            chain: Arc::new(chain),
        };
        Self {
            router: Self::build_router(state, Duration::from_secs(timeouts.request_secs)),
        }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(state: AppState, request_timeout: Duration) -> Router {
        Router::new()
            .route("/", any(dispatch))
            .route("/{*path}", any(dispatch))
            .with_state(state)
            .layer(TimeoutLayer::new(request_timeout))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    }

    /// The fully layered router, e.g. for driving it without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server, accepting connections on the given listener.
    ///
    /// In-flight requests are drained once `shutdown` resolves.
    pub async fn run<F>(self, listener: TcpListener, shutdown: F) -> Result<(), std::io::Error>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown)
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Catch-all handler: every method, every path.
async fn dispatch(State(state): State<AppState>, request: Request<Body>) -> Response {
    state.chain.handle(&request)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::{PathRoute, RouteTable};
    use axum::http::{header, Method, StatusCode};
    use tower::ServiceExt;

    fn server() -> HttpServer {
        let table = RouteTable::from_routes([PathRoute::new("/foo", "https://example.com/foo").unwrap()]);
        let chain = HandlerChain::default().with_stage(table, "test");
        HttpServer::new(chain, &TimeoutConfig::default())
    }

    #[tokio::test]
    async fn test_redirect_any_method() {
        for method in [Method::GET, Method::POST, Method::HEAD] {
            let req = Request::builder()
                .method(method)
                .uri("/foo")
                .body(Body::empty())
                .unwrap();
            let res = server().router().oneshot(req).await.unwrap();

            assert_eq!(res.status(), StatusCode::MOVED_PERMANENTLY);
            assert_eq!(res.headers()[header::LOCATION], "https://example.com/foo");
        }
    }

    #[tokio::test]
    async fn test_unknown_path_gets_greeting() {
        let req = Request::builder().uri("/bar/baz").body(Body::empty()).unwrap();
        let res = server().router().oneshot(req).await.unwrap();

        assert_eq!(res.status(), StatusCode::OK);
        let body = axum::body::to_bytes(res.into_body(), 1024).await.unwrap();
        assert_eq!(&body[..], b"Hello, world!\n");
    }

    #[tokio::test]
    async fn test_root_path_served() {
        let req = Request::builder().uri("/").body(Body::empty()).unwrap();
        let res = server().router().oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_run_returns_when_shutdown_resolves() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let (tx, rx) = tokio::sync::oneshot::channel::<()>();

        let handle = tokio::spawn(server().run(listener, async move {
            let _ = rx.await;
        }));
        tx.send(()).unwrap();

        let result = tokio::time::timeout(Duration::from_secs(5), handle)
            .await
            .expect("server did not stop")
            .unwrap();
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_request_id_propagated() {
        let req = Request::builder().uri("/foo").body(Body::empty()).unwrap();
        let res = server().router().oneshot(req).await.unwrap();
        assert!(res.headers().contains_key("x-request-id"));
    }
}
