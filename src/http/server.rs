//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the static fallback and optional admin routes
//! - Wire up middleware (request ID, tracing, timeout, access log)
//! - Bind server to listener
//! - Graceful shutdown on the broadcast signal

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{middleware, Router};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::admin;
use crate::config::{Reloader, ServerSettings};
use crate::http::middleware::access_log;
use crate::http::static_files::serve_static;
use crate::net::TrustedProxies;
use crate::routing::Resolver;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub resolver: Resolver,
    pub reloader: Reloader,
    pub trusted_proxies: Arc<TrustedProxies>,
}

/// HTTP server for the static file host.
pub struct HttpServer {
    router: Router,
    state: AppState,
}

impl HttpServer {
    /// Create a new HTTP server serving the reloader's live config.
    pub fn new(settings: &ServerSettings, reloader: Reloader) -> Self {
        let resolver = Resolver::new(
            reloader.store().clone(),
            settings.default_root.clone(),
            settings.strict,
        );

        let state = AppState {
            resolver,
            reloader,
            trusted_proxies: Arc::new(settings.trusted_proxies.clone()),
        };

        let router = Self::build_router(settings, state.clone());
        Self { router, state }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(settings: &ServerSettings, state: AppState) -> Router {
        let mut router = Router::new();
        if settings.reload_endpoint {
            router = router.merge(admin::admin_router());
        }

        router
            .fallback(serve_static)
            .layer(middleware::from_fn_with_state(state.clone(), access_log))
            .with_state(state)
            .layer(TimeoutLayer::new(settings.request_timeout))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    }

    /// Run the server until `shutdown` fires, then drain in-flight requests.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            version = env!("CARGO_PKG_VERSION"),
            address = %addr,
            strict = self.state.resolver.is_strict(),
            default_root = %self.state.resolver.default_dir().display(),
            "Static server listening"
        );

        let app = self.router.into_make_service_with_connect_info::<SocketAddr>();

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
