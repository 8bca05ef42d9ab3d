//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum Router from the RestHandler's routes
//! - Wire up middleware (tracing, timeouts, request ID)
//! - Bind server to listener and shut down gracefully

use axum::Router;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::ServiceConfig;
use crate::dispatch::{RestHandler, RouteError};
use crate::lifecycle::shutdown;

/// HTTP server exposing a RestHandler's routes.
pub struct HttpServer {
    router: Router,
    config: ServiceConfig,
}

impl HttpServer {
    /// Build the server. Fails if a route pattern cannot be registered.
    pub fn new(config: ServiceConfig, handler: RestHandler) -> Result<Self, RouteError> {
        let routes = handler.into_router(None)?;
        let router = Self::build_router(&config, routes);
        Ok(Self { router, config })
    }

    /// Wrap the dispatch routes with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &ServiceConfig, routes: Router) -> Router {
        routes
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    }

    /// The fully layered router, for in-process testing.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until `shutdown_rx` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown_rx: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            request_timeout_secs = self.config.timeouts.request_secs,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown::wait(shutdown_rx))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }
}
