#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod error;
pub mod extract;
mod fallback;
mod health;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use faultline_config::{Config, HealthConfig};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;

pub use error::{AppError, ErrorBody, ErrorDetails, ErrorPolicy};

/// HTTP server whose failures are rendered by the error boundary
///
/// Application routes are mounted with [`Server::merge`]. Every handler
/// may return [`AppError`]; unmatched paths and methods become a 404
/// `DomainError`. Handlers that use the [`extract`] extractors have their
/// rejections rendered the same way.
pub struct Server {
    routes: Router,
    listen_address: SocketAddr,
    health: HealthConfig,
    policy: Arc<ErrorPolicy>,
    not_found_message: Arc<str>,
}

impl Server {
    /// Build the server from configuration
    pub fn new(config: &Config) -> Self {
        Self {
            routes: Router::new(),
            listen_address: config.server.listen_address(),
            health: config.server.health.clone(),
            policy: Arc::new(ErrorPolicy::from_config(&config.errors)),
            not_found_message: Arc::from(config.errors.not_found_message.as_str()),
        }
    }

    /// Mount application routes
    #[must_use]
    pub fn merge(mut self, routes: Router) -> Self {
        self.routes = self.routes.merge(routes);
        self
    }

    /// Get the configured listen address
    pub const fn listen_address(&self) -> SocketAddr {
        self.listen_address
    }

    /// Assemble routes and middleware into a router
    ///
    /// Useful for testing when the caller manages the listener
    pub fn into_router(self) -> Router {
        let mut app = self.routes;

        if self.health.enabled {
            app = app.route(&self.health.path, axum::routing::get(health::health_handler));
        }

        let message = self.not_found_message;
        let not_found = move || {
            let message = Arc::clone(&message);
            async move { fallback::not_found(&message) }
        };

        // Applies to every route mounted so far, so it comes after health
        app = app.fallback(not_found.clone()).method_not_allowed_fallback(not_found);

        // Apply middleware layers (innermost first)

        // Panics become unclassified failures
        app = app.layer(CatchPanicLayer::custom(error::panic_response));

        // Failures are logged and rendered with the configured policy
        app = app.layer(axum::middleware::from_fn_with_state(
            self.policy,
            error::error_policy_middleware,
        ));

        // Tracing
        app.layer(TraceLayer::new_for_http())
    }

    /// Start serving requests
    ///
    /// Blocks until the cancellation token is triggered.
    ///
    /// # Errors
    ///
    /// Returns an error if binding the TCP listener or serving fails
    pub async fn serve(self, shutdown: tokio_util::sync::CancellationToken) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(self.listen_address).await?;
        let local_addr = listener.local_addr()?;
        tracing::info!(%local_addr, "server listening");

        axum::serve(listener, self.into_router())
            .with_graceful_shutdown(async move {
                shutdown.cancelled().await;
                tracing::info!("graceful shutdown initiated");
            })
            .await?;

        Ok(())
    }
}
