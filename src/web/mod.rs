//! Web server module.

mod handlers;

use crate::config::ServerConfig;
use crate::forward::ChatForwarder;

use axum::{
    routing::{any, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Maximum accepted webhook body size.
pub const MAX_BODY_BYTES: usize = 1024 * 1024; // 1MB

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub forwarder: Arc<ChatForwarder>,
}

/// Web server for kumarelay.
pub struct Server {
    port: u16,
    state: AppState,
}

impl Server {
    /// Create a new server relaying to the configured webhook.
    pub fn new(config: &ServerConfig) -> Self {
        Self {
            port: config.http_port,
            state: AppState {
                forwarder: Arc::new(ChatForwarder::new(config.webhook_url.clone())),
            },
        }
    }

    /// Start the server on the configured port.
    pub async fn start(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let addr = SocketAddr::from(([0, 0, 0, 0], self.port));
        let router = routes(self.state.clone());

        tracing::info!("Web server listening on {}", addr);

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, router).await?;

        Ok(())
    }
}

/// Build the router with all routes.
pub fn routes(state: AppState) -> Router {
    Router::new()
        .route(
            "/webhook",
            post(handlers::handle_webhook).fallback(handlers::handle_method_not_allowed),
        )
        .route("/health", any(handlers::handle_health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
