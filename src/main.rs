//! kumarelay - Uptime Kuma to Google Chat relay
//!
//! Receives Uptime Kuma webhook notifications and forwards them to a
//! Google Chat space as cardsV2 messages.

mod card;
mod config;
mod forward;
mod web;

use config::ServerConfig;
use web::Server;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env()
            .add_directive("kumarelay=info".parse()?))
        .init();

    // Load configuration
    let cfg = ServerConfig::load().inspect_err(|e| tracing::error!("{}", e))?;
    tracing::info!("Server starting on port {}", cfg.http_port);
    tracing::info!("Forwarding to Google Chat webhook: {}", cfg.masked_webhook_url());

    // Start web server
    let server = Server::new(&cfg);
    server.start().await?;

    Ok(())
}
