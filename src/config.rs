//! Configuration module for kumarelay.
//!
//! Loads configuration from environment variables.

use std::env;
use thiserror::Error;

const WEBHOOK_URL_VAR: &str = "GOOGLE_CHAT_WEBHOOK_URL";
const PORT_VAR: &str = "PORT";

/// Configuration error types.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} environment variable is required")]
    Missing(&'static str),
    #[error("invalid port: {0}")]
    InvalidPort(String),
}

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// HTTP port for the webhook listener (default: 8080)
    pub http_port: u16,
    /// Google Chat incoming webhook URL that cards are relayed to
    pub webhook_url: String,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `GOOGLE_CHAT_WEBHOOK_URL`: destination webhook (required)
    /// - `PORT`: HTTP port (default: 8080)
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let webhook_url = lookup(WEBHOOK_URL_VAR)
            .filter(|url| !url.is_empty())
            .ok_or(ConfigError::Missing(WEBHOOK_URL_VAR))?;

        let http_port = match lookup(PORT_VAR).filter(|port| !port.is_empty()) {
            Some(port_str) => port_str
                .parse()
                .map_err(|_| ConfigError::InvalidPort(port_str))?,
            None => 8080,
        };

        Ok(Self {
            http_port,
            webhook_url,
        })
    }

    /// The webhook URL with its credentials hidden, for logging.
    pub fn masked_webhook_url(&self) -> String {
        mask_webhook_url(&self.webhook_url)
    }
}

/// Keep the first 20 characters of a webhook URL and hide the rest.
fn mask_webhook_url(url: &str) -> String {
    if url.chars().count() < 20 {
        return "***".to_string();
    }
    let prefix: String = url.chars().take(20).collect();
    format!("{}***", prefix)
}
