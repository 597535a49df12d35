//! HTTP request handlers.

use super::{AppState, MAX_BODY_BYTES};
use crate::card::{transform, UptimeKumaNotification};

use axum::{
    body::{to_bytes, Body},
    extract::State,
    http::StatusCode,
    response::IntoResponse,
};

// ============================================================================
// Webhook
// ============================================================================

pub async fn handle_webhook(State(state): State<AppState>, body: Body) -> impl IntoResponse {
    let body = match to_bytes(body, MAX_BODY_BYTES).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::error!(
                limit_bytes = MAX_BODY_BYTES,
                "Error reading request body: {}",
                e
            );
            return (StatusCode::BAD_REQUEST, "Error reading request");
        }
    };

    tracing::debug!("Received webhook: {}", String::from_utf8_lossy(&body));

    match UptimeKumaNotification::from_json(&body) {
        Ok(notification) => {
            tracing::info!(
                monitor_id = notification.heartbeat.monitor_id,
                monitor_type = %notification.monitor.monitor_type,
                port = notification.monitor.port,
                status = notification.heartbeat.status,
                "Relaying notification for {}",
                notification.monitor.name
            );
            let message = transform(&notification);
            if let Err(e) = state.forwarder.deliver(&message).await {
                tracing::error!("Error sending to Google Chat: {}", e);
                return (StatusCode::INTERNAL_SERVER_ERROR, "Error forwarding message");
            }
        }
        Err(e) => {
            tracing::warn!("Error parsing Uptime Kuma notification: {}", e);
            let raw = String::from_utf8_lossy(&body);
            if let Err(e) = state.forwarder.deliver_raw(&raw).await {
                tracing::warn!("Error sending raw message to Google Chat: {}", e);
            }
        }
    }

    (StatusCode::OK, "OK")
}

pub async fn handle_method_not_allowed() -> impl IntoResponse {
    (StatusCode::METHOD_NOT_ALLOWED, "Method not allowed")
}

// ============================================================================
// Health
// ============================================================================

pub async fn handle_health() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}
