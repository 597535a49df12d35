//! Forwarding module.
//!
//! Posts chat messages to the configured Google Chat webhook.

use crate::card::{ChatMessage, TextMessage};

use reqwest::StatusCode;
use serde::Serialize;
use thiserror::Error;

/// Forwarding error types.
#[derive(Error, Debug)]
pub enum ForwardError {
    #[error("error sending request: {0}")]
    Request(#[from] reqwest::Error),
    #[error("unexpected status code: {status}, body: {body}")]
    UnexpectedStatus { status: u16, body: String },
}

/// Relays messages to a single Google Chat webhook.
#[derive(Debug, Clone)]
pub struct ChatForwarder {
    client: reqwest::Client,
    webhook_url: String,
}

impl ChatForwarder {
    pub fn new(webhook_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            webhook_url: webhook_url.into(),
        }
    }

    /// Post a card message. Only a 200 response counts as delivered.
    pub async fn deliver(&self, message: &ChatMessage) -> Result<(), ForwardError> {
        if tracing::enabled!(tracing::Level::DEBUG) {
            if let Ok(json) = serde_json::to_string(message) {
                tracing::debug!("Sending to Google Chat: {}", json);
            }
        }

        self.post(message).await?;

        tracing::info!("Successfully sent to Google Chat");
        Ok(())
    }

    /// Post raw text as a plain `{"text": ...}` message.
    pub async fn deliver_raw(&self, text: &str) -> Result<(), ForwardError> {
        tracing::debug!("Sending raw text to Google Chat ({} bytes)", text.len());
        self.post(&TextMessage { text }).await
    }

    async fn post<T: Serialize + ?Sized>(&self, payload: &T) -> Result<(), ForwardError> {
        let response = self
            .client
            .post(&self.webhook_url)
            .json(payload)
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return Err(ForwardError::UnexpectedStatus {
                status: status.as_u16(),
                body,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Stub Google Chat endpoint for tests.

    use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
    use serde_json::Value;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Clone)]
    struct StubState {
        status: StatusCode,
        received: Arc<Mutex<Vec<Value>>>,
    }

    /// A local HTTP server that records every JSON body posted to it.
    pub struct StubChat {
        pub url: String,
        received: Arc<Mutex<Vec<Value>>>,
    }

    impl StubChat {
        /// Start a stub that answers every post with `status`.
        pub async fn start(status: StatusCode) -> Self {
            let received = Arc::new(Mutex::new(Vec::new()));
            let state = StubState {
                status,
                received: received.clone(),
            };

            let router = Router::new()
                .route("/hook", post(handle_post))
                .with_state(state);

            let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
            let addr = listener.local_addr().unwrap();
            tokio::spawn(async move {
                axum::serve(listener, router).await.unwrap();
            });

            Self {
                url: format!("http://{}/hook", addr),
                received,
            }
        }

        pub async fn received(&self) -> Vec<Value> {
            self.received.lock().await.clone()
        }
    }

    async fn handle_post(
        State(state): State<StubState>,
        Json(body): Json<Value>,
    ) -> (StatusCode, &'static str) {
        state.received.lock().await.push(body);
        (state.status, "stub")
    }
}

#[cfg(test)]
mod tests {
    use super::testing::StubChat;
    use super::*;
    use crate::card::{transform, UptimeKumaNotification};
    use axum::http::StatusCode as AxumStatus;
    use serde_json::json;

    /// A URL that will always refuse connections (port 1 is reserved and unbound)
    const UNREACHABLE_URL: &str = "http://127.0.0.1:1/hook";

    #[tokio::test]
    async fn test_deliver_posts_card_json() {
        let stub = StubChat::start(AxumStatus::OK).await;
        let forwarder = ChatForwarder::new(stub.url.clone());

        let mut notification = UptimeKumaNotification::default();
        notification.heartbeat.status = 1;
        notification.monitor.name = "API".to_string();
        let message = transform(&notification);

        forwarder.deliver(&message).await.unwrap();

        let received = stub.received().await;
        assert_eq!(received.len(), 1);
        assert_eq!(received[0], serde_json::to_value(&message).unwrap());
        assert_eq!(received[0]["cardsV2"][0]["card"]["header"]["title"], "Up - API");
    }

    #[tokio::test]
    async fn test_deliver_rejects_non_ok_status() {
        let stub = StubChat::start(AxumStatus::ACCEPTED).await;
        let forwarder = ChatForwarder::new(stub.url.clone());

        let message = transform(&UptimeKumaNotification::default());
        let err = forwarder.deliver(&message).await.unwrap_err();

        match err {
            ForwardError::UnexpectedStatus { status, body } => {
                assert_eq!(status, 202);
                assert_eq!(body, "stub");
            }
            other => panic!("expected UnexpectedStatus, got {other:?}"),
        }
        // Delivered once, never retried.
        assert_eq!(stub.received().await.len(), 1);
    }

    #[tokio::test]
    async fn test_deliver_connection_refused() {
        let forwarder = ChatForwarder::new(UNREACHABLE_URL);
        let message = transform(&UptimeKumaNotification::default());

        let err = forwarder.deliver(&message).await.unwrap_err();
        assert!(matches!(err, ForwardError::Request(_)), "{err:?}");
        assert!(err.to_string().starts_with("error sending request:"));
    }

    #[tokio::test]
    async fn test_deliver_raw_wraps_text() {
        let stub = StubChat::start(AxumStatus::OK).await;
        let forwarder = ChatForwarder::new(stub.url.clone());

        forwarder.deliver_raw("{not json").await.unwrap();

        assert_eq!(stub.received().await, vec![json!({"text": "{not json"})]);
    }

    #[tokio::test]
    async fn test_deliver_raw_reports_failure() {
        let stub = StubChat::start(AxumStatus::INTERNAL_SERVER_ERROR).await;
        let forwarder = ChatForwarder::new(stub.url.clone());

        let err = forwarder.deliver_raw("hello").await.unwrap_err();
        assert!(err.to_string().contains("500"));
    }
}
