use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when dispatching a notification
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Dispatch rejected: {0}")]
    Rejected(String),
}

/// Outbound notification seam: the core only knows (recipient, message).
/// Delivery (email, SMS, push) happens behind whatever sits at the webhook.
#[async_trait]
pub trait NotificationDispatcher: Send + Sync {
    async fn dispatch(&self, recipient: &str, message: &str) -> Result<(), NotifyError>;
}

/// Dispatcher that POSTs notifications to a configured webhook
pub struct WebhookDispatcher {
    url: String,
    client: Client,
}

impl WebhookDispatcher {
    pub fn new(url: String) -> Result<Self, NotifyError> {
        let client = Client::builder().timeout(Duration::from_secs(10)).build()?;
        Ok(Self { url, client })
    }
}

#[async_trait]
impl NotificationDispatcher for WebhookDispatcher {
    async fn dispatch(&self, recipient: &str, message: &str) -> Result<(), NotifyError> {
        let payload = serde_json::json!({
            "recipient": recipient,
            "message": message,
            "sentAt": chrono::Utc::now(),
        });

        let response = self.client.post(&self.url).json(&payload).send().await?;

        if !response.status().is_success() {
            return Err(NotifyError::Rejected(format!(
                "Webhook returned {}",
                response.status()
            )));
        }

        tracing::debug!("Dispatched notification to {}", recipient);
        Ok(())
    }
}

/// Dispatcher used when no webhook is configured; logs and drops.
pub struct NullDispatcher;

#[async_trait]
impl NotificationDispatcher for NullDispatcher {
    async fn dispatch(&self, recipient: &str, message: &str) -> Result<(), NotifyError> {
        tracing::info!(
            "Notification dropped (no webhook configured): {} -> {}",
            recipient,
            message
        );
        Ok(())
    }
}
