use std::time::Duration;

use async_trait::async_trait;

use super::template::{render_confirmation, BookingConfirmation};
use super::{Notifier, NotifyError};

/// Posts the rendered e-mail as JSON (`from`, `to`, `subject`, `text`, `html`)
/// to an HTTP mail relay.
#[derive(Debug, Clone)]
pub struct WebhookNotifier {
    client: reqwest::Client,
    url: String,
    from: String,
}

impl WebhookNotifier {
    pub fn new(url: String, from: String, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!("Notifications: falling back to default HTTP client: {e}");
                reqwest::Client::new()
            });
        Self { client, url, from }
    }
}

#[async_trait]
impl Notifier for WebhookNotifier {
    async fn send_booking_confirmation(
        &self,
        to: &str,
        details: &BookingConfirmation,
    ) -> Result<(), NotifyError> {
        let message = render_confirmation(&self.from, to, details);
        let response = self.client.post(&self.url).json(&message).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(NotifyError::Rejected(status.as_u16()));
        }
        Ok(())
    }
}
