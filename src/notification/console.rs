use async_trait::async_trait;
use tracing::info;

use super::template::{render_confirmation, BookingConfirmation};
use super::{Notifier, NotifyError};

/// Logs the rendered e-mail instead of sending it. Development default.
#[derive(Debug, Clone)]
pub struct ConsoleNotifier {
    from: String,
}

impl ConsoleNotifier {
    pub fn new(from: String) -> Self {
        Self { from }
    }
}

#[async_trait]
impl Notifier for ConsoleNotifier {
    async fn send_booking_confirmation(
        &self,
        to: &str,
        details: &BookingConfirmation,
    ) -> Result<(), NotifyError> {
        let message = render_confirmation(&self.from, to, details);
        info!(
            to = %message.to,
            subject = %message.subject,
            "\n\n{}\n",
            message.text
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notification::template::tests::confirmation;

    #[tokio::test]
    async fn console_notifier_always_succeeds() {
        let notifier = ConsoleNotifier::new("box@himovie.local".to_string());
        let result = notifier
            .send_booking_confirmation("ada@example.com", &confirmation())
            .await;
        assert!(result.is_ok());
    }
}
