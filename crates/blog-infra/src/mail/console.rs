//! Console mail transport - writes messages to the log instead of sending them.

use async_trait::async_trait;

use blog_core::ports::{MailError, MailTransport, OutgoingMail};

use super::mask_address;

/// Logs every message at INFO level (for development).
pub struct ConsoleMailTransport;

#[async_trait]
impl MailTransport for ConsoleMailTransport {
    async fn send(&self, mail: &OutgoingMail) -> Result<usize, MailError> {
        if mail.to.is_empty() {
            return Ok(0);
        }

        let recipients: Vec<String> = mail.to.iter().map(|a| mask_address(a)).collect();
        tracing::info!(
            from = %mail.from,
            to = ?recipients,
            subject = %mail.subject,
            body = %mail.body,
            "Console mail transport: message not delivered"
        );

        Ok(1)
    }
}
