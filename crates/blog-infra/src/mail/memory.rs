//! In-memory mailbox - keeps sent messages for inspection.

use async_trait::async_trait;
use tokio::sync::RwLock;

use blog_core::ports::{MailError, MailTransport, OutgoingMail};

/// Mail transport that records messages instead of delivering them.
pub struct InMemoryMailbox {
    outbox: RwLock<Vec<OutgoingMail>>,
}

impl InMemoryMailbox {
    pub fn new() -> Self {
        Self {
            outbox: RwLock::new(Vec::new()),
        }
    }

    /// Messages accepted so far, oldest first.
    pub async fn outbox(&self) -> Vec<OutgoingMail> {
        self.outbox.read().await.clone()
    }
}

impl Default for InMemoryMailbox {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MailTransport for InMemoryMailbox {
    async fn send(&self, mail: &OutgoingMail) -> Result<usize, MailError> {
        if mail.to.is_empty() {
            return Ok(0);
        }

        self.outbox.write().await.push(mail.clone());
        Ok(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mail(to: &[&str]) -> OutgoingMail {
        OutgoingMail {
            subject: "Hi".to_string(),
            body: "Body".to_string(),
            from: "blog@example.com".to_string(),
            to: to.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[tokio::test]
    async fn test_records_messages() {
        let mailbox = InMemoryMailbox::new();
        assert_eq!(mailbox.send(&mail(&["a@example.com"])).await.unwrap(), 1);
        assert_eq!(mailbox.outbox().await, vec![mail(&["a@example.com"])]);
    }

    #[tokio::test]
    async fn test_message_without_recipients_is_not_accepted() {
        let mailbox = InMemoryMailbox::new();
        assert_eq!(mailbox.send(&mail(&[])).await.unwrap(), 0);
        assert!(mailbox.outbox().await.is_empty());
    }
}
