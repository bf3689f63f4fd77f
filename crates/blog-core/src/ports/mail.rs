//! Mail transport port.

use async_trait::async_trait;

/// A plain-text message ready to hand to a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMail {
    pub subject: String,
    pub body: String,
    pub from: String,
    pub to: Vec<String>,
}

/// Mail transport trait - abstraction over delivery backends (SMTP, console, memory).
#[async_trait]
pub trait MailTransport: Send + Sync {
    /// Deliver a message. Returns the number of messages the backend accepted.
    async fn send(&self, mail: &OutgoingMail) -> Result<usize, MailError>;
}

/// Mail delivery errors.
#[derive(Debug, thiserror::Error)]
pub enum MailError {
    #[error("Invalid address: {0}")]
    Address(String),

    #[error("Failed to build message: {0}")]
    Message(String),

    #[error("Transport failed: {0}")]
    Transport(String),
}
