//! SMTP mail transport using lettre.

use async_trait::async_trait;
use lettre::message::Mailbox;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use blog_core::ports::{MailError, MailTransport, OutgoingMail};

use super::{SmtpConfig, mask_address};

/// Delivers mail through an SMTP relay using STARTTLS.
pub struct SmtpMailTransport {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpMailTransport {
    pub fn new(config: &SmtpConfig) -> Result<Self, MailError> {
        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
            .map_err(|e| MailError::Transport(e.to_string()))?
            .port(config.port);

        if let (Some(username), Some(password)) = (&config.username, &config.password) {
            builder = builder.credentials(Credentials::new(username.clone(), password.clone()));
        }

        tracing::info!(host = %config.host, port = config.port, "SMTP transport configured");

        Ok(Self {
            mailer: builder.build(),
        })
    }
}

fn parse_mailbox(address: &str) -> Result<Mailbox, MailError> {
    address
        .parse::<Mailbox>()
        .map_err(|e| MailError::Address(format!("{}: {}", mask_address(address), e)))
}

#[async_trait]
impl MailTransport for SmtpMailTransport {
    async fn send(&self, mail: &OutgoingMail) -> Result<usize, MailError> {
        if mail.to.is_empty() {
            return Ok(0);
        }

        let mut builder = Message::builder()
            .from(parse_mailbox(&mail.from)?)
            .subject(mail.subject.clone())
            .header(ContentType::TEXT_PLAIN);

        for recipient in &mail.to {
            builder = builder.to(parse_mailbox(recipient)?);
        }

        let message = builder
            .body(mail.body.clone())
            .map_err(|e| MailError::Message(e.to_string()))?;

        self.mailer
            .send(message)
            .await
            .map_err(|e| MailError::Transport(e.to_string()))?;

        Ok(1)
    }
}
