//! Outbound email delivery.
//!
//! `SmtpMailer` sends through a configured relay; `LogMailer` stands in when
//! no relay is configured so development flows still complete.

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
#[cfg(test)]
use mockall::automock;

use crate::config::SmtpSettings;
use crate::errors::{AppError, AppResult};

/// A single plain-text email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub body: String,
}

impl EmailMessage {
    /// Password recovery email carrying the reset link.
    pub fn password_reset(to: &str, reset_url: &str) -> Self {
        Self {
            to: to.to_string(),
            subject: "TruGoods Password Recovery".to_string(),
            body: format!(
                "Your password reset link is:\n\n{}\n\n\
                 The link expires in 15 minutes. If you did not request this email, \
                 please ignore it.",
                reset_url
            ),
        }
    }
}

/// Email delivery abstraction.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, message: EmailMessage) -> AppResult<()>;
}

/// Mailer backed by an SMTP relay.
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailer {
    pub fn new(settings: &SmtpSettings) -> AppResult<Self> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&settings.host)
            .map_err(|e| AppError::Email(format!("Invalid SMTP relay: {}", e)))?
            .port(settings.port)
            .credentials(Credentials::new(
                settings.username.clone(),
                settings.password().to_string(),
            ))
            .build();

        let from = settings
            .from
            .parse::<Mailbox>()
            .map_err(|e| AppError::Email(format!("Invalid sender address: {}", e)))?;

        Ok(Self { transport, from })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, message: EmailMessage) -> AppResult<()> {
        let to = message
            .to
            .parse::<Mailbox>()
            .map_err(|e| AppError::Email(format!("Invalid recipient address: {}", e)))?;

        let email = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(&message.subject)
            .header(ContentType::TEXT_PLAIN)
            .body(message.body)
            .map_err(|e| AppError::Email(format!("Failed to build email: {}", e)))?;

        self.transport
            .send(email)
            .await
            .map_err(|e| AppError::Email(e.to_string()))?;

        tracing::info!(to = %message.to, subject = %message.subject, "Email sent");
        Ok(())
    }
}

/// Development fallback that logs instead of sending.
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, message: EmailMessage) -> AppResult<()> {
        tracing::info!(
            to = %message.to,
            subject = %message.subject,
            body = %message.body,
            "SMTP not configured, logging email instead of sending"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_email_contains_the_link() {
        let message =
            EmailMessage::password_reset("ada@example.com", "http://localhost:3000/reset/abc123");
        assert_eq!(message.to, "ada@example.com");
        assert!(message.subject.contains("Password Recovery"));
        assert!(message.body.contains("http://localhost:3000/reset/abc123"));
    }

    #[tokio::test]
    async fn log_mailer_always_succeeds() {
        let mailer = LogMailer;
        let message = EmailMessage::password_reset("ada@example.com", "http://x/reset/t");
        assert!(mailer.send(message).await.is_ok());
    }
}
