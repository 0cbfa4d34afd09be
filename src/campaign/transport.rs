//! Mail transport seam and the SMTP implementation.

use async_trait::async_trait;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use secrecy::ExposeSecret;

use crate::config::SmtpConfig;
use crate::error::SendError;

/// Outbound mail transport. Safely callable once per contact per attempt.
#[async_trait]
pub trait MailTransport: Send + Sync {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), SendError>;
}

/// SMTP transport via lettre.
///
/// lettre's blocking transport runs inside `spawn_blocking` so the
/// dispatch loop stays async.
pub struct SmtpMailTransport {
    config: SmtpConfig,
}

impl SmtpMailTransport {
    pub fn new(config: SmtpConfig) -> Self {
        Self { config }
    }

    fn send_blocking(
        config: &SmtpConfig,
        to: &str,
        subject: &str,
        body: &str,
    ) -> Result<(), SendError> {
        let creds = Credentials::new(
            config.username.clone(),
            config.password.expose_secret().to_string(),
        );

        let transport = SmtpTransport::relay(&config.host)
            .map_err(|e| SendError::Permanent(format!("SMTP relay setup failed: {e}")))?
            .port(config.port)
            .credentials(creds)
            .build();

        let message = Message::builder()
            .from(config.from_address.parse().map_err(|e| {
                SendError::Permanent(format!("Invalid from address: {e}"))
            })?)
            .to(to
                .parse()
                .map_err(|e| SendError::Permanent(format!("Invalid recipient address: {e}")))?)
            .subject(subject)
            .body(body.to_string())
            .map_err(|e| SendError::Permanent(format!("Failed to build email: {e}")))?;

        transport
            .send(&message)
            .map(|_| ())
            .map_err(classify_smtp_error)?;

        tracing::info!("Email sent to {to}");
        Ok(())
    }
}

/// Map a lettre SMTP error onto the retry classification. Permanent SMTP
/// rejects (5xx, bad credentials) are not retried; connection and timeout
/// failures are.
fn classify_smtp_error(e: lettre::transport::smtp::Error) -> SendError {
    if e.is_permanent() {
        SendError::Permanent(format!("SMTP send rejected: {e}"))
    } else {
        SendError::Transient(format!("SMTP send failed: {e}"))
    }
}

#[async_trait]
impl MailTransport for SmtpMailTransport {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), SendError> {
        let config = self.config.clone();
        let to = to.to_string();
        let subject = subject.to_string();
        let body = body.to_string();

        tokio::task::spawn_blocking(move || Self::send_blocking(&config, &to, &subject, &body))
            .await
            .map_err(|e| SendError::Transient(format!("Send task panicked: {e}")))?
    }
}
