//! Alert delivery adapters
//!
//! `SmtpNotifier` sends plain-text mail over STARTTLS; `LogNotifier` writes the
//! alert to the log and is the default when no mail relay is configured.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::{Mailbox, header::ContentType},
    transport::smtp::authentication::Credentials,
};
use tracing::{info, warn};

use crate::domain::{Notifier, PriceWatchError, PriceWatchResult};
use crate::infrastructure::config::{AlertConfig, NotificationChannel};

/// Sends alerts as e-mail through an SMTP relay
pub struct SmtpNotifier {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    sender: Mailbox,
    recipient: Mailbox,
}

impl SmtpNotifier {
    pub fn from_config(config: &AlertConfig) -> Result<Self> {
        let sender: Mailbox = config
            .sender
            .parse()
            .with_context(|| format!("Invalid sender address: {}", config.sender))?;
        let recipient: Mailbox = config
            .recipient
            .parse()
            .with_context(|| format!("Invalid recipient address: {}", config.recipient))?;

        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)
            .with_context(|| format!("Invalid SMTP relay: {}", config.smtp_host))?
            .port(config.smtp_port)
            .timeout(Some(Duration::from_secs(config.smtp_timeout_seconds)));

        if let (Some(username), Some(password)) = (&config.username, &config.password) {
            builder = builder.credentials(Credentials::new(username.clone(), password.clone()));
        } else {
            warn!("No SMTP credentials configured; sending unauthenticated");
        }

        info!(
            "SMTP notifier ready ({}:{} -> {})",
            config.smtp_host, config.smtp_port, config.recipient
        );

        Ok(Self {
            transport: builder.build(),
            sender,
            recipient,
        })
    }

    fn build_message(&self, subject: &str, body: &str) -> PriceWatchResult<Message> {
        Message::builder()
            .from(self.sender.clone())
            .to(self.recipient.clone())
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body.to_string())
            .map_err(PriceWatchError::notification)
    }
}

#[async_trait]
impl Notifier for SmtpNotifier {
    async fn notify(&self, subject: &str, body: &str) -> PriceWatchResult<()> {
        let message = self.build_message(subject, body)?;
        self.transport
            .send(message)
            .await
            .map_err(PriceWatchError::notification)?;
        info!("✉️ Alert '{}' sent to {}", subject, self.recipient);
        Ok(())
    }

    fn channel(&self) -> &'static str {
        "smtp"
    }
}

/// Writes alerts to the application log
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn notify(&self, subject: &str, body: &str) -> PriceWatchResult<()> {
        warn!(subject = %subject, "🔔 {}", body.trim_end());
        Ok(())
    }

    fn channel(&self) -> &'static str {
        "log"
    }
}

/// Build the notifier selected by the alert configuration
pub fn notifier_from_config(config: &AlertConfig) -> Result<Box<dyn Notifier>> {
    match config.channel {
        NotificationChannel::Log => Ok(Box::new(LogNotifier)),
        NotificationChannel::Smtp => Ok(Box::new(SmtpNotifier::from_config(config)?)),
    }
}
