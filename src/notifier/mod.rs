//! Email delivery of summaries.
//!
//! The notifier only signals success or failure; logging and retry decisions
//! (there are none) belong to the caller.

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

use crate::config::SmtpConfig;

#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("smtp configuration is incomplete")]
    Incomplete,
    #[error("invalid address: {0}")]
    Address(String),
    #[error("failed to build smtp transport: {0}")]
    Transport(String),
    #[error("smtp send rejected: {0}")]
    Rejected(String),
}

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), DeliveryError>;
}

/// Sends plain-text mail over an authenticated STARTTLS session.
pub struct SmtpNotifier {
    config: SmtpConfig,
}

impl SmtpNotifier {
    pub fn new(config: SmtpConfig) -> Self {
        Self { config }
    }

    fn credentials(&self) -> Result<(String, String), DeliveryError> {
        match (&self.config.username, &self.config.password) {
            (Some(username), Some(password)) if !self.config.host.is_empty() => {
                Ok((username.clone(), password.clone()))
            }
            _ => Err(DeliveryError::Incomplete),
        }
    }
}

#[async_trait]
impl Notifier for SmtpNotifier {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), DeliveryError> {
        let (username, password) = self.credentials()?;
        let from = self.config.from.as_deref().unwrap_or(&username);

        let email = Message::builder()
            .from(
                from.parse()
                    .map_err(|_| DeliveryError::Address(from.to_string()))?,
            )
            .to(to
                .parse()
                .map_err(|_| DeliveryError::Address(to.to_string()))?)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body.to_string())
            .map_err(|e| DeliveryError::Rejected(e.to_string()))?;

        let mailer: AsyncSmtpTransport<Tokio1Executor> =
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.config.host)
                .map_err(|e| DeliveryError::Transport(e.to_string()))?
                .port(self.config.port)
                .credentials(Credentials::new(username, password))
                .build();

        debug!("Sending email to {} via {}", to, self.config.host);
        mailer
            .send(email)
            .await
            .map_err(|e| DeliveryError::Rejected(e.to_string()))?;

        info!("Email sent to {}", to);
        Ok(())
    }
}

/// Plain-text body for a summary email.
pub fn format_summary_email(summary: &str, transcript_path: &Path) -> String {
    format!(
        "Here's your conversation summary:\n\n{}\n\nThe full transcript is available at: {}\n",
        summary,
        transcript_path.display()
    )
}
