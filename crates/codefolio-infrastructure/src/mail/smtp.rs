use async_trait::async_trait;
use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use std::time::Duration;
use tracing::{info, warn};

use super::templates::render;
use codefolio_domain::mail::{MailMessage, Mailer};
use codefolio_domain::shared::DomainError;

#[derive(Debug, Clone)]
pub struct SmtpSettings {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub timeout: Duration,
}

/// Code mails over authenticated SMTP
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailer {
    const IMPLICIT_TLS_PORT: u16 = 465;

    pub fn new(settings: SmtpSettings) -> Result<Self, DomainError> {
        let builder = if settings.port == Self::IMPLICIT_TLS_PORT {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&settings.host)
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&settings.host)
        }
        .map_err(|e| DomainError::Infrastructure(format!("Invalid SMTP host: {}", e)))?;

        let transport = builder
            .port(settings.port)
            .credentials(Credentials::new(
                settings.username.clone(),
                settings.password,
            ))
            .timeout(Some(settings.timeout))
            .build();

        let from = format!("No Reply <{}>", settings.username)
            .parse::<Mailbox>()
            .map_err(|e| DomainError::Infrastructure(format!("Invalid sender address: {}", e)))?;

        Ok(Self { transport, from })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, message: &MailMessage) -> Result<(), DomainError> {
        let rendered = render(message);

        let to = Mailbox::new(
            Some(message.recipient_name.clone()),
            message
                .to
                .as_str()
                .parse()
                .map_err(|e| DomainError::InvalidInput(format!("Invalid recipient: {}", e)))?,
        );

        let email = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(rendered.subject)
            .multipart(MultiPart::alternative_plain_html(rendered.text, rendered.html))
            .map_err(|e| DomainError::Infrastructure(format!("Failed to build email: {}", e)))?;

        match self.transport.send(email).await {
            Ok(_) => {
                info!("✉️  {:?} mail sent to {}", message.template, message.to.as_str());
                Ok(())
            }
            Err(e) => {
                warn!("Failed to send {:?} mail: {}", message.template, e);
                Err(DomainError::Infrastructure(format!("Failed to send email: {}", e)))
            }
        }
    }
}
