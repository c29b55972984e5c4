use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::shared::DomainError;
use crate::user::Email;

/// Which transactional mail to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MailTemplate {
    AccountConfirmation,
    PasswordReset,
}

impl MailTemplate {
    pub fn subject(&self) -> &'static str {
        match self {
            MailTemplate::AccountConfirmation => {
                "Welcome to your Programmer Profile! Please confirm your Email"
            }
            MailTemplate::PasswordReset => "Reset your password",
        }
    }

    pub fn headline(&self) -> &'static str {
        match self {
            MailTemplate::AccountConfirmation => "Your 6-digit Verification Code",
            MailTemplate::PasswordReset => "Use this code to reset your password",
        }
    }
}

/// A code mail addressed to one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MailMessage {
    pub template: MailTemplate,
    pub to: Email,
    pub recipient_name: String,
    pub code: String,
}

impl MailMessage {
    pub fn new(
        template: MailTemplate,
        to: Email,
        recipient_name: impl Into<String>,
        code: impl Into<String>,
    ) -> Self {
        Self {
            template,
            to,
            recipient_name: recipient_name.into(),
            code: code.into(),
        }
    }

    pub fn subject(&self) -> &'static str {
        self.template.subject()
    }
}

/// Outbound mail transport
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, message: &MailMessage) -> Result<(), DomainError>;
}
