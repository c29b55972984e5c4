mod smtp;
mod templates;

pub use smtp::{SmtpMailer, SmtpSettings};
pub use templates::{render, RenderedMail};
