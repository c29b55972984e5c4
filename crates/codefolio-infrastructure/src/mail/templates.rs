use codefolio_domain::mail::MailMessage;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedMail {
    pub subject: String,
    pub text: String,
    pub html: String,
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

/// Plain-text and HTML bodies for a code mail
pub fn render(message: &MailMessage) -> RenderedMail {
    let headline = message.template.headline();

    let text = format!(
        "Hi {name},\n\n{headline}: {code}\n\nThe code expires in 10 minutes. \
         If you did not request it, you can ignore this email.\n",
        name = message.recipient_name,
        headline = headline,
        code = message.code,
    );

    let html = format!(
        r#"<!DOCTYPE html>
<html>
  <body style="font-family: sans-serif; color: #1f2328;">
    <p>Hi {name},</p>
    <h2>{headline}</h2>
    <p style="font-size: 28px; letter-spacing: 6px; font-weight: bold;">{code}</p>
    <p>The code expires in 10 minutes. If you did not request it, you can ignore this email.</p>
  </body>
</html>
"#,
        name = escape_html(&message.recipient_name),
        headline = escape_html(headline),
        code = escape_html(&message.code),
    );

    RenderedMail {
        subject: message.subject().to_string(),
        text,
        html,
    }
}
