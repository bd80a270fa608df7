use async_trait::async_trait;
use serde_json::json;
use thiserror::Error;

use crate::config::MailConfig;
use crate::database::models::Contact;

#[derive(Debug, Error)]
pub enum MailError {
    #[error("Mail provider request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Mail provider rejected message: {0}")]
    Rejected(String),
}

#[derive(Debug, Clone)]
pub struct OutboundEmail {
    pub to: String,
    pub subject: String,
    pub html: String,
}

/// Delivery seam for the notification side-channel. Implementations are
/// best-effort, at-most-once; callers never await delivery on a response path.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: OutboundEmail) -> Result<(), MailError>;

    /// Whether the channel is configured at all; unconfigured channels skip
    /// the dispatch entirely.
    fn is_configured(&self) -> bool;
}

/// Transactional-mail HTTP API client.
pub struct HttpMailer {
    client: reqwest::Client,
    config: MailConfig,
}

impl HttpMailer {
    pub fn new(config: MailConfig) -> Self {
        Self { client: reqwest::Client::new(), config }
    }
}

#[async_trait]
impl Mailer for HttpMailer {
    async fn send(&self, email: OutboundEmail) -> Result<(), MailError> {
        let api_key = self.config.api_key.as_deref().unwrap_or_default();

        let response = self
            .client
            .post(&self.config.api_url)
            .bearer_auth(api_key)
            .json(&json!({
                "from": self.config.from_address,
                "to": [email.to],
                "subject": email.subject,
                "html": email.html,
            }))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(MailError::Rejected(format!("{}: {}", status, body)));
        }

        Ok(())
    }

    fn is_configured(&self) -> bool {
        self.config.api_key.is_some() && self.config.admin_address.is_some()
    }
}

/// Build the admin notification for a new lead.
pub fn contact_notification(admin_address: &str, contact: &Contact) -> OutboundEmail {
    let phone = contact.phone.as_deref().unwrap_or("-");
    let html = format!(
        "<h2>New contact enquiry</h2>\
         <p><strong>Name:</strong> {}</p>\
         <p><strong>Email:</strong> {}</p>\
         <p><strong>Phone:</strong> {}</p>\
         <p><strong>Message:</strong></p><p>{}</p>",
        escape_html(&contact.name),
        escape_html(&contact.email),
        escape_html(phone),
        escape_html(&contact.message),
    );

    OutboundEmail {
        to: admin_address.to_string(),
        subject: format!("New enquiry from {}", contact.name),
        html,
    }
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn lead(message: &str) -> Contact {
        Contact {
            id: Uuid::new_v4(),
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            phone: None,
            message: message.to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn notification_addresses_the_admin() {
        let email = contact_notification("owner@example.com", &lead("hello"));
        assert_eq!(email.to, "owner@example.com");
        assert!(email.subject.contains("Ada"));
        assert!(email.html.contains("hello"));
    }

    #[test]
    fn notification_escapes_markup() {
        let email = contact_notification("owner@example.com", &lead("<script>alert(1)</script>"));
        assert!(!email.html.contains("<script>"));
        assert!(email.html.contains("&lt;script&gt;"));
    }

    #[test]
    fn unconfigured_mailer_reports_unconfigured() {
        let mailer = HttpMailer::new(MailConfig {
            api_url: "https://api.resend.com/emails".to_string(),
            api_key: None,
            from_address: "noreply@example.com".to_string(),
            admin_address: None,
        });
        assert!(!mailer.is_configured());
    }
}
