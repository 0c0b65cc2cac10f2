//! Best-effort email notification for new submissions

use async_trait::async_trait;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use thiserror::Error;

use super::config::MailConfig;
use super::submission::ContactRecord;

#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("Invalid mail address {0:?}")]
    Address(String),

    #[error("Could not build notification: {0}")]
    Build(String),

    #[error("SMTP delivery failed: {0}")]
    Transport(String),
}

/// Something that tells the team about a new submission
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, record: &ContactRecord) -> Result<(), NotifyError>;
}

pub struct SmtpNotifier {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    to: Mailbox,
}

impl SmtpNotifier {
    /// Build from config. `Ok(None)` when mail is not configured.
    pub fn from_config(config: &MailConfig) -> Result<Option<Self>, NotifyError> {
        let (Some(host), Some(to)) = (&config.host, &config.notify_to) else {
            return Ok(None);
        };

        let from = config
            .from
            .as_ref()
            .or(config.user.as_ref())
            .unwrap_or(to);
        let from = parse_mailbox(from)?;
        let to = parse_mailbox(to)?;

        let builder = if config.secure {
            AsyncSmtpTransport::<Tokio1Executor>::relay(host)
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host)
        }
        .map_err(|e| NotifyError::Transport(e.to_string()))?
        .port(config.port);

        let builder = match (&config.user, &config.password) {
            (Some(user), Some(password)) => {
                builder.credentials(Credentials::new(user.clone(), password.clone()))
            }
            _ => builder,
        };

        Ok(Some(Self {
            transport: builder.build(),
            from,
            to,
        }))
    }
}

#[async_trait]
impl Notifier for SmtpNotifier {
    async fn notify(&self, record: &ContactRecord) -> Result<(), NotifyError> {
        let mut builder = Message::builder()
            .from(self.from.clone())
            .to(self.to.clone())
            .subject(subject(record));
        if let Ok(reply_to) = record.email.parse::<Mailbox>() {
            builder = builder.reply_to(reply_to);
        }
        let message = builder
            .body(body(record))
            .map_err(|e| NotifyError::Build(e.to_string()))?;

        self.transport
            .send(message)
            .await
            .map_err(|e| NotifyError::Transport(e.to_string()))?;
        Ok(())
    }
}

fn parse_mailbox(address: &str) -> Result<Mailbox, NotifyError> {
    address
        .parse()
        .map_err(|_| NotifyError::Address(address.to_string()))
}

pub fn subject(record: &ContactRecord) -> String {
    format!("New Twinloop contact: {}", record.name)
}

pub fn body(record: &ContactRecord) -> String {
    format!(
        "Name: {}\nEmail: {}\nMessage: {}\nReceived: {}\n",
        record.name,
        record.email,
        record.message.as_deref().unwrap_or("(none)"),
        record.timestamp.to_rfc3339(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn mail_config() -> MailConfig {
        MailConfig {
            host: None,
            port: 587,
            secure: false,
            user: None,
            password: None,
            from: None,
            notify_to: None,
        }
    }

    #[test]
    fn test_disabled_without_host_or_recipient() {
        assert!(SmtpNotifier::from_config(&mail_config()).unwrap().is_none());

        let host_only = MailConfig {
            host: Some("smtp.example.com".to_string()),
            ..mail_config()
        };
        assert!(SmtpNotifier::from_config(&host_only).unwrap().is_none());
    }

    #[test]
    fn test_bad_recipient_rejected() {
        let config = MailConfig {
            host: Some("smtp.example.com".to_string()),
            notify_to: Some("not an address".to_string()),
            ..mail_config()
        };
        assert!(matches!(
            SmtpNotifier::from_config(&config),
            Err(NotifyError::Address(_))
        ));
    }

    #[test]
    fn test_body_lists_fields() {
        let record = ContactRecord {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            message: None,
            timestamp: Utc::now(),
        };
        let text = body(&record);
        assert!(text.contains("Email: ada@example.com"));
        assert!(text.contains("Message: (none)"));
        assert_eq!(subject(&record), "New Twinloop contact: Ada");
    }
}
