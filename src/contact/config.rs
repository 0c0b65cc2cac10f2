//! Server configuration from flags and environment

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Args, Parser};

#[derive(Parser, Debug, Clone)]
#[command(name = "twinloop-site", about = "Twinloop contact endpoint", version)]
pub struct ServerConfig {
    /// Address to listen on
    #[arg(long, env = "CONTACT_BIND", default_value = "127.0.0.1:3000")]
    pub bind: SocketAddr,

    /// JSON file submissions are appended to
    #[arg(long, env = "CONTACT_STORE", default_value = "data/contacts.json")]
    pub store: PathBuf,

    #[command(flatten)]
    pub mail: MailConfig,
}

/// SMTP settings. Mail is sent only when host and recipient are both set.
#[derive(Args, Debug, Clone)]
pub struct MailConfig {
    #[arg(long = "smtp-host", env = "SMTP_HOST")]
    pub host: Option<String>,

    #[arg(long = "smtp-port", env = "SMTP_PORT", default_value_t = 587)]
    pub port: u16,

    /// Implicit TLS (port 465 style) instead of STARTTLS
    #[arg(long = "smtp-secure", env = "SMTP_SECURE")]
    pub secure: bool,

    #[arg(long = "smtp-user", env = "SMTP_USER")]
    pub user: Option<String>,

    #[arg(long = "smtp-pass", env = "SMTP_PASS", hide_env_values = true)]
    pub password: Option<String>,

    /// Sender address; defaults to the SMTP user
    #[arg(long = "smtp-from", env = "SMTP_FROM")]
    pub from: Option<String>,

    #[arg(long = "notify-to", env = "CONTACT_NOTIFY_TO")]
    pub notify_to: Option<String>,
}

impl MailConfig {
    pub fn is_enabled(&self) -> bool {
        self.host.is_some() && self.notify_to.is_some()
    }
}
