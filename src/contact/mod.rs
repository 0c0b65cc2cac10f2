//! Contact endpoint
//!
//! `POST /api/contact` appends the submission to a JSON file and, when SMTP
//! is configured, emails the team. The file is the source of truth; email is
//! best effort.

pub mod config;
pub mod error;
pub mod notify;
pub mod routes;
pub mod store;
pub mod submission;

use std::sync::Arc;

pub use config::{MailConfig, ServerConfig};
pub use error::{ContactError, StoreError};
pub use notify::{Notifier, NotifyError, SmtpNotifier};
pub use routes::{AppState, CONTACT_PATH, router};
pub use store::ContactStore;
pub use submission::{ContactRecord, ContactRequest, Envelope};

/// Build the app from config and serve until Ctrl-C
pub async fn serve(config: ServerConfig) -> std::io::Result<()> {
    let notifier: Option<Arc<dyn Notifier>> = match SmtpNotifier::from_config(&config.mail) {
        Ok(Some(notifier)) => {
            log::info!("Email notifications enabled");
            Some(Arc::new(notifier))
        }
        Ok(None) => {
            log::info!("Email notifications disabled (no SMTP host or recipient)");
            None
        }
        Err(e) => {
            log::warn!("Email notifications disabled: {}", e);
            None
        }
    };

    let state = AppState {
        store: Arc::new(ContactStore::new(&config.store)),
        notifier,
    };
    log::info!("Storing submissions in {}", state.store.path().display());

    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    log::info!("Contact endpoint listening on http://{}{}", config.bind, CONTACT_PATH);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
    log::info!("Shutting down");
}
