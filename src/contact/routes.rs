//! HTTP surface of the contact endpoint

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use chrono::Utc;

use super::error::ContactError;
use super::notify::Notifier;
use super::store::ContactStore;
use super::submission::{ContactRequest, Envelope};

pub const CONTACT_PATH: &str = "/api/contact";

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<ContactStore>,
    pub notifier: Option<Arc<dyn Notifier>>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route(CONTACT_PATH, post(submit_contact))
        .with_state(state)
}

/// Store the submission, then try to notify. Notification failures are
/// logged and do not change the response.
async fn submit_contact(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<Envelope>, ContactError> {
    let request: ContactRequest = serde_json::from_slice(&body).map_err(ContactError::Malformed)?;
    let record = request.into_record(Utc::now())?;

    let total = state.store.append(&record).await?;
    log::info!("Stored contact from {} ({} total)", record.email, total);

    if let Some(notifier) = &state.notifier {
        match notifier.notify(&record).await {
            Ok(()) => log::info!("Notification sent for {}", record.email),
            Err(e) => log::warn!("Notification for {} failed: {}", record.email, e),
        }
    }

    Ok(Json(Envelope::ok()))
}
