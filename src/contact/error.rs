//! Contact endpoint errors

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use super::submission::Envelope;

/// Failures of the backing file
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error on contact store: {0}")]
    Io(#[from] std::io::Error),

    #[error("Could not encode contact record: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Everything a submission can fail with
#[derive(Error, Debug)]
pub enum ContactError {
    #[error("Name and email are required")]
    MissingFields,

    #[error("Malformed request body: {0}")]
    Malformed(serde_json::Error),

    #[error(transparent)]
    Storage(#[from] StoreError),
}

impl ContactError {
    pub fn status(&self) -> StatusCode {
        match self {
            ContactError::MissingFields => StatusCode::BAD_REQUEST,
            ContactError::Malformed(_) | ContactError::Storage(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Message safe to show the visitor
    pub fn public_message(&self) -> String {
        match self {
            ContactError::MissingFields => self.to_string(),
            _ => "Internal server error".to_string(),
        }
    }
}

impl IntoResponse for ContactError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            log::error!("Contact submission failed: {}", self);
        } else {
            log::info!("Contact submission rejected: {}", self);
        }
        (status, Json(Envelope::failure(self.public_message()))).into_response()
    }
}
