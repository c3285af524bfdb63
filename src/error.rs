//! Error types for interaction handling and Zoom provisioning.
//!
//! `InteractionError` is what the HTTP layer turns into a non-200 reply;
//! its Display text is the response body. `ZoomError` never reaches the
//! HTTP layer: it is rendered into a normal chat reply instead.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum InteractionError {
    #[error("{0}")]
    Authentication(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Internal(String),
}

impl InteractionError {
    pub fn status_code(&self) -> u16 {
        match self {
            InteractionError::Authentication(_) => 401,
            InteractionError::BadRequest(_) => 400,
            InteractionError::Internal(_) => 500,
        }
    }
}

#[derive(Debug, Error)]
pub enum ZoomError {
    #[error("{0}")]
    Secret(String),

    #[error("{0}")]
    Http(#[from] reqwest::Error),

    #[error("requestZoomToken: {0}")]
    TokenRequest(String),

    #[error("createMeeting: {status} - {body}")]
    MeetingRequest { status: u16, body: String },

    #[error("{0}")]
    Decode(#[from] serde_json::Error),
}
