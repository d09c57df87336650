//! Error kinds for request processing and their HTTP response mapping.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::warning;

/// Everything that can go wrong while serving a request.
///
/// Per-artist resolution and track-fetch failures are swallowed upstream and
/// never reach this type; what does reach it is fatal to the request that
/// produced it.
#[derive(Debug, Error)]
pub enum Error {
    /// No session token, or the refresh exchange was rejected.
    #[error("authentication required: {0}")]
    AuthenticationRequired(String),

    /// CSRF state nonce on the OAuth callback did not match the session.
    #[error("state mismatch; possible CSRF attack")]
    StateMismatch,

    /// Non-success status from the catalog service or the vision API.
    #[error("upstream request failed with status {status}: {body}")]
    Upstream { status: u16, body: String },

    /// Rate-limit backoff cap exceeded; carries the server's wait estimate.
    #[error("rate limited by upstream; retry in roughly {wait_secs}s")]
    RateLimited { wait_secs: u64 },

    /// The vision model's response contained no parseable artist list.
    #[error("could not parse artist list from image: {0}")]
    ExtractionFailed(String),

    /// Malformed client input (wrong content type, oversized upload, ...).
    #[error("invalid request: {0}")]
    Validation(String),

    /// Transport-level failure talking to an external service.
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

impl Error {
    fn status(&self) -> StatusCode {
        match self {
            Error::AuthenticationRequired(_) => StatusCode::UNAUTHORIZED,
            Error::StateMismatch => StatusCode::BAD_REQUEST,
            Error::Upstream { .. } => StatusCode::BAD_GATEWAY,
            Error::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            Error::ExtractionFailed(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Error::Validation(_) => StatusCode::BAD_REQUEST,
            Error::Http(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

// The detail string crosses the boundary on purpose: this is an internal
// tool and the frontend surfaces it verbatim to the person debugging.
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        warning!("Request failed: {}", self);
        let status = self.status();
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
