//! Error types for the Augur client.
//!
//! Only transport-level failures are errors here. Payload-level problems
//! (bad JSON, unexpected field types) never abort a stream: the decoder
//! drops or defaults those and keeps going.

use thiserror::Error;

/// Errors surfaced by the streaming client
#[derive(Debug, Error)]
pub enum AugurError {
    /// Request construction, connection, or body read failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server rejected the request with a non-success status
    #[error("Server error ({status}): {message}")]
    Status { status: u16, message: String },
}

impl AugurError {
    /// HTTP status code of the failure, when one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            AugurError::Http(e) => e.status().map(|s| s.as_u16()),
            AugurError::Status { status, .. } => Some(*status),
        }
    }

    /// Whether retrying the request could plausibly succeed.
    ///
    /// Connection failures, timeouts, and 5xx responses are retryable;
    /// 4xx responses are not.
    pub fn is_retryable(&self) -> bool {
        match self {
            AugurError::Http(e) => {
                e.is_connect()
                    || e.is_timeout()
                    || e.status().map_or(true, |s| s.is_server_error())
            }
            AugurError::Status { status, .. } => *status >= 500,
        }
    }
}
