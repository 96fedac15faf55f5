use reqwest::StatusCode;
use thiserror::Error;

/// Login failures. Any of these ends the run.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Login request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("Login rejected with status {}", .0.as_u16())]
    Status(StatusCode),

    #[error("Login response is not a valid token payload: {0}")]
    Decode(#[source] serde_json::Error),
}

/// Failure to push a single invoice. Recovered per invoice.
#[derive(Debug, Error)]
pub enum PushError {
    #[error("Invalid push URL: {0}")]
    InvalidUrl(#[source] url::ParseError),

    #[error("Push request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("Push rejected with status {}", .0.as_u16())]
    Status(StatusCode),
}

impl PushError {
    /// HTTP status of a rejected push, if the server answered.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            PushError::Status(status) => Some(*status),
            _ => None,
        }
    }
}

impl AuthError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            AuthError::Status(status) => Some(*status),
            _ => None,
        }
    }
}
