use reqwest::StatusCode;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors observed by the product client. None of them are retried.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Server answered {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("Transport error: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("Failed to decode response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ClientError::Timeout(err.to_string())
        } else if err.is_decode() {
            ClientError::Decode(err.to_string())
        } else {
            ClientError::Transport(err)
        }
    }
}

impl ClientError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, ClientError::Timeout(_))
    }

    /// The HTTP status when the server answered with a failure.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
