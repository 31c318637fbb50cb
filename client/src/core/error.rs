//! Error types for the session core.
//!
//! Decoding, storage and network failures each get their own enum so callers
//! can tell an unreadable token apart from an unreachable backend. None of
//! them reach the UI on the expected authentication paths: the session store
//! turns them into "logged out". [`ClientError`] is what the command line
//! reports.

use thiserror::Error;

/// Failure to turn a bearer token into an identity.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("token must contain at least two dot-delimited segments")]
    Malformed,

    #[error("payload is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("payload is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("payload is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("payload is not a JSON object")]
    NotAnObject,
}

/// Failure of the persisted token slot.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("token storage unavailable: {0}")]
    Io(#[from] std::io::Error),

    #[error("token storage is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Failure of a call to the REST backend.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("backend rejected the request (status {status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("unexpected response body: {0}")]
    Body(#[from] serde_json::Error),

    #[error("invalid request: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("registration is not available for role {0}")]
    UnsupportedRole(String),

    #[error("backend response is missing its data")]
    MissingData,
}

impl ApiError {
    pub fn rejected(status: u16, message: impl Into<String>) -> Self {
        Self::Rejected {
            status,
            message: message.into(),
        }
    }
}

/// Failure of a command-line run: bad configuration or a failed backend call.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("configuration error: {0}")]
    Config(String),
}

impl ClientError {
    /// Process exit code for this failure
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) => 2,
            Self::Api(_) => 1,
        }
    }
}
