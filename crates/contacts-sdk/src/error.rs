//! SDK error types.
//!
//! [`SdkError`] is the single error type returned by every fallible
//! operation in the SDK.

use contacts_models::ModelError;

/// Error type for all SDK operations.
#[derive(Debug, thiserror::Error)]
pub enum SdkError {
    /// Invalid configuration (e.g. a bad base URL).
    #[error("configuration error: {0}")]
    Config(String),

    /// Transport-level HTTP failure.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with an unexpected status.
    #[error("server returned {status}: {body}")]
    Status {
        /// Response status.
        status: reqwest::StatusCode,
        /// Response body, for diagnostics.
        body: String,
    },

    /// A redirect was expected but the response had no usable `Location`.
    #[error("missing or unexpected redirect: {0}")]
    Redirect(String),

    /// A value returned by the server failed model validation.
    #[error(transparent)]
    Model(#[from] ModelError),
}

impl SdkError {
    /// HTTP status of a [`SdkError::Status`] error.
    pub fn status(&self) -> Option<reqwest::StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
