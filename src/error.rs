//! CodeTrans Error Types
//!
//! Centralized error handling for the translation commands.

use crate::handler::MSG_COMMAND_FAILED;
use thiserror::Error;

/// Prefix that marks a translation result as a failure.
pub const ERROR_MARKER_PREFIX: &str = "// Error:";

/// Central error type for CodeTrans
#[derive(Error, Debug)]
pub enum TransError {
    #[error("No active editor.")]
    NoActiveEditor,

    #[error("No text selected.")]
    EmptySelection,

    #[error("Failed to reach the translation API: {0}")]
    TransportFailure(String),

    #[error("API Error: {status} - {reason}")]
    InvalidResponse { status: u16, reason: String },

    #[error("Unexpected error: {0}")]
    Unexpected(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Selection error: {0}")]
    Selection(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result type alias for CodeTrans operations
pub type TransResult<T> = Result<T, TransError>;

impl TransError {
    /// Message shown to the user when this error ends an invocation.
    pub fn user_message(&self) -> String {
        match self {
            TransError::TransportFailure(_) => {
                "Failed to reach the API! Check the connection or the API server.".to_string()
            }
            TransError::InvalidResponse { .. } => self.to_string(),
            TransError::NoActiveEditor | TransError::EmptySelection => self.to_string(),
            _ => MSG_COMMAND_FAILED.to_string(),
        }
    }

    /// Failure marker standing in for the translated text.
    pub fn marker(&self) -> String {
        match self {
            TransError::TransportFailure(_) => {
                format!("{} Failed to reach the translation API.", ERROR_MARKER_PREFIX)
            }
            TransError::InvalidResponse { .. } => format!(
                "{} The API did not return a valid translation.",
                ERROR_MARKER_PREFIX
            ),
            _ => format!("{} Translation failed.", ERROR_MARKER_PREFIX),
        }
    }

    /// Wrap a caught panic payload.
    pub fn from_panic(payload: &(dyn std::any::Any + Send)) -> Self {
        let message = payload
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "panic".to_string());
        TransError::Unexpected(message)
    }
}

/// Whether `text` is unusable as a translation result.
pub fn is_failure_marker(text: &str) -> bool {
    text.is_empty() || text.starts_with(ERROR_MARKER_PREFIX)
}

impl From<reqwest::Error> for TransError {
    fn from(err: reqwest::Error) -> Self {
        TransError::TransportFailure(err.to_string())
    }
}
