//! Request pipeline error types.

use serde::Deserialize;
use thiserror::Error;

/// Errors produced by the request pipeline
#[derive(Debug, Error)]
pub enum ApiError {
    /// Endpoint rendered to something that is not a URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Transport failure: connection refused, timeout, unreadable response
    #[error("Invalid response from server: {0}")]
    InvalidResponse(String),

    /// Server answered outside 200..=299; `body` is left undecoded
    #[error("HTTP error: {status}")]
    Http { status: u16, body: Vec<u8> },

    /// Response body did not match the expected shape
    #[error("Decoding error: {0}")]
    Decoding(#[source] serde_json::Error),

    /// Request body could not be serialized
    #[error("Failed to encode request body: {0}")]
    Encoding(#[source] serde_json::Error),
}

/// Error envelope returned by the gateway
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: String,
}

impl ApiError {
    /// HTTP status, for `Http` errors
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Message from the gateway's `{"error": "..."}` body, if it has one
    pub fn server_message(&self) -> Option<String> {
        match self {
            ApiError::Http { body, .. } => serde_json::from_slice::<ErrorEnvelope>(body)
                .ok()
                .map(|envelope| envelope.error)
                .filter(|message| !message.trim().is_empty()),
            _ => None,
        }
    }

    /// Single human-readable message for display
    pub fn user_message(&self) -> String {
        self.server_message().unwrap_or_else(|| self.to_string())
    }
}

/// Result type for pipeline operations
pub type ApiResult<T> = Result<T, ApiError>;
