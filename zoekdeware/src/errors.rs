//! Errors surfaced by controller operations.

use crate::{api::ApiError, credentials::StorageError};
use thiserror::Error;

/// A controller operation failed at the pipeline or at the credential store
#[derive(Debug, Error)]
pub enum ClientError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("Credential storage error: {0}")]
    Storage(#[from] StorageError),

    /// Operation needs state the session does not have
    #[error("{0}")]
    Precondition(String),
}

impl ClientError {
    /// Single human-readable message stored in controller state
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Api(e) => e.user_message(),
            other => other.to_string(),
        }
    }
}

/// Result type for controller operations
pub type ClientResult<T> = Result<T, ClientError>;
