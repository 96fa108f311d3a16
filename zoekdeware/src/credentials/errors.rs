//! Credential storage error types.

use thiserror::Error;

/// Errors raised by a secure storage backend
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem failure
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Stored data could not be parsed
    #[error("Corrupt credential file: {0}")]
    Corrupt(#[from] serde_json::Error),

    /// No per-user data directory is available on this platform
    #[error("No data directory available for credential storage")]
    NoDataDir,

    /// Internal lock was poisoned by a panicking writer
    #[error("Credential storage lock poisoned")]
    LockPoisoned,
}

/// Result type for credential storage operations
pub type StorageResult<T> = Result<T, StorageError>;
