//! Access/refresh token pair on top of a [`SecureStorage`] backend.

use super::{
    errors::{StorageError, StorageResult},
    storage::SecureStorage,
};
use std::sync::{Arc, Mutex};

/// Storage key of the access token
pub const ACCESS_TOKEN_KEY: &str = "com.zoekdeware.accessToken";

/// Storage key of the refresh token
pub const REFRESH_TOKEN_KEY: &str = "com.zoekdeware.refreshToken";

/// Which of the two stored secrets to read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Access,
    Refresh,
}

impl TokenKind {
    fn key(self) -> &'static str {
        match self {
            Self::Access => ACCESS_TOKEN_KEY,
            Self::Refresh => REFRESH_TOKEN_KEY,
        }
    }
}

/// Durable credential store.
///
/// All operations run under one lock, so a reader never observes half of a
/// pair being written. Read failures are reported as absence; write failures
/// propagate.
pub struct CredentialStore {
    storage: Arc<dyn SecureStorage>,
    lock: Mutex<()>,
}

impl CredentialStore {
    /// Create a store over a storage backend
    pub fn new(storage: Arc<dyn SecureStorage>) -> Self {
        Self {
            storage,
            lock: Mutex::new(()),
        }
    }

    /// Read one secret; any backend failure reads as `None`
    pub fn get(&self, kind: TokenKind) -> Option<String> {
        let Ok(_guard) = self.lock.lock() else {
            log::warn!("Credential lock poisoned, treating {kind:?} token as absent");
            return None;
        };

        match self.storage.get(kind.key()) {
            Ok(value) => value,
            Err(e) => {
                log::warn!("Failed to read {kind:?} token: {e}");
                None
            }
        }
    }

    pub fn access_token(&self) -> Option<String> {
        self.get(TokenKind::Access)
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.get(TokenKind::Refresh)
    }

    /// Whether an access token is currently stored
    pub fn has_credentials(&self) -> bool {
        self.access_token().is_some()
    }

    /// Persist both tokens in one backend write.
    ///
    /// # Errors
    ///
    /// Returns the backend error; the previously stored pair is then intact.
    pub fn store(&self, access_token: &str, refresh_token: &str) -> StorageResult<()> {
        let _guard = self.lock.lock().map_err(|_| StorageError::LockPoisoned)?;

        self.storage
            .set_many(&[
                (ACCESS_TOKEN_KEY, access_token),
                (REFRESH_TOKEN_KEY, refresh_token),
            ])
            .inspect_err(|e| log::error!("Failed to store credentials: {e}"))
    }

    /// Remove both tokens in one backend write.
    ///
    /// # Errors
    ///
    /// Returns the backend error; the stored pair is then intact.
    pub fn clear(&self) -> StorageResult<()> {
        let _guard = self.lock.lock().map_err(|_| StorageError::LockPoisoned)?;

        self.storage
            .delete_many(&[ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY])
            .inspect_err(|e| log::error!("Failed to clear credentials: {e}"))
    }
}
