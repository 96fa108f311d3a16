//! Credential store gating the authentication state machine.
//!
//! This module provides:
//! - A [`SecureStorage`] capability (get/set/delete plus all-or-nothing
//!   batches) behind which the concrete secret storage mechanism lives
//! - [`MemoryStorage`] for tests and ephemeral sessions
//! - [`FileStorage`], a private per-user file written atomically
//! - [`CredentialStore`], which keeps the access/refresh token pair consistent
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use zoekdeware::credentials::{CredentialStore, MemoryStorage};
//!
//! let store = CredentialStore::new(Arc::new(MemoryStorage::new()));
//! assert!(store.access_token().is_none());
//!
//! store.store("access", "refresh").unwrap();
//! assert_eq!(store.access_token().as_deref(), Some("access"));
//!
//! store.clear().unwrap();
//! assert!(!store.has_credentials());
//! ```

pub mod errors;
pub mod storage;
pub mod store;

pub use errors::{StorageError, StorageResult};
pub use storage::{FileStorage, MemoryStorage, SecureStorage};
pub use store::{ACCESS_TOKEN_KEY, CredentialStore, REFRESH_TOKEN_KEY, TokenKind};
