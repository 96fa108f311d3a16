//! # ZoekDeware client core
//!
//! Session and data orchestration for the ZoekDeware dating client: one
//! authenticated request pipeline shared by every feature, a durable
//! credential store gating the session state machine, a declarative endpoint
//! catalog, and the discovery, chat and profile controllers built on top.
//!
//! ## Architecture
//!
//! Data flows one way:
//!
//! - A UI event calls a controller method
//! - The controller executes an [`api::Endpoint`] through [`api::ApiClient`],
//!   which reads the live access token from [`credentials::CredentialStore`]
//! - The result (a model or an [`api::ApiError`]) becomes a state transition
//! - Observers see the new state through the controller's `subscribe()` receiver
//!
//! The credential store and the API client are built once per process and
//! passed to controllers by `Arc`. Controllers live as long as their screen.
//!
//! ## Core Modules
//!
//! - [`config`]: Environment selection, pipeline deadlines, paging constants
//! - [`credentials`]: Secure storage capability and token pair store
//! - [`api`]: Endpoint catalog, request pipeline, transport seam
//! - [`models`]: Wire and domain entities
//! - [`controllers`]: Session, discovery, chat and profile state machines

pub mod api;
pub mod config;
pub mod controllers;
pub mod credentials;
pub mod errors;
pub mod models;

pub use api::{ApiClient, ApiError, ApiResult, Endpoint};
pub use config::{ApiConfig, DiscoverySettings, Environment};
pub use controllers::{
    ChatDetailController, ChatListController, DiscoveryController, ProfileController,
    SessionController,
};
pub use credentials::{CredentialStore, FileStorage, MemoryStorage, SecureStorage};
pub use errors::{ClientError, ClientResult};
