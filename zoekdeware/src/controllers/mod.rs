//! Stateful feature controllers.
//!
//! Each controller owns its state exclusively and publishes every transition
//! through a `tokio::sync::watch` channel: [`state`](SessionController::state)
//! returns a snapshot, `subscribe` returns a receiver that observes changes.
//! Failures never escape a controller method; they become a message in the
//! controller's `error` field and the previous data is left in place.
//!
//! ## Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use zoekdeware::api::ApiClient;
//! use zoekdeware::config::ApiConfig;
//! use zoekdeware::controllers::{DiscoveryController, SessionController};
//! use zoekdeware::credentials::{CredentialStore, FileStorage};
//! use zoekdeware::models::SwipeDirection;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let credentials = Arc::new(CredentialStore::new(Arc::new(FileStorage::open_default()?)));
//!     let api = Arc::new(ApiClient::new(&ApiConfig::default(), credentials.clone())?);
//!
//!     let session = SessionController::new(api.clone(), credentials);
//!     session.login("ada@example.com", "hunter22").await;
//!
//!     let discovery = DiscoveryController::new(api);
//!     discovery.load_profiles().await;
//!     discovery.swipe(SwipeDirection::Like).await;
//!     if let Some(matched) = discovery.state().pending_match {
//!         println!("It's a match with {}", matched.display_name);
//!     }
//!     Ok(())
//! }
//! ```

pub mod chat;
pub mod discovery;
pub mod profile;
pub mod session;
pub mod state;

pub use chat::{ChatDetailController, ChatDetailState, ChatListController, ChatListState};
pub use discovery::{DiscoveryController, DiscoveryState};
pub use profile::{ProfileController, ProfileState};
pub use session::{SessionController, SessionState};
pub use state::StateCell;
