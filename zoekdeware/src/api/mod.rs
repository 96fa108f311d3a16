//! Request pipeline and endpoint catalog.
//!
//! Every server interaction is one [`Endpoint`] value. [`ApiClient`] renders
//! it to an HTTP request, attaches the bearer token when one is stored, sends
//! it through an [`HttpTransport`] and decodes the JSON reply.
//!
//! ## Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use zoekdeware::api::{ApiClient, DiscoverEndpoint, Endpoint};
//! use zoekdeware::config::ApiConfig;
//! use zoekdeware::credentials::{CredentialStore, MemoryStorage};
//! use zoekdeware::models::DiscoverResponse;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let credentials = Arc::new(CredentialStore::new(Arc::new(MemoryStorage::new())));
//!     let api = ApiClient::new(&ApiConfig::default(), credentials)?;
//!
//!     let page: DiscoverResponse = api
//!         .execute(&Endpoint::Discover(DiscoverEndpoint::Profiles { limit: 10 }))
//!         .await?;
//!     println!("{} candidates", page.profiles.len());
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod endpoints;
pub mod errors;
pub mod transport;

pub use client::ApiClient;
pub use endpoints::{
    AuthEndpoint, ChatEndpoint, DiscoverEndpoint, Endpoint, HttpMethod, ProfileEndpoint,
};
pub use errors::{ApiError, ApiResult};
pub use transport::{HttpRequest, HttpResponse, HttpTransport, ReqwestTransport};
