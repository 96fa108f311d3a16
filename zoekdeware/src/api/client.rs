//! Authenticated request pipeline shared by every controller.

use super::{
    endpoints::Endpoint,
    errors::{ApiError, ApiResult},
    transport::{HttpRequest, HttpTransport, ReqwestTransport},
};
use crate::{config::ApiConfig, credentials::CredentialStore};
use reqwest::Url;
use serde::de::DeserializeOwned;
use std::sync::Arc;

/// Executes catalog endpoints against the configured API.
///
/// The client holds no per-request state. Concurrent calls race independently,
/// and nothing is retried, refreshed or deduplicated.
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    transport: Arc<dyn HttpTransport>,
    credentials: Arc<CredentialStore>,
}

impl ApiClient {
    /// Create a client using the reqwest transport
    ///
    /// # Errors
    ///
    /// * `ApiError::InvalidResponse` - HTTP client could not be built
    pub fn new(config: &ApiConfig, credentials: Arc<CredentialStore>) -> ApiResult<Self> {
        let transport = ReqwestTransport::new(config)?;
        Ok(Self::with_transport(
            config.base_url.clone(),
            Arc::new(transport),
            credentials,
        ))
    }

    /// Create a client over an explicit transport
    pub fn with_transport(
        base_url: impl Into<String>,
        transport: Arc<dyn HttpTransport>,
        credentials: Arc<CredentialStore>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            transport,
            credentials,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Credential store the bearer token is read from
    pub fn credentials(&self) -> &Arc<CredentialStore> {
        &self.credentials
    }

    /// Resolve an endpoint path under the base URL, keeping its path prefix
    pub fn resolve(&self, endpoint: &Endpoint) -> ApiResult<Url> {
        let raw = format!("{}{}", self.base_url.trim_end_matches('/'), endpoint.path());
        Url::parse(&raw).map_err(|e| ApiError::InvalidUrl(format!("{raw}: {e}")))
    }

    /// Render an endpoint into a request.
    ///
    /// The bearer header is attached iff an access token is stored right now.
    pub fn build_request(&self, endpoint: &Endpoint) -> ApiResult<HttpRequest> {
        let url = self.resolve(endpoint)?;

        let mut headers = vec![
            ("Content-Type".to_string(), "application/json".to_string()),
            ("Accept".to_string(), "application/json".to_string()),
        ];
        if let Some(token) = self.credentials.access_token() {
            headers.push(("Authorization".to_string(), format!("Bearer {token}")));
        }

        let body = endpoint
            .body()
            .and_then(|body| body.map(|value| serde_json::to_vec(&value)).transpose())
            .map_err(ApiError::Encoding)?;

        Ok(HttpRequest {
            method: endpoint.method(),
            url,
            headers,
            body,
        })
    }

    /// Execute an endpoint and decode its JSON body into `T`
    ///
    /// # Errors
    ///
    /// * `ApiError::InvalidUrl` - Endpoint did not render to a URL
    /// * `ApiError::InvalidResponse` - Transport failure or timeout
    /// * `ApiError::Http` - Non-2xx status, carrying the raw body
    /// * `ApiError::Decoding` - Body did not match `T`
    pub async fn execute<T: DeserializeOwned>(&self, endpoint: &Endpoint) -> ApiResult<T> {
        let body = self.send(endpoint).await?;
        serde_json::from_slice(&body).map_err(|e| {
            log::warn!("Failed to decode {} {}: {e}", endpoint.method(), endpoint.path());
            ApiError::Decoding(e)
        })
    }

    /// Execute an endpoint whose response body is ignored
    pub async fn execute_void(&self, endpoint: &Endpoint) -> ApiResult<()> {
        self.send(endpoint).await.map(|_| ())
    }

    async fn send(&self, endpoint: &Endpoint) -> ApiResult<Vec<u8>> {
        let request = self.build_request(endpoint)?;
        let method = request.method;

        log::debug!("{method} {}", request.url.path());
        let response = self.transport.send(request).await?;

        if !response.is_success() {
            log::warn!(
                "{method} {} failed with status {}",
                endpoint.path(),
                response.status
            );
            return Err(ApiError::Http {
                status: response.status,
                body: response.body,
            });
        }

        Ok(response.body)
    }
}
