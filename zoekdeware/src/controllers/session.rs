//! Authentication state machine.

use super::state::StateCell;
use crate::{
    api::{ApiClient, AuthEndpoint},
    credentials::CredentialStore,
    errors::{ClientError, ClientResult},
    models::AuthResponse,
};
use std::sync::Arc;
use tokio::sync::watch;

/// Derived authentication status
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    /// True iff an access token was present at the last check or the last
    /// successful login/register
    pub is_authenticated: bool,
    pub is_loading: bool,
    pub error: Option<String>,
}

/// Owns login, registration and logout.
///
/// Authentication is derived from credential presence; the controller never
/// refreshes tokens on its own.
#[derive(Clone)]
pub struct SessionController {
    api: Arc<ApiClient>,
    credentials: Arc<CredentialStore>,
    state: StateCell<SessionState>,
}

impl SessionController {
    /// Create the controller and pick up any stored session
    pub fn new(api: Arc<ApiClient>, credentials: Arc<CredentialStore>) -> Self {
        let controller = Self {
            api,
            credentials,
            state: StateCell::new(SessionState::default()),
        };
        controller.check_existing();
        controller
    }

    pub fn state(&self) -> SessionState {
        self.state.snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.with(|s| s.is_authenticated)
    }

    /// Mark the session authenticated if an access token is stored.
    /// No server round trip.
    pub fn check_existing(&self) {
        if self.credentials.has_credentials() {
            log::info!("Resuming stored session");
            self.state.update(|s| s.is_authenticated = true);
        }
    }

    pub async fn login(&self, email: &str, password: &str) {
        self.authenticate(AuthEndpoint::Login {
            email: email.to_string(),
            password: password.to_string(),
        })
        .await;
    }

    pub async fn register(&self, email: &str, password: &str) {
        self.authenticate(AuthEndpoint::Register {
            email: email.to_string(),
            password: password.to_string(),
        })
        .await;
    }

    /// Exchange the stored refresh token for a new pair.
    ///
    /// Only runs when called; nothing in the client triggers it on expiry or
    /// on a 401.
    pub async fn refresh(&self) {
        match self.credentials.refresh_token() {
            Some(refresh_token) => {
                self.authenticate(AuthEndpoint::Refresh { refresh_token })
                    .await
            }
            None => {
                let error = ClientError::Precondition("No refresh token stored".to_string());
                self.state.update(|s| s.error = Some(error.user_message()));
            }
        }
    }

    /// Forget the session locally. Always ends unauthenticated.
    pub fn logout(&self) {
        let cleared = self.credentials.clear();
        log::info!("Logged out");

        self.state.update(|s| {
            s.is_authenticated = false;
            s.error = cleared
                .err()
                .map(|e| ClientError::from(e).user_message());
        });
    }

    async fn authenticate(&self, endpoint: AuthEndpoint) {
        self.state.update(|s| {
            s.is_loading = true;
            s.error = None;
        });

        let result = self.request_tokens(endpoint).await;

        self.state.update(|s| {
            match &result {
                Ok(_) => s.is_authenticated = true,
                Err(e) => s.error = Some(e.user_message()),
            }
            s.is_loading = false;
        });
    }

    async fn request_tokens(&self, endpoint: AuthEndpoint) -> ClientResult<AuthResponse> {
        let action = match endpoint {
            AuthEndpoint::Register { .. } => "Registration",
            AuthEndpoint::Login { .. } => "Login",
            AuthEndpoint::Refresh { .. } => "Token refresh",
        };

        let response: AuthResponse = self.api.execute(&endpoint.into()).await.map_err(|e| {
            log::warn!("{action} failed: {e}");
            e
        })?;
        self.credentials
            .store(&response.access_token, &response.refresh_token)?;

        log::info!("{action} succeeded");
        Ok(response)
    }
}
