//! Own-profile controller.

use super::state::StateCell;
use crate::{
    api::{ApiClient, ProfileEndpoint},
    models::{ProfileUpdate, UserProfile},
};
use std::sync::Arc;
use tokio::sync::watch;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileState {
    pub profile: Option<UserProfile>,
    pub is_loading: bool,
    pub error: Option<String>,
}

#[derive(Clone)]
pub struct ProfileController {
    api: Arc<ApiClient>,
    state: StateCell<ProfileState>,
}

impl ProfileController {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self {
            api,
            state: StateCell::new(ProfileState::default()),
        }
    }

    pub fn state(&self) -> ProfileState {
        self.state.snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<ProfileState> {
        self.state.subscribe()
    }

    pub async fn load_profile(&self) {
        self.run(ProfileEndpoint::Get).await;
    }

    /// Send the set fields and adopt the server's profile on success
    pub async fn update_profile(&self, update: ProfileUpdate) {
        self.run(ProfileEndpoint::Update(update)).await;
    }

    async fn run(&self, endpoint: ProfileEndpoint) {
        self.state.update(|s| {
            s.is_loading = true;
            s.error = None;
        });

        let result = self.api.execute::<UserProfile>(&endpoint.into()).await;

        self.state.update(|s| {
            match result {
                Ok(profile) => s.profile = Some(profile),
                Err(e) => {
                    log::warn!("Profile request failed: {e}");
                    s.error = Some(e.user_message());
                }
            }
            s.is_loading = false;
        });
    }
}
