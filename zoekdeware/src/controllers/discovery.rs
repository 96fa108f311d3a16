//! Swipe-deck state machine.

use super::state::StateCell;
use crate::{
    api::{ApiClient, DiscoverEndpoint},
    config::DiscoverySettings,
    models::{
        DiscoverProfile, DiscoverResponse, Match, MatchesResponse, SwipeDirection, SwipeResponse,
    },
};
use std::sync::Arc;
use tokio::sync::watch;

/// Deck of candidates and everything shown around it
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DiscoveryState {
    /// Current page, in display order
    pub profiles: Vec<DiscoverProfile>,
    /// Index of the card on top; `0 <= cursor <= profiles.len()`
    pub cursor: usize,
    pub is_loading: bool,
    pub error: Option<String>,
    /// Match produced by the last mutual like, until dismissed
    pub pending_match: Option<Match>,
    pub matches: Vec<Match>,
    pub is_loading_matches: bool,
}

impl DiscoveryState {
    /// Card under the cursor; `None` is the empty-deck state, not an error
    pub fn current_profile(&self) -> Option<&DiscoverProfile> {
        self.profiles.get(self.cursor)
    }

    /// Cards not yet swiped
    pub fn remaining(&self) -> usize {
        self.profiles.len().saturating_sub(self.cursor)
    }
}

/// Discovery controller.
///
/// Loading is guarded by `is_loading`: a second `load_profiles` while one is
/// in flight returns immediately. A swipe that leaves the deck at or below the
/// prefetch threshold starts the next page on a background task and returns
/// without waiting for it.
#[derive(Clone)]
pub struct DiscoveryController {
    api: Arc<ApiClient>,
    settings: DiscoverySettings,
    state: StateCell<DiscoveryState>,
}

impl DiscoveryController {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self::with_settings(api, DiscoverySettings::default())
    }

    pub fn with_settings(api: Arc<ApiClient>, settings: DiscoverySettings) -> Self {
        Self {
            api,
            settings,
            state: StateCell::new(DiscoveryState::default()),
        }
    }

    pub fn state(&self) -> DiscoveryState {
        self.state.snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<DiscoveryState> {
        self.state.subscribe()
    }

    pub fn current_profile(&self) -> Option<DiscoverProfile> {
        self.state.with(|s| s.current_profile().cloned())
    }

    /// Fetch a fresh page, replacing the deck and resetting the cursor.
    /// No-op while a load is already in flight.
    pub async fn load_profiles(&self) {
        if self.begin_loading() {
            self.fetch_page().await;
        }
    }

    /// Send a decision on the current card.
    ///
    /// Without a current card this does nothing. On failure the cursor and the
    /// deck are untouched, so the same card can be swiped again.
    pub async fn swipe(&self, direction: SwipeDirection) {
        let Some(profile) = self.current_profile() else {
            log::debug!("Swipe ignored, deck is empty");
            return;
        };

        self.state.update(|s| s.error = None);

        let endpoint = DiscoverEndpoint::Swipe {
            swiped_id: profile.id.clone(),
            direction,
        };
        let response: SwipeResponse = match self.api.execute(&endpoint.into()).await {
            Ok(response) => response,
            Err(e) => {
                log::warn!("Swipe on {} failed: {e}", profile.id);
                self.state.update(|s| s.error = Some(e.user_message()));
                return;
            }
        };

        let remaining = self.state.update(|s| {
            if let Some(matched) = response.matched {
                log::info!("New match {}", matched.id);
                s.pending_match = Some(matched);
            }
            // A prefetch may have replaced the deck while the swipe was in flight
            if s.current_profile().is_some_and(|p| p.id == profile.id) {
                s.cursor += 1;
            }
            s.remaining()
        });

        if remaining <= self.settings.prefetch_threshold {
            self.prefetch();
        }
    }

    /// Clear the pending match; local only
    pub fn dismiss_match(&self) {
        self.state.update(|s| s.pending_match = None);
    }

    /// Replace the list of existing matches
    pub async fn load_matches(&self) {
        self.state.update(|s| {
            s.is_loading_matches = true;
            s.error = None;
        });

        let result = self
            .api
            .execute::<MatchesResponse>(&DiscoverEndpoint::Matches.into())
            .await;

        self.state.update(|s| {
            match result {
                Ok(response) => s.matches = response.matches,
                Err(e) => {
                    log::warn!("Loading matches failed: {e}");
                    s.error = Some(e.user_message());
                }
            }
            s.is_loading_matches = false;
        });
    }

    /// Start the next page in the background unless a load is in flight
    fn prefetch(&self) {
        if !self.begin_loading() {
            return;
        }
        log::debug!("Prefetching next discovery page");
        let controller = self.clone();
        tokio::spawn(async move {
            controller.fetch_page().await;
        });
    }

    /// Atomically claim the loading flag; false if it was already set
    fn begin_loading(&self) -> bool {
        self.state.update_if(|s| {
            if s.is_loading {
                return false;
            }
            s.is_loading = true;
            s.error = None;
            true
        })
    }

    async fn fetch_page(&self) {
        let endpoint = DiscoverEndpoint::Profiles {
            limit: self.settings.page_size,
        };
        let result = self.api.execute::<DiscoverResponse>(&endpoint.into()).await;

        self.state.update(|s| {
            match result {
                Ok(response) => {
                    log::debug!("Loaded {} candidates", response.profiles.len());
                    s.profiles = response.profiles;
                    s.cursor = 0;
                }
                Err(e) => {
                    log::warn!("Loading candidates failed: {e}");
                    s.error = Some(e.user_message());
                }
            }
            s.is_loading = false;
        });
    }
}
