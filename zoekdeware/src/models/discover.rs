//! Discovery deck and swipe payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A candidate shown in the discovery deck
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscoverProfile {
    pub id: String,
    pub display_name: String,
    pub age: u32,
    pub bio: Option<String>,
    /// Photo URLs, primary first
    #[serde(default)]
    pub photos: Vec<String>,
    pub distance_km: Option<f64>,
}

/// One page of candidates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscoverResponse {
    pub profiles: Vec<DiscoverProfile>,
}

/// The user's decision on a candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SwipeDirection {
    Like,
    Pass,
    SuperLike,
}

impl fmt::Display for SwipeDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Like => "like",
            Self::Pass => "pass",
            Self::SuperLike => "super_like",
        };
        f.write_str(name)
    }
}

/// Body of `swipe`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwipeRequest {
    pub swiped_id: String,
    pub direction: SwipeDirection,
}

/// Result of a swipe; carries a match when the like was mutual
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwipeResponse {
    #[serde(rename = "match", default)]
    pub matched: Option<Match>,
}

/// Mutual-like result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    pub id: String,
    /// The counterpart's member id
    pub member_id: String,
    pub display_name: String,
    pub photo_url: Option<String>,
    pub matched_at: DateTime<Utc>,
}

/// Body of `matches`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchesResponse {
    pub matches: Vec<Match>,
}
