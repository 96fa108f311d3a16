//! Wire and domain models.
//!
//! Field names are snake_case on both sides of the wire; dates are
//! `DateTime<Utc>` and travel as RFC 3339 strings.

pub mod auth;
pub mod chat;
pub mod discover;
pub mod profile;

pub use auth::{AuthResponse, CredentialsRequest, RefreshRequest};
pub use chat::{
    Conversation, ConversationParticipant, ConversationResponse, ConversationsResponse, Message,
    SendMessageRequest,
};
pub use discover::{
    DiscoverProfile, DiscoverResponse, Match, MatchesResponse, SwipeDirection, SwipeRequest,
    SwipeResponse,
};
pub use profile::{Gender, ProfileUpdate, UserProfile};
