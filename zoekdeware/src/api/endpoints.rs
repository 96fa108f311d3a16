//! Endpoint catalog: one variant per server operation.
//!
//! Variants are plain data. Rendering a variant never performs I/O; the
//! same value always produces the same path, method and body.

use crate::models::{
    CredentialsRequest, ProfileUpdate, RefreshRequest, SendMessageRequest, SwipeDirection,
    SwipeRequest,
};
use serde::Serialize;
use serde_json::Value;
use std::fmt;

/// HTTP verb of an endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Authentication operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthEndpoint {
    Register { email: String, password: String },
    Login { email: String, password: String },
    Refresh { refresh_token: String },
}

/// Own-profile operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileEndpoint {
    Get,
    Update(ProfileUpdate),
}

/// Discovery operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiscoverEndpoint {
    Profiles {
        limit: u32,
    },
    Swipe {
        swiped_id: String,
        direction: SwipeDirection,
    },
    Matches,
}

/// Chat operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatEndpoint {
    Conversations,
    Conversation {
        id: String,
    },
    SendMessage {
        conversation_id: String,
        content: String,
    },
}

/// Any server operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    Auth(AuthEndpoint),
    Profile(ProfileEndpoint),
    Discover(DiscoverEndpoint),
    Chat(ChatEndpoint),
}

impl Endpoint {
    /// Path relative to the API base, including inline parameters
    pub fn path(&self) -> String {
        match self {
            Endpoint::Auth(AuthEndpoint::Register { .. }) => "/auth/register".to_string(),
            Endpoint::Auth(AuthEndpoint::Login { .. }) => "/auth/login".to_string(),
            Endpoint::Auth(AuthEndpoint::Refresh { .. }) => "/auth/refresh".to_string(),
            Endpoint::Profile(_) => "/profile".to_string(),
            Endpoint::Discover(DiscoverEndpoint::Profiles { limit }) => {
                format!("/discover?limit={limit}")
            }
            Endpoint::Discover(DiscoverEndpoint::Swipe { .. }) => "/swipe".to_string(),
            Endpoint::Discover(DiscoverEndpoint::Matches) => "/matches".to_string(),
            Endpoint::Chat(ChatEndpoint::Conversations) => "/conversations".to_string(),
            Endpoint::Chat(ChatEndpoint::Conversation { id }) => format!("/conversations/{id}"),
            Endpoint::Chat(ChatEndpoint::SendMessage {
                conversation_id, ..
            }) => format!("/conversations/{conversation_id}/messages"),
        }
    }

    pub fn method(&self) -> HttpMethod {
        match self {
            Endpoint::Auth(_) => HttpMethod::Post,
            Endpoint::Profile(ProfileEndpoint::Get) => HttpMethod::Get,
            Endpoint::Profile(ProfileEndpoint::Update(_)) => HttpMethod::Put,
            Endpoint::Discover(DiscoverEndpoint::Swipe { .. }) => HttpMethod::Post,
            Endpoint::Discover(_) => HttpMethod::Get,
            Endpoint::Chat(ChatEndpoint::SendMessage { .. }) => HttpMethod::Post,
            Endpoint::Chat(_) => HttpMethod::Get,
        }
    }

    /// JSON body, or `None` for operations without one
    pub fn body(&self) -> Result<Option<Value>, serde_json::Error> {
        match self {
            Endpoint::Auth(AuthEndpoint::Register { email, password })
            | Endpoint::Auth(AuthEndpoint::Login { email, password }) => {
                to_body(&CredentialsRequest {
                    email: email.clone(),
                    password: password.clone(),
                })
            }
            Endpoint::Auth(AuthEndpoint::Refresh { refresh_token }) => to_body(&RefreshRequest {
                refresh_token: refresh_token.clone(),
            }),
            Endpoint::Profile(ProfileEndpoint::Update(update)) => to_body(update),
            Endpoint::Discover(DiscoverEndpoint::Swipe {
                swiped_id,
                direction,
            }) => to_body(&SwipeRequest {
                swiped_id: swiped_id.clone(),
                direction: *direction,
            }),
            Endpoint::Chat(ChatEndpoint::SendMessage { content, .. }) => {
                to_body(&SendMessageRequest {
                    content: content.clone(),
                })
            }
            Endpoint::Profile(ProfileEndpoint::Get)
            | Endpoint::Discover(DiscoverEndpoint::Profiles { .. })
            | Endpoint::Discover(DiscoverEndpoint::Matches)
            | Endpoint::Chat(ChatEndpoint::Conversations)
            | Endpoint::Chat(ChatEndpoint::Conversation { .. }) => Ok(None),
        }
    }
}

fn to_body<T: Serialize>(value: &T) -> Result<Option<Value>, serde_json::Error> {
    serde_json::to_value(value).map(Some)
}

impl From<AuthEndpoint> for Endpoint {
    fn from(endpoint: AuthEndpoint) -> Self {
        Endpoint::Auth(endpoint)
    }
}

impl From<ProfileEndpoint> for Endpoint {
    fn from(endpoint: ProfileEndpoint) -> Self {
        Endpoint::Profile(endpoint)
    }
}

impl From<DiscoverEndpoint> for Endpoint {
    fn from(endpoint: DiscoverEndpoint) -> Self {
        Endpoint::Discover(endpoint)
    }
}

impl From<ChatEndpoint> for Endpoint {
    fn from(endpoint: ChatEndpoint) -> Self {
        Endpoint::Chat(endpoint)
    }
}
