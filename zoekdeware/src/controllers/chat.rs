//! Conversation list and single-conversation controllers.

use super::state::StateCell;
use crate::{
    api::{ApiClient, ChatEndpoint},
    models::{Conversation, ConversationResponse, ConversationsResponse, Message},
};
use std::sync::Arc;
use tokio::sync::watch;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChatListState {
    pub conversations: Vec<Conversation>,
    pub is_loading: bool,
    pub error: Option<String>,
}

/// Conversation list; every load is a full snapshot
#[derive(Clone)]
pub struct ChatListController {
    api: Arc<ApiClient>,
    state: StateCell<ChatListState>,
}

impl ChatListController {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self {
            api,
            state: StateCell::new(ChatListState::default()),
        }
    }

    pub fn state(&self) -> ChatListState {
        self.state.snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<ChatListState> {
        self.state.subscribe()
    }

    pub async fn load_conversations(&self) {
        self.state.update(|s| {
            s.is_loading = true;
            s.error = None;
        });

        let result = self
            .api
            .execute::<ConversationsResponse>(&ChatEndpoint::Conversations.into())
            .await;

        self.state.update(|s| {
            match result {
                Ok(response) => s.conversations = response.conversations,
                Err(e) => {
                    log::warn!("Loading conversations failed: {e}");
                    s.error = Some(e.user_message());
                }
            }
            s.is_loading = false;
        });
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChatDetailState {
    pub conversation: Option<Conversation>,
    pub messages: Vec<Message>,
    pub is_loading: bool,
    pub is_sending: bool,
    pub error: Option<String>,
}

/// One conversation's header and history.
///
/// Sent messages appear only once the server has accepted them, with the
/// server's id and timestamp. There is no local echo.
#[derive(Clone)]
pub struct ChatDetailController {
    conversation_id: String,
    api: Arc<ApiClient>,
    state: StateCell<ChatDetailState>,
}

impl ChatDetailController {
    pub fn new(api: Arc<ApiClient>, conversation_id: impl Into<String>) -> Self {
        Self {
            conversation_id: conversation_id.into(),
            api,
            state: StateCell::new(ChatDetailState::default()),
        }
    }

    pub fn state(&self) -> ChatDetailState {
        self.state.snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<ChatDetailState> {
        self.state.subscribe()
    }

    /// Replace header and messages with the server's snapshot
    pub async fn load_conversation(&self) {
        self.state.update(|s| {
            s.is_loading = true;
            s.error = None;
        });

        let endpoint = ChatEndpoint::Conversation {
            id: self.conversation_id.clone(),
        };
        let result = self.api.execute::<ConversationResponse>(&endpoint.into()).await;

        self.state.update(|s| {
            match result {
                Ok(response) => {
                    s.conversation = Some(response.conversation);
                    s.messages = response.messages;
                }
                Err(e) => {
                    log::warn!("Loading conversation {} failed: {e}", self.conversation_id);
                    s.error = Some(e.user_message());
                }
            }
            s.is_loading = false;
        });
    }

    /// Send `content` with surrounding whitespace removed.
    ///
    /// Blank content is dropped without a request or a state change.
    pub async fn send_message(&self, content: &str) {
        let content = content.trim();
        if content.is_empty() {
            return;
        }

        self.state.update(|s| {
            s.is_sending = true;
            s.error = None;
        });

        let endpoint = ChatEndpoint::SendMessage {
            conversation_id: self.conversation_id.clone(),
            content: content.to_string(),
        };
        let result = self.api.execute::<Message>(&endpoint.into()).await;

        self.state.update(|s| {
            match result {
                Ok(message) => s.messages.push(message),
                Err(e) => {
                    log::warn!("Sending to {} failed: {e}", self.conversation_id);
                    s.error = Some(e.user_message());
                }
            }
            s.is_sending = false;
        });
    }
}
