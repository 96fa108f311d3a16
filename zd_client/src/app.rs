//! Wires the client core into one set of controllers and drives them from
//! line commands.

use crate::commands::{COMMANDS_HELP, Command};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use zoekdeware::models::{Conversation, DiscoverProfile, Match, Message, ProfileUpdate, UserProfile};
use zoekdeware::{
    ApiClient, ChatDetailController, ChatListController, CredentialStore, DiscoveryController,
    ProfileController, SessionController,
};

/// Process-lifetime services plus one controller per screen.
pub struct App {
    api: Arc<ApiClient>,
    session: SessionController,
    discovery: DiscoveryController,
    chats: ChatListController,
    chat: Option<ChatDetailController>,
    profile: ProfileController,
}

impl App {
    pub fn new(api: Arc<ApiClient>, credentials: Arc<CredentialStore>) -> Self {
        Self {
            session: SessionController::new(api.clone(), credentials),
            discovery: DiscoveryController::new(api.clone()),
            chats: ChatListController::new(api.clone()),
            chat: None,
            profile: ProfileController::new(api.clone()),
            api,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    /// Run one command and return the text to print.
    ///
    /// Returns `None` when the command asks to quit.
    pub async fn dispatch(&mut self, command: Command) -> Option<String> {
        let output = match command {
            Command::Quit => return None,
            Command::Help => COMMANDS_HELP.to_string(),
            Command::Status => self.status(),
            Command::Login { email, password } => {
                self.session.login(&email, &password).await;
                self.session_result("Logged in")
            }
            Command::Register { email, password } => {
                self.session.register(&email, &password).await;
                self.session_result("Registered")
            }
            Command::Logout => {
                self.session.logout();
                self.chat = None;
                self.session_result("Logged out")
            }
            Command::Refresh => {
                self.session.refresh().await;
                self.session_result("Session refreshed")
            }
            Command::Deck => {
                self.discovery.load_profiles().await;
                self.deck()
            }
            Command::Swipe(direction) => {
                self.discovery.swipe(direction).await;
                self.deck()
            }
            Command::Dismiss => {
                self.discovery.dismiss_match();
                self.deck()
            }
            Command::Matches => {
                self.discovery.load_matches().await;
                let state = self.discovery.state();
                with_error(render_matches(&state.matches), state.error)
            }
            Command::Chats => {
                self.chats.load_conversations().await;
                let state = self.chats.state();
                with_error(render_conversations(&state.conversations), state.error)
            }
            Command::Open(id) => {
                let chat = ChatDetailController::new(self.api.clone(), id);
                chat.load_conversation().await;
                let state = chat.state();
                self.chat = Some(chat);
                with_error(render_messages(&state.messages), state.error)
            }
            Command::Send(text) => match &self.chat {
                Some(chat) => {
                    chat.send_message(&text).await;
                    let state = chat.state();
                    with_error(render_messages(&state.messages), state.error)
                }
                None => "No conversation open. Use 'open ID' first".to_string(),
            },
            Command::Profile => {
                self.profile.load_profile().await;
                self.profile_view()
            }
            Command::Name(name) => {
                self.update_profile(ProfileUpdate {
                    display_name: Some(name),
                    ..Default::default()
                })
                .await
            }
            Command::Bio(bio) => {
                self.update_profile(ProfileUpdate {
                    bio: Some(bio),
                    ..Default::default()
                })
                .await
            }
        };
        Some(output)
    }

    async fn update_profile(&self, update: ProfileUpdate) -> String {
        self.profile.update_profile(update).await;
        self.profile_view()
    }

    fn status(&self) -> String {
        let state = self.session.state();
        let label = if state.is_authenticated {
            "Logged in"
        } else {
            "Logged out"
        };
        format!("{label} ({})", self.api.base_url())
    }

    fn session_result(&self, success: &str) -> String {
        match self.session.state().error {
            Some(error) => format!("Error: {error}"),
            None => success.to_string(),
        }
    }

    fn deck(&self) -> String {
        let state = self.discovery.state();
        let mut out = String::new();
        if let Some(matched) = &state.pending_match {
            out.push_str(&format!(
                "It's a match with {}! Type 'dismiss' to continue\n",
                matched.display_name
            ));
        }
        match state.current_profile() {
            Some(profile) => out.push_str(&render_candidate(profile, state.remaining())),
            None if state.is_loading => out.push_str("Loading more profiles..."),
            None => out.push_str("No more profiles. Type 'deck' to check again"),
        }
        with_error(out, state.error)
    }

    fn profile_view(&self) -> String {
        let state = self.profile.state();
        let view = state
            .profile
            .as_ref()
            .map(render_profile)
            .unwrap_or_else(|| "No profile loaded".to_string());
        with_error(view, state.error)
    }
}

fn with_error(view: String, error: Option<String>) -> String {
    match error {
        Some(error) => format!("{view}\nError: {error}"),
        None => view,
    }
}

fn render_candidate(profile: &DiscoverProfile, remaining: usize) -> String {
    let mut out = format!("{}, {}", profile.display_name, profile.age);
    if let Some(distance) = profile.distance_km {
        out.push_str(&format!(" ({distance:.1} km)"));
    }
    if let Some(bio) = &profile.bio {
        out.push_str(&format!("\n  {bio}"));
    }
    out.push_str(&format!("\n  [{remaining} left in deck]"));
    out
}

fn render_matches(matches: &[Match]) -> String {
    if matches.is_empty() {
        return "No matches yet".to_string();
    }
    matches
        .iter()
        .map(|m| format!("  {} (since {})", m.display_name, short_date(m.matched_at)))
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_conversations(conversations: &[Conversation]) -> String {
    if conversations.is_empty() {
        return "No conversations".to_string();
    }
    conversations
        .iter()
        .map(|c| {
            let preview = c
                .last_message
                .as_ref()
                .map(|m| m.content.as_str())
                .unwrap_or("");
            let unread = if c.unread_count > 0 {
                format!(" [{}]", c.unread_count)
            } else {
                String::new()
            };
            format!("  {}  {}{unread}: {preview}", c.id, c.participant.display_name)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_messages(messages: &[Message]) -> String {
    if messages.is_empty() {
        return "No messages".to_string();
    }
    messages
        .iter()
        .map(|m| format!("  [{}] {}: {}", m.sent_at.format("%H:%M"), m.sender_id, m.content))
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_profile(profile: &UserProfile) -> String {
    let mut out = profile
        .display_name
        .clone()
        .unwrap_or_else(|| profile.email.clone());
    if let Some(age) = profile.age() {
        out.push_str(&format!(", {age}"));
    }
    if let Some(gender) = profile.gender {
        out.push_str(&format!(" ({})", gender.display_name()));
    }
    if let Some(bio) = &profile.bio {
        out.push_str(&format!("\n  {bio}"));
    }
    if !profile.interests.is_empty() {
        out.push_str(&format!("\n  Interests: {}", profile.interests.join(", ")));
    }
    out
}

fn short_date(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%d").to_string()
}
