use std::fmt;
use zoekdeware::models::SwipeDirection;

/// A line command typed at the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Login { email: String, password: String },
    Register { email: String, password: String },
    Logout,
    Refresh,
    /// Fetch a fresh discovery page.
    Deck,
    Swipe(SwipeDirection),
    Matches,
    /// Acknowledge the pending match.
    Dismiss,
    Chats,
    /// Open a conversation by id.
    Open(String),
    /// Send text to the open conversation.
    Send(String),
    Profile,
    Name(String),
    Bio(String),
    Status,
    Help,
    Quit,
}

/// Errors that can occur during command parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Command needs an email and a password.
    MissingCredentials(String),
    /// Command needs an argument.
    MissingArgument(&'static str),
    /// Unrecognized command.
    UnrecognizedCommand(String),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingCredentials(cmd) => write!(
                f,
                "'{cmd}' requires an email and a password (e.g., '{cmd} ada@example.com hunter22')"
            ),
            Self::MissingArgument(usage) => write!(f, "Missing argument. Usage: {usage}"),
            Self::UnrecognizedCommand(cmd) => write!(
                f,
                "Unrecognized command '{cmd}'. Type 'help' to see available commands"
            ),
        }
    }
}

impl std::error::Error for ParseError {}

pub const COMMANDS_HELP: &str = "\
  login EMAIL PASSWORD     Log in and store the session
  register EMAIL PASSWORD  Create an account and log in
  logout                   Forget the stored session
  refresh                  Exchange the refresh token for a new pair
  deck                     Load a page of candidates
  like | pass | super      Swipe on the current candidate
  matches                  List matches
  dismiss                  Acknowledge a new match
  chats                    List conversations
  open ID                  Open a conversation
  send TEXT                Send a message to the open conversation
  profile                  Show your profile
  name TEXT                Change your display name
  bio TEXT                 Change your bio
  status                   Show session state
  help                     Show this list
  quit                     Exit
";

/// Parse a prompt line into a [`Command`].
///
/// # Examples
///
/// ```
/// use zd_client::commands::{Command, parse_command};
/// use zoekdeware::models::SwipeDirection;
///
/// assert_eq!(parse_command("like"), Ok(Command::Swipe(SwipeDirection::Like)));
/// assert_eq!(parse_command("open c1"), Ok(Command::Open("c1".to_string())));
/// ```
pub fn parse_command(input: &str) -> Result<Command, ParseError> {
    let trimmed = input.trim();
    let (word, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (trimmed, ""),
    };

    match word {
        "login" => parse_credentials(word, rest)
            .map(|(email, password)| Command::Login { email, password }),
        "register" => parse_credentials(word, rest)
            .map(|(email, password)| Command::Register { email, password }),
        "logout" => Ok(Command::Logout),
        "refresh" => Ok(Command::Refresh),
        "deck" | "load" => Ok(Command::Deck),
        "like" => Ok(Command::Swipe(SwipeDirection::Like)),
        "pass" => Ok(Command::Swipe(SwipeDirection::Pass)),
        "super" | "superlike" => Ok(Command::Swipe(SwipeDirection::SuperLike)),
        "matches" => Ok(Command::Matches),
        "dismiss" => Ok(Command::Dismiss),
        "chats" => Ok(Command::Chats),
        "open" => required(rest, "open ID").map(Command::Open),
        // Blank text is left to the chat controller, which drops it
        "send" => Ok(Command::Send(rest.to_string())),
        "profile" => Ok(Command::Profile),
        "name" => required(rest, "name TEXT").map(Command::Name),
        "bio" => Ok(Command::Bio(rest.to_string())),
        "status" => Ok(Command::Status),
        "help" | "?" => Ok(Command::Help),
        "quit" | "exit" => Ok(Command::Quit),
        _ => Err(ParseError::UnrecognizedCommand(trimmed.to_string())),
    }
}

fn parse_credentials(cmd: &str, rest: &str) -> Result<(String, String), ParseError> {
    let parts: Vec<&str> = rest.split_ascii_whitespace().collect();
    match parts.as_slice() {
        [email, password] => Ok((email.to_string(), password.to_string())),
        _ => Err(ParseError::MissingCredentials(cmd.to_string())),
    }
}

fn required(rest: &str, usage: &'static str) -> Result<String, ParseError> {
    if rest.is_empty() {
        Err(ParseError::MissingArgument(usage))
    } else {
        Ok(rest.to_string())
    }
}
