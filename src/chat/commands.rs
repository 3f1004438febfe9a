//! Slash command parsing for the chat front-ends.
//!
//! This module handles parsing of special commands that start with `/`,
//! allowing users to control the view without sending a message.

use std::path::PathBuf;

use crate::conversations::StatusFilter;

/// A parsed chat command.
///
/// These commands control the view and are not sent to the assistant.
#[derive(Debug, Clone, PartialEq)]
pub enum ChatCommand {
    /// Start a new conversation.
    New,

    /// Open an existing conversation by id.
    Open(String),

    /// List recent chats; `true` shows the next page.
    Chats { more: bool },

    /// Stage a file for the next message.
    Attach(PathBuf),

    /// Unstage the n-th staged file (1-based).
    Detach(usize),

    /// List staged files.
    Files,

    /// List customer conversations.
    Customers {
        status: StatusFilter,
        query: Option<String>,
    },

    /// Show one customer conversation.
    Customer(String),

    /// Begin connecting the CRM.
    CrmConnect,

    /// Complete the CRM connection with an authorization code.
    CrmCallback(String),

    /// Show the stored CRM access token.
    CrmToken,

    /// Forget the stored widget session and start over.
    Reset,

    /// Display view statistics.
    Stats,

    /// Sign out.
    Logout,

    /// Display help information.
    Help,

    /// Exit the application.
    Quit,

    /// Report a parsing error back to the caller.
    Invalid(String),
}

/// Parses user input for slash commands.
///
/// Returns `Some(ChatCommand)` if the input is a valid command,
/// or `None` if it should be treated as a regular message.
///
/// # Examples
///
/// ```
/// # use minca::chat::parse_command;
/// assert!(parse_command("/quit").is_some());
/// assert!(parse_command("/open 4f2a").is_some());
/// assert!(parse_command("Is flood damage covered?").is_none());
/// ```
pub fn parse_command(input: &str) -> Option<ChatCommand> {
    let input = input.trim();

    if !input.starts_with('/') {
        return None;
    }

    let mut parts = input[1..].splitn(2, ' ');
    let command = parts.next()?.to_lowercase();
    let argument = parts.next().map(|s| s.trim()).filter(|s| !s.is_empty());

    let result = match command.as_str() {
        "new" => ChatCommand::New,
        "open" => match argument {
            Some(id) => ChatCommand::Open(id.to_string()),
            None => ChatCommand::Invalid("/open requires a chat id".to_string()),
        },
        "chats" => match argument {
            None => ChatCommand::Chats { more: false },
            Some(arg) if arg.eq_ignore_ascii_case("more") => ChatCommand::Chats { more: true },
            Some(_) => ChatCommand::Invalid("/chats accepts only 'more'".to_string()),
        },
        "attach" => match argument {
            Some(path) => ChatCommand::Attach(PathBuf::from(path)),
            None => ChatCommand::Invalid("/attach requires a file path".to_string()),
        },
        "detach" => match argument.map(|arg| arg.parse::<usize>()) {
            Some(Ok(n)) if n > 0 => ChatCommand::Detach(n),
            Some(_) => ChatCommand::Invalid("/detach expects a positive integer".to_string()),
            None => ChatCommand::Invalid("/detach requires a file number".to_string()),
        },
        "files" => ChatCommand::Files,
        "customers" => parse_customers(argument),
        "customer" => match argument {
            Some(session) => ChatCommand::Customer(session.to_string()),
            None => ChatCommand::Invalid("/customer requires a session id".to_string()),
        },
        "crm" => parse_crm(argument),
        "reset" => ChatCommand::Reset,
        "stats" | "status" => ChatCommand::Stats,
        "logout" => ChatCommand::Logout,
        "help" | "?" => ChatCommand::Help,
        "quit" | "exit" | "q" => ChatCommand::Quit,
        _ => ChatCommand::Invalid(format!("Unknown command: /{}", command)),
    };

    Some(result)
}

fn parse_customers(argument: Option<&str>) -> ChatCommand {
    let Some(arg) = argument else {
        return ChatCommand::Customers {
            status: StatusFilter::All,
            query: None,
        };
    };

    let mut parts = arg.splitn(2, ' ');
    let first = parts.next().unwrap_or_default();
    match first.parse::<StatusFilter>() {
        Ok(status) => ChatCommand::Customers {
            status,
            query: parts
                .next()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
        },
        Err(_) => ChatCommand::Customers {
            status: StatusFilter::All,
            query: Some(arg.to_string()),
        },
    }
}

fn parse_crm(argument: Option<&str>) -> ChatCommand {
    let Some(arg) = argument else {
        return ChatCommand::Invalid(
            "/crm requires 'connect', 'callback <code>', or 'token'".to_string(),
        );
    };

    let mut parts = arg.splitn(2, ' ');
    let action = parts.next().unwrap_or_default();
    match action.to_lowercase().as_str() {
        "connect" => ChatCommand::CrmConnect,
        "callback" => {
            let Some(code) = parts.next().map(|s| s.trim()).filter(|s| !s.is_empty()) else {
                return ChatCommand::Invalid("/crm callback requires a code".to_string());
            };
            ChatCommand::CrmCallback(code.to_string())
        }
        "token" => ChatCommand::CrmToken,
        _ => ChatCommand::Invalid(
            "Unrecognized /crm action (use connect, callback, or token)".to_string(),
        ),
    }
}

/// Returns help text describing the assistant commands.
pub fn help_text() -> &'static str {
    r#"Available commands:
  /new                       Start a new conversation
  /open <chat-id>            Open an existing chat
  /chats [more]              List recent chats (5 at a time)
  /attach <path>             Stage a .pdf, .doc or .docx file
  /detach <n>                Unstage the n-th staged file
  /files                     List staged files
  /customers [status] [q]    List customer conversations
                             (status: all, ai-responding, closed)
  /customer <session-id>     Show a customer conversation
  /crm connect               Start connecting HubSpot
  /crm callback <code>       Finish connecting HubSpot
  /crm token                 Show the HubSpot access token
  /stats                     Show view statistics
  /logout                    Sign out
  /help                      Show this help message
  /quit                      Exit"#
}

/// Returns help text describing the widget commands.
pub fn widget_help_text() -> &'static str {
    r#"Available commands:
  /reset                     Forget this conversation and start over
  /attach <path>             Stage a file for the next message
  /detach <n>                Unstage the n-th staged file
  /files                     List staged files
  /help                      Show this help message
  /quit                      Exit"#
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_quit_commands() {
        assert_eq!(parse_command("/quit"), Some(ChatCommand::Quit));
        assert_eq!(parse_command("/exit"), Some(ChatCommand::Quit));
        assert_eq!(parse_command("/q"), Some(ChatCommand::Quit));
        assert_eq!(parse_command("  /quit  "), Some(ChatCommand::Quit));
    }

    #[test]
    fn parse_open() {
        assert_eq!(
            parse_command("/open c-123"),
            Some(ChatCommand::Open("c-123".to_string()))
        );
        assert_eq!(
            parse_command("/OPEN   c-123  "),
            Some(ChatCommand::Open("c-123".to_string()))
        );
        assert_eq!(
            parse_command("/open"),
            Some(ChatCommand::Invalid("/open requires a chat id".to_string()))
        );
    }

    #[test]
    fn parse_chats() {
        assert_eq!(
            parse_command("/chats"),
            Some(ChatCommand::Chats { more: false })
        );
        assert_eq!(
            parse_command("/chats more"),
            Some(ChatCommand::Chats { more: true })
        );
        assert!(matches!(
            parse_command("/chats all"),
            Some(ChatCommand::Invalid(_))
        ));
    }

    #[test]
    fn parse_attachments() {
        assert_eq!(
            parse_command("/attach ~/docs/my policy.pdf"),
            Some(ChatCommand::Attach(PathBuf::from("~/docs/my policy.pdf")))
        );
        assert_eq!(parse_command("/detach 2"), Some(ChatCommand::Detach(2)));
        assert!(matches!(
            parse_command("/detach 0"),
            Some(ChatCommand::Invalid(msg)) if msg.contains("positive")
        ));
        assert_eq!(parse_command("/files"), Some(ChatCommand::Files));
    }

    #[test]
    fn parse_customers_filters() {
        assert_eq!(
            parse_command("/customers"),
            Some(ChatCommand::Customers {
                status: StatusFilter::All,
                query: None
            })
        );
        assert_eq!(
            parse_command("/customers ai-responding claim"),
            Some(ChatCommand::Customers {
                status: StatusFilter::AiResponding,
                query: Some("claim".to_string())
            })
        );
        assert_eq!(
            parse_command("/customers water damage"),
            Some(ChatCommand::Customers {
                status: StatusFilter::All,
                query: Some("water damage".to_string())
            })
        );
    }

    #[test]
    fn parse_crm_commands() {
        assert_eq!(parse_command("/crm connect"), Some(ChatCommand::CrmConnect));
        assert_eq!(
            parse_command("/crm callback abc 123"),
            Some(ChatCommand::CrmCallback("abc 123".to_string()))
        );
        assert_eq!(parse_command("/crm token"), Some(ChatCommand::CrmToken));
        assert!(matches!(
            parse_command("/crm callback"),
            Some(ChatCommand::Invalid(msg)) if msg.contains("code")
        ));
        assert!(matches!(parse_command("/crm"), Some(ChatCommand::Invalid(_))));
    }

    #[test]
    fn non_commands() {
        assert_eq!(parse_command("What does my policy cover?"), None);
        assert_eq!(parse_command(""), None);
        assert_eq!(parse_command("  "), None);
        assert!(matches!(
            parse_command("/bogus"),
            Some(ChatCommand::Invalid(msg)) if msg == "Unknown command: /bogus"
        ));
    }

    #[test]
    fn help_text_not_empty() {
        let help = help_text();
        assert!(help.contains("/quit"));
        assert!(help.contains("/open"));
        assert!(help.contains("/customers"));
        assert!(widget_help_text().contains("/reset"));
    }
}
