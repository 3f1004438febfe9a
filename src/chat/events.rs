use std::fmt;

use crate::notification::Notification;
use crate::types::ChatType;

/// A location in the client, spelled as a web route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// A fresh conversation with an internal assistant.
    Assistant(ChatType),
    /// A bound internal chat: `/chat/<chatid>`.
    Chat(String),
    /// The public widget without a session: `/chat-bot`.
    Widget,
    /// A bound widget session: `/chat-bot/<sessionid>`.
    WidgetSession(String),
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Assistant(chat_type) => f.write_str(chat_type.route()),
            Route::Chat(id) => write!(f, "/chat/{id}"),
            Route::Widget => f.write_str("/chat-bot"),
            Route::WidgetSession(id) => write!(f, "/chat-bot/{id}"),
        }
    }
}

/// Side effects a view asks its host to carry out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEvent {
    /// Show a notification.
    Notify(Notification),
    /// Move to another route.
    Navigate(Route),
    /// The cached recent-chat list is stale.
    InvalidateChats,
}
