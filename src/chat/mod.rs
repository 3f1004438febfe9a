//! Chat views for the internal assistants and the public widget.
//!
//! This module provides the conversation state machine shared by both chat
//! surfaces, and the pieces the terminal front-ends build on top of it.
//!
//! # Architecture
//!
//! - [`backend`]: where conversations come from (assistant or widget)
//! - [`view`]: the send/reveal state machine
//! - [`staging`]: files waiting to go out with the next message
//! - [`recent`]: the paged recent-chat list
//! - [`repl`]: rendering a view in a terminal
//! - [`commands`]: slash command parsing
//! - [`config`]: CLI argument parsing and configuration

mod backend;
mod commands;
mod config;
mod events;
mod recent;
mod repl;
mod staging;
mod view;

pub use backend::{
    AssistantBackend, ChatBackend, ConversationMessage, Draft, Reply, WIDGET_WELCOME,
    WidgetBackend,
};
pub use commands::{ChatCommand, help_text, parse_command, widget_help_text};
pub use config::{ChatArgs, ChatConfig, CommonArgs, WidgetArgs};
pub use events::{Route, ViewEvent};
pub use recent::{PAGE_SIZE, RecentChats};
pub use repl::{drain_events, print_history, send_line};
pub use staging::{ASSISTANT_EXTENSIONS, AttachmentStaging, StagedId};
pub use view::{
    ChatView, LOAD_FAILED, PendingSend, SEND_FAILED, SendOutcome, StreamingMessage, ViewState,
    ViewStats,
};
