// Public modules
pub mod auth;
pub mod chat;
pub mod client;
pub mod client_logger;
pub mod config;
pub mod conversations;
pub mod endpoints;
pub mod error;
pub mod interrupt;
pub mod knowledge_base;
pub mod notification;
pub mod observability;
pub mod render;
pub mod reveal;
pub mod storage;
pub mod types;
pub mod utils;

// Re-exports
pub use auth::SessionStore;
pub use client::{Access, MincaClient};
pub use client_logger::ClientLogger;
pub use config::ClientConfig;
pub use error::{Error, Result};
pub use notification::{Notification, NotificationKind};
pub use render::{PlainTextRenderer, Renderer};
pub use types::*;
