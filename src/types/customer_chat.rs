use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::types::MessageRole;

/// A public-widget conversation, identified by an opaque session id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CustomerChat {
    #[serde(rename = "sessionid", alias = "sessionId")]
    pub session_id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, with = "crate::utils::time::option")]
    pub created_at: Option<OffsetDateTime>,

    #[serde(default, with = "crate::utils::time::option")]
    pub updated_at: Option<OffsetDateTime>,
}

/// A message in a public-widget conversation.
///
/// Kept apart from [`crate::Message`]: widget messages are keyed by session
/// and never carry attachments.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CustomerMessage {
    #[serde(rename = "messageid")]
    pub id: String,

    #[serde(rename = "sessionId", alias = "sessionid")]
    pub session_id: String,

    pub role: MessageRole,

    pub content: String,

    #[serde(with = "crate::utils::time")]
    pub created_at: OffsetDateTime,
}

/// One row of the customer conversation review list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ConversationSummary {
    pub session_id: String,

    #[serde(default)]
    pub last_message: Option<String>,

    #[serde(with = "crate::utils::time")]
    pub last_timestamp: OffsetDateTime,

    #[serde(default)]
    pub total_messages: u64,
}
