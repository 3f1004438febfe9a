use std::fmt;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::types::Attachment;

/// Author of a message.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// The human side of the conversation.
    User,

    /// The assistant.
    Assistant,
}

impl fmt::Display for MessageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageRole::User => f.write_str("user"),
            MessageRole::Assistant => f.write_str("assistant"),
        }
    }
}

/// A message in an authenticated assistant chat.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Message {
    #[serde(rename = "messageid")]
    pub id: String,

    #[serde(rename = "chatid")]
    pub chat_id: String,

    pub role: MessageRole,

    pub content: String,

    #[serde(with = "crate::utils::time")]
    pub created_at: OffsetDateTime,

    #[serde(with = "crate::utils::time")]
    pub updated_at: OffsetDateTime,

    #[serde(default)]
    pub parent_message_id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachments: Option<Vec<Attachment>>,
}

impl Message {
    /// Returns the attachments, empty when the message has none.
    pub fn attachments(&self) -> &[Attachment] {
        self.attachments.as_deref().unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, to_value};

    #[test]
    fn message_without_attachments() {
        let value = json!({
            "messageid": "m-1",
            "chatid": "c-1",
            "role": "assistant",
            "content": "Your policy covers fire damage.",
            "created_at": "2025-03-01T10:00:00Z",
            "updated_at": "2025-03-01T10:00:00Z"
        });
        let message: Message = serde_json::from_value(value).unwrap();
        assert_eq!(message.role, MessageRole::Assistant);
        assert!(message.attachments().is_empty());
        assert_eq!(message.parent_message_id, "");

        let back = to_value(&message).unwrap();
        assert!(back.get("attachments").is_none());
        assert_eq!(back["messageid"], "m-1");
    }

    #[test]
    fn message_with_attachments() {
        let value = json!({
            "messageid": "m-2",
            "chatid": "c-1",
            "role": "user",
            "content": "",
            "created_at": "2025-03-01T10:00:00Z",
            "updated_at": "2025-03-01T10:00:00Z",
            "parent_message_id": "m-1",
            "attachments": [
                {"id": "a-1", "name": "policy.pdf", "mime": "application/pdf", "size": 2048, "type": "application"}
            ]
        });
        let message: Message = serde_json::from_value(value).unwrap();
        assert_eq!(message.attachments().len(), 1);
        assert_eq!(message.attachments()[0].kind, "application");
    }
}
