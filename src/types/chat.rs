use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Which assistant a conversation is held with.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ChatType {
    /// The policy expert.
    #[default]
    Policy,

    /// The sales advisor.
    Sales,
}

impl ChatType {
    /// Returns the wire name of the chat type.
    pub fn as_str(&self) -> &'static str {
        match self {
            ChatType::Policy => "policy",
            ChatType::Sales => "sales",
        }
    }

    /// Returns the route that opens a fresh conversation with this assistant.
    pub fn route(&self) -> &'static str {
        match self {
            ChatType::Policy => "/insurance-expert",
            ChatType::Sales => "/sales-assistant",
        }
    }

    /// Returns the assistant's display name.
    pub fn display_name(&self) -> &'static str {
        match self {
            ChatType::Policy => "Policy Assistant",
            ChatType::Sales => "Sales Assistant",
        }
    }

    /// Picks the assistant from a route; anything but the policy route is sales.
    pub fn from_route(route: &str) -> Self {
        if route == ChatType::Policy.route() {
            ChatType::Policy
        } else {
            ChatType::Sales
        }
    }
}

impl fmt::Display for ChatType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChatType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "policy" | "insurance-expert" => Ok(ChatType::Policy),
            "sales" | "sales-assistant" => Ok(ChatType::Sales),
            _ => Err(format!(
                "Invalid assistant: {s}. Valid options: policy, sales"
            )),
        }
    }
}

/// A conversation between an authenticated user and an assistant.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Chat {
    #[serde(rename = "chatid")]
    pub id: String,

    #[serde(rename = "userid")]
    pub user_id: String,

    pub title: String,

    #[serde(rename = "type")]
    pub chat_type: ChatType,

    #[serde(with = "crate::utils::time")]
    pub created_at: OffsetDateTime,

    #[serde(with = "crate::utils::time")]
    pub updated_at: OffsetDateTime,
}

impl Chat {
    /// Title as shown in lists: one pair of surrounding double quotes is removed.
    pub fn display_title(&self) -> &str {
        let title = self.title.as_str();
        if title.len() >= 2 && title.starts_with('"') && title.ends_with('"') {
            &title[1..title.len() - 1]
        } else {
            title
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn chat(title: &str) -> Chat {
        serde_json::from_value(json!({
            "chatid": "c-1",
            "userid": "u-1",
            "title": title,
            "type": "sales",
            "created_at": "2025-03-01T10:00:00Z",
            "updated_at": "2025-03-01T10:05:00Z"
        }))
        .unwrap()
    }

    #[test]
    fn chat_wire_names() {
        let chat = chat("Quote for fleet");
        assert_eq!(chat.id, "c-1");
        assert_eq!(chat.chat_type, ChatType::Sales);
    }

    #[test]
    fn display_title_strips_quotes_once() {
        assert_eq!(chat("\"Home cover\"").display_title(), "Home cover");
        assert_eq!(chat("\"\"nested\"\"").display_title(), "\"nested\"");
        assert_eq!(chat("plain").display_title(), "plain");
        assert_eq!(chat("\"").display_title(), "\"");
    }

    #[test]
    fn chat_type_routes() {
        assert_eq!(ChatType::from_route("/insurance-expert"), ChatType::Policy);
        assert_eq!(ChatType::from_route("/sales-assistant"), ChatType::Sales);
        assert_eq!("POLICY".parse::<ChatType>().unwrap(), ChatType::Policy);
        assert!("claims".parse::<ChatType>().is_err());
    }
}
