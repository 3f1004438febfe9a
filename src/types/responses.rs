//! Response envelopes of the chat and customer-chat endpoints.

use serde::{Deserialize, Serialize};

use crate::types::{Chat, CustomerChat, CustomerMessage, Message};

/// `GET /chat`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatList {
    #[serde(default)]
    pub chats: Vec<Chat>,
}

/// `GET /chat/:id`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatEnvelope {
    pub chat: Chat,
}

/// `GET /chat/:id/message`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessageList {
    #[serde(default)]
    pub messages: Vec<Message>,
}

/// `POST /chat/init`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InitChatResponse {
    pub chat: Chat,
    pub user: Message,
    pub assistant: Message,
}

/// `POST /chat/:id/message`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessagePair {
    pub user: Message,
    pub assistant: Message,
}

/// `POST /customer-chat/init`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InitCustomerChatResponse {
    pub customer_chat: CustomerChat,
    pub sessionid: String,
    pub user: CustomerMessage,
    pub assistant: CustomerMessage,
}

/// `POST /customer-chat/:sessionId/message`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CustomerMessagePair {
    pub user: CustomerMessage,
    pub assistant: CustomerMessage,
}
