mod attachment;
mod chat;
mod customer_chat;
mod file_upload;
mod hubspot;
mod knowledge_base;
mod message;
mod responses;
mod user;

pub use attachment::Attachment;
pub use chat::{Chat, ChatType};
pub use customer_chat::{ConversationSummary, CustomerChat, CustomerMessage};
pub use file_upload::{FileUpload, mime_for_name};
pub use hubspot::HubspotAccessToken;
pub use knowledge_base::{Collection, KnowledgeBaseFile};
pub use message::{Message, MessageRole};
pub use responses::{
    ChatEnvelope, ChatList, CustomerMessagePair, InitChatResponse, InitCustomerChatResponse,
    MessageList, MessagePair,
};
pub use user::{AuthResponse, LoginRequest, SignupRequest, User};
