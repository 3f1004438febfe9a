//! The two conversation backends a chat view can drive.
//!
//! [`AssistantBackend`] talks to the authenticated assistant endpoints and
//! [`WidgetBackend`] to the public customer-chat endpoints.  Both return the
//! assistant's whole reply at once; the view reveals it.

use std::sync::Arc;

use time::OffsetDateTime;

use crate::chat::events::{Route, ViewEvent};
use crate::chat::staging::{ASSISTANT_EXTENSIONS, AttachmentStaging};
use crate::client::MincaClient;
use crate::error::Result;
use crate::storage::{CUSTOMER_SESSION_KEY, KeyValueStore, get_json, set_json};
use crate::types::{Attachment, ChatType, CustomerMessage, FileUpload, Message, MessageRole};

/// Greeting that seeds an unbound widget conversation.
pub const WIDGET_WELCOME: &str = "Hi there! How can I help?";

/// What a chat view needs to know about a message.
pub trait ConversationMessage: Clone + Send + Sync {
    fn id(&self) -> &str;
    fn role(&self) -> MessageRole;
    fn content(&self) -> &str;
    fn created_at(&self) -> OffsetDateTime;

    fn attachments(&self) -> &[Attachment] {
        &[]
    }
}

impl ConversationMessage for Message {
    fn id(&self) -> &str {
        &self.id
    }

    fn role(&self) -> MessageRole {
        self.role
    }

    fn content(&self) -> &str {
        &self.content
    }

    fn created_at(&self) -> OffsetDateTime {
        self.created_at
    }

    fn attachments(&self) -> &[Attachment] {
        Message::attachments(self)
    }
}

impl ConversationMessage for CustomerMessage {
    fn id(&self) -> &str {
        &self.id
    }

    fn role(&self) -> MessageRole {
        self.role
    }

    fn content(&self) -> &str {
        &self.content
    }

    fn created_at(&self) -> OffsetDateTime {
        self.created_at
    }
}

/// The reply to a send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply<M> {
    /// Id of the conversation the reply belongs to.
    pub conversation_id: String,
    /// The assistant's message, with its server-issued id.
    pub assistant: M,
}

/// A user message built on the client before the backend has seen it.
#[derive(Debug, Clone)]
pub struct Draft<'a> {
    pub id: &'a str,
    pub conversation_id: Option<&'a str>,
    pub content: &'a str,
    pub attachments: Vec<Attachment>,
    pub now: OffsetDateTime,
}

/// A source of conversations and replies.
#[async_trait::async_trait]
pub trait ChatBackend: Send + Sync {
    type Message: ConversationMessage;

    /// Route of a fresh, unbound conversation.
    fn home_route(&self) -> Route;

    /// Route of a bound conversation.
    fn conversation_route(&self, id: &str) -> Route;

    /// Message shown in an unbound view before anything is sent.
    fn welcome(&self, now: OffsetDateTime) -> Option<Self::Message>;

    /// Empty staging configured for this backend's allow-list.
    fn staging(&self) -> AttachmentStaging;

    /// Builds the optimistic user message.
    fn draft(&self, draft: Draft<'_>) -> Self::Message;

    /// Fetches a conversation's messages.
    async fn load(&self, id: &str) -> Result<Vec<Self::Message>>;

    /// Creates a conversation from its first question.
    async fn start(&self, question: &str, files: &[FileUpload]) -> Result<Reply<Self::Message>>;

    /// Appends a question to a bound conversation.
    async fn append(
        &self,
        id: &str,
        question: &str,
        files: &[FileUpload],
    ) -> Result<Reply<Self::Message>>;

    /// Runs once a new conversation's first reply is fully revealed.
    fn created(&self, id: &str) -> Result<Vec<ViewEvent>>;
}

////////////////////////////////////////////// AssistantBackend ////////////////////////////////////

/// The authenticated policy and sales assistants.
#[derive(Debug, Clone)]
pub struct AssistantBackend {
    client: MincaClient,
    chat_type: ChatType,
}

impl AssistantBackend {
    pub fn new(client: MincaClient, chat_type: ChatType) -> Self {
        Self { client, chat_type }
    }

    pub fn chat_type(&self) -> ChatType {
        self.chat_type
    }

    pub fn client(&self) -> &MincaClient {
        &self.client
    }
}

#[async_trait::async_trait]
impl ChatBackend for AssistantBackend {
    type Message = Message;

    fn home_route(&self) -> Route {
        Route::Assistant(self.chat_type)
    }

    fn conversation_route(&self, id: &str) -> Route {
        Route::Chat(id.to_string())
    }

    fn welcome(&self, _: OffsetDateTime) -> Option<Message> {
        None
    }

    fn staging(&self) -> AttachmentStaging {
        AttachmentStaging::with_allowed_extensions(ASSISTANT_EXTENSIONS)
    }

    fn draft(&self, draft: Draft<'_>) -> Message {
        Message {
            id: draft.id.to_string(),
            chat_id: draft.conversation_id.unwrap_or_default().to_string(),
            role: MessageRole::User,
            content: draft.content.to_string(),
            created_at: draft.now,
            updated_at: draft.now,
            parent_message_id: String::new(),
            attachments: if draft.attachments.is_empty() {
                None
            } else {
                Some(draft.attachments)
            },
        }
    }

    async fn load(&self, id: &str) -> Result<Vec<Message>> {
        self.client.list_messages(id).await
    }

    async fn start(&self, question: &str, files: &[FileUpload]) -> Result<Reply<Message>> {
        let response = self.client.init_chat(question, self.chat_type, files).await?;
        Ok(Reply {
            conversation_id: response.chat.id,
            assistant: response.assistant,
        })
    }

    async fn append(&self, id: &str, question: &str, files: &[FileUpload]) -> Result<Reply<Message>> {
        let response = self.client.add_message(id, question, files).await?;
        Ok(Reply {
            conversation_id: id.to_string(),
            assistant: response.assistant,
        })
    }

    fn created(&self, id: &str) -> Result<Vec<ViewEvent>> {
        Ok(vec![
            ViewEvent::InvalidateChats,
            ViewEvent::Navigate(Route::Chat(id.to_string())),
        ])
    }
}

////////////////////////////////////////////// WidgetBackend ///////////////////////////////////////

/// The public customer chat widget.
///
/// The widget remembers its session id under [`CUSTOMER_SESSION_KEY`].
#[derive(Clone)]
pub struct WidgetBackend {
    client: MincaClient,
    storage: Arc<dyn KeyValueStore>,
}

impl WidgetBackend {
    pub fn new(client: MincaClient, storage: Arc<dyn KeyValueStore>) -> Self {
        Self { client, storage }
    }

    /// The session id remembered from an earlier run.
    pub fn stored_session(&self) -> Result<Option<String>> {
        get_json(self.storage.as_ref(), CUSTOMER_SESSION_KEY)
    }

    /// Forgets the remembered session id.
    pub fn forget_session(&self) -> Result<()> {
        self.storage.remove(CUSTOMER_SESSION_KEY)
    }
}

impl std::fmt::Debug for WidgetBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WidgetBackend")
            .field("client", &self.client)
            .finish_non_exhaustive()
    }
}

#[async_trait::async_trait]
impl ChatBackend for WidgetBackend {
    type Message = CustomerMessage;

    fn home_route(&self) -> Route {
        Route::Widget
    }

    fn conversation_route(&self, id: &str) -> Route {
        Route::WidgetSession(id.to_string())
    }

    fn welcome(&self, now: OffsetDateTime) -> Option<CustomerMessage> {
        Some(CustomerMessage {
            id: format!("temp-{}", crate::utils::time::unix_millis(now)),
            session_id: String::new(),
            role: MessageRole::Assistant,
            content: WIDGET_WELCOME.to_string(),
            created_at: now,
        })
    }

    fn staging(&self) -> AttachmentStaging {
        AttachmentStaging::new()
    }

    fn draft(&self, draft: Draft<'_>) -> CustomerMessage {
        CustomerMessage {
            id: draft.id.to_string(),
            session_id: draft.conversation_id.unwrap_or_default().to_string(),
            role: MessageRole::User,
            content: draft.content.to_string(),
            created_at: draft.now,
        }
    }

    async fn load(&self, id: &str) -> Result<Vec<CustomerMessage>> {
        self.client.list_customer_messages(id).await
    }

    async fn start(&self, question: &str, files: &[FileUpload]) -> Result<Reply<CustomerMessage>> {
        let response = self.client.init_customer_chat(question, files).await?;
        Ok(Reply {
            conversation_id: response.sessionid,
            assistant: response.assistant,
        })
    }

    async fn append(
        &self,
        id: &str,
        question: &str,
        files: &[FileUpload],
    ) -> Result<Reply<CustomerMessage>> {
        let response = self.client.add_customer_message(id, question, files).await?;
        Ok(Reply {
            conversation_id: id.to_string(),
            assistant: response.assistant,
        })
    }

    fn created(&self, id: &str) -> Result<Vec<ViewEvent>> {
        set_json(self.storage.as_ref(), CUSTOMER_SESSION_KEY, &id)?;
        tracing::info!(session = id, "stored widget session");
        Ok(vec![ViewEvent::Navigate(Route::WidgetSession(id.to_string()))])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;
    use crate::storage::MemoryStore;
    use time::macros::datetime;

    fn client() -> MincaClient {
        MincaClient::new(&ClientConfig::new()).unwrap()
    }

    #[test]
    fn assistant_draft_carries_attachments() {
        let backend = AssistantBackend::new(client(), ChatType::Policy);
        let now = datetime!(2025-03-01 10:00 UTC);
        let attachment = Attachment {
            id: "temp-0-1".into(),
            name: "policy.pdf".into(),
            mime: "application/pdf".into(),
            size: 4,
            kind: "application".into(),
        };
        let message = backend.draft(Draft {
            id: "temp-1",
            conversation_id: None,
            content: "Am I covered?",
            attachments: vec![attachment.clone()],
            now,
        });
        assert_eq!(message.role, MessageRole::User);
        assert_eq!(message.chat_id, "");
        assert_eq!(message.attachments(), &[attachment]);
        assert_eq!(message.parent_message_id, "");
    }

    #[test]
    fn assistant_created_invalidates_then_navigates() {
        let backend = AssistantBackend::new(client(), ChatType::Sales);
        assert_eq!(backend.home_route(), Route::Assistant(ChatType::Sales));
        assert_eq!(
            backend.created("c-9").unwrap(),
            vec![
                ViewEvent::InvalidateChats,
                ViewEvent::Navigate(Route::Chat("c-9".into()))
            ]
        );
    }

    #[test]
    fn widget_welcome_and_session_storage() {
        let storage = Arc::new(MemoryStore::new());
        let backend = WidgetBackend::new(client(), storage);
        let welcome = backend.welcome(datetime!(2025-03-01 10:00 UTC)).unwrap();
        assert_eq!(welcome.content, WIDGET_WELCOME);
        assert_eq!(welcome.role, MessageRole::Assistant);

        assert_eq!(backend.stored_session().unwrap(), None);
        let events = backend.created("s-42").unwrap();
        assert_eq!(
            events,
            vec![ViewEvent::Navigate(Route::WidgetSession("s-42".into()))]
        );
        assert_eq!(backend.stored_session().unwrap().as_deref(), Some("s-42"));
        backend.forget_session().unwrap();
        assert_eq!(backend.stored_session().unwrap(), None);
    }
}
