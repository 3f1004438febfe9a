use crate::client::{Access, MincaClient, multipart_form};
use crate::error::Result;
use crate::types::{
    Chat, ChatEnvelope, ChatList, ChatType, FileUpload, InitChatResponse, Message, MessageList,
    MessagePair,
};

impl MincaClient {
    /// `GET /chat`: the signed-in user's chats.
    pub async fn list_chats(&self) -> Result<Vec<Chat>> {
        let list: ChatList = self.get_json(Access::Authenticated, &["chat"]).await?;
        Ok(list.chats)
    }

    /// `GET /chat/:id`
    pub async fn get_chat(&self, chat_id: &str) -> Result<Chat> {
        let envelope: ChatEnvelope = self
            .get_json(Access::Authenticated, &["chat", chat_id])
            .await?;
        Ok(envelope.chat)
    }

    /// `POST /chat/init`: creates a chat from its first question.
    pub async fn init_chat(
        &self,
        question: &str,
        chat_type: ChatType,
        files: &[FileUpload],
    ) -> Result<InitChatResponse> {
        let form = multipart_form(
            &[("question", question), ("type", chat_type.as_str())],
            files,
        )?;
        self.post_multipart(Access::Authenticated, &["chat", "init"], form)
            .await
    }

    /// `GET /chat/:id/message`
    pub async fn list_messages(&self, chat_id: &str) -> Result<Vec<Message>> {
        let list: MessageList = self
            .get_json(Access::Authenticated, &["chat", chat_id, "message"])
            .await?;
        Ok(list.messages)
    }

    /// `POST /chat/:id/message`: appends a question to an existing chat.
    pub async fn add_message(
        &self,
        chat_id: &str,
        question: &str,
        files: &[FileUpload],
    ) -> Result<MessagePair> {
        let form = multipart_form(&[("question", question)], files)?;
        self.post_multipart(Access::Authenticated, &["chat", chat_id, "message"], form)
            .await
    }
}
