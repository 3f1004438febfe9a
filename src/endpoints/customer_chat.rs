//! Public widget endpoints.  None of these carry a bearer token.

use crate::client::{Access, MincaClient, multipart_form};
use crate::error::Result;
use crate::types::{
    ConversationSummary, CustomerChat, CustomerMessage, CustomerMessagePair, FileUpload,
    InitCustomerChatResponse,
};

impl MincaClient {
    /// `GET /customer-chat`: one summary row per conversation.
    pub async fn list_customer_chats(&self) -> Result<Vec<ConversationSummary>> {
        self.get_json(Access::Public, &["customer-chat"]).await
    }

    /// `GET /customer-chat/:sessionId`
    pub async fn get_customer_chat(&self, session_id: &str) -> Result<CustomerChat> {
        self.get_json(Access::Public, &["customer-chat", session_id])
            .await
    }

    /// `GET /customer-chat/:sessionId/message`
    pub async fn list_customer_messages(&self, session_id: &str) -> Result<Vec<CustomerMessage>> {
        self.get_json(Access::Public, &["customer-chat", session_id, "message"])
            .await
    }

    /// `POST /customer-chat/init`: starts a widget session from its first question.
    pub async fn init_customer_chat(
        &self,
        question: &str,
        files: &[FileUpload],
    ) -> Result<InitCustomerChatResponse> {
        let form = multipart_form(&[("question", question)], files)?;
        self.post_multipart(Access::Public, &["customer-chat", "init"], form)
            .await
    }

    /// `POST /customer-chat/:sessionId/message`
    pub async fn add_customer_message(
        &self,
        session_id: &str,
        question: &str,
        files: &[FileUpload],
    ) -> Result<CustomerMessagePair> {
        let form = multipart_form(&[("question", question)], files)?;
        self.post_multipart(
            Access::Public,
            &["customer-chat", session_id, "message"],
            form,
        )
        .await
    }
}
