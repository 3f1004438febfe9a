//! Review of customer conversations relayed through the public widget.

use std::fmt;
use std::str::FromStr;

use time::{Duration, OffsetDateTime};

use crate::client::MincaClient;
use crate::error::Result;
use crate::types::{ConversationSummary, CustomerMessage};

/// A conversation whose last activity is more recent than this is still being
/// answered by the assistant.
pub const AI_RESPONDING_WINDOW: Duration = Duration::minutes(3);

/// Status filter of the conversation list.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    AiResponding,
    Closed,
}

impl StatusFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusFilter::All => "all",
            StatusFilter::AiResponding => "ai-responding",
            StatusFilter::Closed => "closed",
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StatusFilter {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" => Ok(StatusFilter::All),
            "ai-responding" => Ok(StatusFilter::AiResponding),
            "closed" => Ok(StatusFilter::Closed),
            _ => Err(format!(
                "Invalid status: {s}. Valid options: all, ai-responding, closed"
            )),
        }
    }
}

/// Whether the assistant is still answering `summary` at `now`.
pub fn is_ai_responding(summary: &ConversationSummary, now: OffsetDateTime) -> bool {
    now - summary.last_timestamp < AI_RESPONDING_WINDOW
}

/// Whether `summary` passes the search and status filters.
///
/// The search is a case-insensitive substring match over the session id and
/// the last message.
pub fn matches(
    summary: &ConversationSummary,
    search: &str,
    status: StatusFilter,
    now: OffsetDateTime,
) -> bool {
    let needle = search.to_lowercase();
    let matches_search = summary.session_id.to_lowercase().contains(&needle)
        || summary
            .last_message
            .as_deref()
            .is_some_and(|m| m.to_lowercase().contains(&needle));
    let matches_status = match status {
        StatusFilter::All => true,
        StatusFilter::AiResponding => is_ai_responding(summary, now),
        StatusFilter::Closed => !is_ai_responding(summary, now),
    };
    matches_search && matches_status
}

/// The customer conversation list and the selected conversation.
#[derive(Debug, Default)]
pub struct ConversationReview {
    conversations: Vec<ConversationSummary>,
    selected: Option<String>,
    messages: Vec<CustomerMessage>,
}

impl ConversationReview {
    pub fn new() -> Self {
        Self::default()
    }

    /// Refetches the conversation list.
    pub async fn refresh(&mut self, client: &MincaClient) -> Result<()> {
        self.conversations = client.list_customer_chats().await?;
        tracing::debug!(count = self.conversations.len(), "customer conversations loaded");
        Ok(())
    }

    pub fn conversations(&self) -> &[ConversationSummary] {
        &self.conversations
    }

    /// Conversations passing the filters, in list order.
    pub fn filtered(
        &self,
        search: &str,
        status: StatusFilter,
        now: OffsetDateTime,
    ) -> Vec<&ConversationSummary> {
        self.conversations
            .iter()
            .filter(|summary| matches(summary, search, status, now))
            .collect()
    }

    /// Selects a conversation and loads its messages.
    pub async fn select(&mut self, client: &MincaClient, session_id: &str) -> Result<()> {
        self.selected = Some(session_id.to_string());
        self.messages.clear();
        self.messages = client.list_customer_messages(session_id).await?;
        Ok(())
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn messages(&self) -> &[CustomerMessage] {
        &self.messages
    }

    #[cfg(test)]
    fn with_conversations(conversations: Vec<ConversationSummary>) -> Self {
        Self {
            conversations,
            ..Self::default()
        }
    }
}
