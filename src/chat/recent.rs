//! The recent-chat list, cached and paged.

use crate::client::MincaClient;
use crate::error::Result;
use crate::types::Chat;

/// Chats shown per page.
pub const PAGE_SIZE: usize = 5;

/// Cached `GET /chat` results shown a page at a time.
///
/// The cache is refetched on the next access after [`RecentChats::invalidate`].
#[derive(Debug, Default)]
pub struct RecentChats {
    chats: Option<Vec<Chat>>,
    shown: usize,
}

impl RecentChats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks the cached list stale.
    pub fn invalidate(&mut self) {
        self.chats = None;
    }

    pub fn is_stale(&self) -> bool {
        self.chats.is_none()
    }

    /// Returns the visible chats, fetching first if the cache is stale.
    pub async fn visible(&mut self, client: &MincaClient) -> Result<&[Chat]> {
        if self.chats.is_none() {
            let chats = client.list_chats().await?;
            tracing::debug!(count = chats.len(), "recent chats loaded");
            self.replace(chats);
        }
        Ok(self.visible_cached())
    }

    /// Shows one more page.
    pub fn load_more(&mut self) {
        self.shown += PAGE_SIZE;
    }

    /// Whether more chats are hidden behind "load more".
    pub fn has_more(&self) -> bool {
        self.chats
            .as_ref()
            .is_some_and(|chats| chats.len() > self.shown)
    }

    fn replace(&mut self, chats: Vec<Chat>) {
        self.chats = Some(chats);
        self.shown = self.shown.max(PAGE_SIZE);
    }

    fn visible_cached(&self) -> &[Chat] {
        match &self.chats {
            Some(chats) => &chats[..self.shown.min(chats.len())],
            None => &[],
        }
    }
}
