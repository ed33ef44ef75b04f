use async_trait::async_trait;

use crate::domain::{Chat, ChatId, ChatSummary, Message};

use super::HistoryStoreError;

/// Owner of the chat history document.
///
/// Each call is a complete read-modify-write of the document; callers never
/// hold on to the parsed state between calls.
#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// Inserts an empty chat at the front of the history.
    ///
    /// Fails with [`HistoryStoreError::AlreadyExists`] when `id` is taken.
    async fn create_chat(&self, id: &ChatId) -> Result<Chat, HistoryStoreError>;

    async fn get_chat(&self, id: &ChatId) -> Result<Vec<Message>, HistoryStoreError>;

    async fn find_chat(&self, id: &ChatId) -> Result<Option<Chat>, HistoryStoreError>;

    /// Appends `messages` in order to the end of the chat transcript.
    async fn append_messages(
        &self,
        id: &ChatId,
        messages: Vec<Message>,
    ) -> Result<(), HistoryStoreError>;

    async fn list_summaries(&self) -> Result<Vec<ChatSummary>, HistoryStoreError>;
}
