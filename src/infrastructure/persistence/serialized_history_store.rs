use async_trait::async_trait;

use crate::application::ports::{HistoryStore, HistoryStoreError};
use crate::domain::{Chat, ChatId, ChatSummary, Message};

use super::ChatLocks;

/// Serializes mutations of the same chat through [`ChatLocks`].
///
/// Two relays finishing on one chat append in lock order instead of racing
/// on the read-modify-write of the underlying store.
pub struct SerializedHistoryStore<S: HistoryStore> {
    inner: S,
    locks: ChatLocks,
}

impl<S: HistoryStore> SerializedHistoryStore<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            locks: ChatLocks::new(),
        }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }
}

#[async_trait]
impl<S: HistoryStore> HistoryStore for SerializedHistoryStore<S> {
    async fn create_chat(&self, id: &ChatId) -> Result<Chat, HistoryStoreError> {
        let _guard = self.locks.lock(id).await;
        self.inner.create_chat(id).await
    }

    async fn get_chat(&self, id: &ChatId) -> Result<Vec<Message>, HistoryStoreError> {
        self.inner.get_chat(id).await
    }

    async fn find_chat(&self, id: &ChatId) -> Result<Option<Chat>, HistoryStoreError> {
        self.inner.find_chat(id).await
    }

    async fn append_messages(
        &self,
        id: &ChatId,
        messages: Vec<Message>,
    ) -> Result<(), HistoryStoreError> {
        let _guard = self.locks.lock(id).await;
        self.inner.append_messages(id, messages).await
    }

    async fn list_summaries(&self) -> Result<Vec<ChatSummary>, HistoryStoreError> {
        self.inner.list_summaries().await
    }
}
