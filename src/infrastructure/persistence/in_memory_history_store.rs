use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::application::ports::{HistoryStore, HistoryStoreError};
use crate::domain::{Chat, ChatId, ChatSummary, HistoryDocument, Message};

use super::document_ops;

/// History kept in process memory. Same semantics as the file store.
#[derive(Default)]
pub struct InMemoryHistoryStore {
    document: RwLock<HistoryDocument>,
}

impl InMemoryHistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(document: HistoryDocument) -> Self {
        Self {
            document: RwLock::new(document),
        }
    }

    pub async fn snapshot(&self) -> HistoryDocument {
        self.document.read().await.clone()
    }
}

#[async_trait]
impl HistoryStore for InMemoryHistoryStore {
    async fn create_chat(&self, id: &ChatId) -> Result<Chat, HistoryStoreError> {
        let mut document = self.document.write().await;
        document_ops::create_chat(&mut document, id)
    }

    async fn get_chat(&self, id: &ChatId) -> Result<Vec<Message>, HistoryStoreError> {
        let document = self.document.read().await;
        document_ops::messages_of(&document, id)
    }

    async fn find_chat(&self, id: &ChatId) -> Result<Option<Chat>, HistoryStoreError> {
        Ok(self.document.read().await.find(id).cloned())
    }

    async fn append_messages(
        &self,
        id: &ChatId,
        messages: Vec<Message>,
    ) -> Result<(), HistoryStoreError> {
        let mut document = self.document.write().await;
        document_ops::append_messages(&mut document, id, messages)
    }

    async fn list_summaries(&self) -> Result<Vec<ChatSummary>, HistoryStoreError> {
        Ok(self.document.read().await.summaries())
    }
}
