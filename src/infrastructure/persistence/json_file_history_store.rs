use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::instrument;

use crate::application::ports::{HistoryStore, HistoryStoreError};
use crate::domain::{Chat, ChatId, ChatSummary, HistoryDocument, Message};

use super::document_ops;

/// History persisted as one pretty-printed JSON document.
///
/// Every operation reads the whole file, mutates it in memory and, for
/// mutations, writes the whole file back through a temp file and rename.
/// All chats share the file, so document access is serialized by one mutex.
pub struct JsonFileHistoryStore {
    path: PathBuf,
    document_lock: Mutex<()>,
}

impl JsonFileHistoryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            document_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the document. A missing or blank file is an empty history.
    pub async fn load(&self) -> Result<HistoryDocument, HistoryStoreError> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(HistoryDocument::default()),
            Err(e) => return Err(HistoryStoreError::Io(e)),
        };

        if raw.trim().is_empty() {
            return Ok(HistoryDocument::default());
        }

        Ok(serde_json::from_str(&raw)?)
    }

    pub async fn save(&self, document: &HistoryDocument) -> Result<(), HistoryStoreError> {
        let serialized = serde_json::to_string_pretty(document)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        let temp_path = self.path.with_extension("json.tmp");
        tokio::fs::write(&temp_path, serialized).await?;
        tokio::fs::rename(&temp_path, &self.path).await?;

        tracing::debug!(path = %self.path.display(), chats = document.chats.len(), "History written");
        Ok(())
    }
}

#[async_trait]
impl HistoryStore for JsonFileHistoryStore {
    #[instrument(skip(self), fields(chat_id = %id))]
    async fn create_chat(&self, id: &ChatId) -> Result<Chat, HistoryStoreError> {
        let _guard = self.document_lock.lock().await;
        let mut document = self.load().await?;
        let chat = document_ops::create_chat(&mut document, id)?;
        self.save(&document).await?;
        Ok(chat)
    }

    #[instrument(skip(self), fields(chat_id = %id))]
    async fn get_chat(&self, id: &ChatId) -> Result<Vec<Message>, HistoryStoreError> {
        let _guard = self.document_lock.lock().await;
        let document = self.load().await?;
        document_ops::messages_of(&document, id)
    }

    #[instrument(skip(self), fields(chat_id = %id))]
    async fn find_chat(&self, id: &ChatId) -> Result<Option<Chat>, HistoryStoreError> {
        let _guard = self.document_lock.lock().await;
        let document = self.load().await?;
        Ok(document.find(id).cloned())
    }

    #[instrument(skip(self, messages), fields(chat_id = %id, count = messages.len()))]
    async fn append_messages(
        &self,
        id: &ChatId,
        messages: Vec<Message>,
    ) -> Result<(), HistoryStoreError> {
        let _guard = self.document_lock.lock().await;
        let mut document = self.load().await?;
        document_ops::append_messages(&mut document, id, messages)?;
        self.save(&document).await
    }

    #[instrument(skip(self))]
    async fn list_summaries(&self) -> Result<Vec<ChatSummary>, HistoryStoreError> {
        let _guard = self.document_lock.lock().await;
        let document = self.load().await?;
        Ok(document.summaries())
    }
}
