use std::io;

#[derive(Debug, thiserror::Error)]
pub enum HistoryStoreError {
    #[error("chat not found: {0}")]
    NotFound(String),
    #[error("chat already exists: {0}")]
    AlreadyExists(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("serialization failed: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for HistoryStoreError {
    fn from(e: serde_json::Error) -> Self {
        HistoryStoreError::Serialization(e.to_string())
    }
}
