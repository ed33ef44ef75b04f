use serde::{Deserialize, Serialize};

use super::MessageId;

/// One entry of a chat transcript. Immutable once appended.
///
/// `timestamp` is kept as the string it was stored with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: MessageId,
    pub is_user: bool,
    pub content: String,
    pub timestamp: String,
}

impl Message {
    pub fn new(is_user: bool, content: String, timestamp: String) -> Self {
        Self {
            id: MessageId::new(),
            is_user,
            content,
            timestamp,
        }
    }

    pub fn user(content: String, timestamp: String) -> Self {
        Self::new(true, content, timestamp)
    }

    pub fn assistant(content: String, timestamp: String) -> Self {
        Self::new(false, content, timestamp)
    }
}
