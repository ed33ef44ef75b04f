use serde::{Deserialize, Serialize};

use super::{ChatId, ChatSummary, Message, NO_MESSAGES_TITLE, timestamp_now};

pub const DEFAULT_CHAT_TITLE: &str = "New Conversation";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chat {
    pub id: ChatId,
    pub title: String,
    pub created_at: String,
    pub updated_at: String,
    #[serde(default)]
    pub messages: Vec<Message>,
}

impl Chat {
    pub fn new(id: ChatId) -> Self {
        let now = timestamp_now();
        Self {
            id,
            title: DEFAULT_CHAT_TITLE.to_string(),
            created_at: now.clone(),
            updated_at: now,
            messages: Vec::new(),
        }
    }

    /// Sidebar entry: titled by the first message, not by `title`.
    pub fn summary(&self) -> ChatSummary {
        let title = self
            .messages
            .first()
            .map(|m| m.content.clone())
            .unwrap_or_else(|| NO_MESSAGES_TITLE.to_string());

        ChatSummary {
            id: self.id.clone(),
            title,
        }
    }
}
