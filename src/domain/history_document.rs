use serde::{Deserialize, Serialize};

use super::{Chat, ChatId, ChatSummary};

/// The whole persisted state: every chat, newest first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistoryDocument {
    #[serde(default)]
    pub chats: Vec<Chat>,
}

impl HistoryDocument {
    pub fn find(&self, id: &ChatId) -> Option<&Chat> {
        self.chats.iter().find(|c| &c.id == id)
    }

    pub fn find_mut(&mut self, id: &ChatId) -> Option<&mut Chat> {
        self.chats.iter_mut().find(|c| &c.id == id)
    }

    pub fn contains(&self, id: &ChatId) -> bool {
        self.find(id).is_some()
    }

    pub fn insert_front(&mut self, chat: Chat) {
        self.chats.insert(0, chat);
    }

    pub fn summaries(&self) -> Vec<ChatSummary> {
        self.chats.iter().map(Chat::summary).collect()
    }
}
