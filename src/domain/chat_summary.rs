use serde::{Deserialize, Serialize};

use super::ChatId;

pub const NO_MESSAGES_TITLE: &str = "No messages";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatSummary {
    pub id: ChatId,
    pub title: String,
}
