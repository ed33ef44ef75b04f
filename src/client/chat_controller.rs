use uuid::Uuid;

use crate::domain::{ChatId, Message, MessageId, StreamEvent, StreamEventKind};

use super::ClientError;

/// Shown in place of a reply whose stream failed.
pub const REPLY_FAILURE_TEXT: &str = "Sorry, there was an error processing your request.";

/// Render state of one bubble in the conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageView {
    pub id: MessageId,
    pub content: String,
    pub is_user: bool,
    pub is_streaming: bool,
}

impl From<Message> for MessageView {
    fn from(message: Message) -> Self {
        Self {
            id: message.id,
            content: message.content,
            is_user: message.is_user,
            is_streaming: false,
        }
    }
}

/// Client-side conversation state.
///
/// Views are kept in insertion order and updated in place by id; nothing is
/// ever reordered or deduplicated.
#[derive(Debug, Default)]
pub struct ChatController {
    chat_id: Option<ChatId>,
    messages: Vec<MessageView>,
}

impl ChatController {
    pub fn new(chat_id: Option<ChatId>) -> Self {
        Self {
            chat_id,
            messages: Vec::new(),
        }
    }

    /// Starts a fresh conversation under a newly minted id.
    pub fn start_new_chat(&mut self) -> ChatId {
        let chat_id = ChatId::new(Uuid::new_v4().to_string());
        self.chat_id = Some(chat_id.clone());
        self.messages.clear();
        chat_id
    }

    pub fn chat_id(&self) -> Option<&ChatId> {
        self.chat_id.as_ref()
    }

    pub fn messages(&self) -> &[MessageView] {
        &self.messages
    }

    /// True while a reply placeholder is still receiving fragments.
    pub fn is_loading(&self) -> bool {
        self.messages.iter().any(|m| m.is_streaming)
    }

    pub fn load_history(&mut self, messages: Vec<Message>) {
        self.messages = messages.into_iter().map(MessageView::from).collect();
    }

    /// Appends the user's bubble and an empty streaming reply placeholder.
    /// Returns the placeholder id that stream events are applied to.
    pub fn begin_send(&mut self, text: &str) -> Result<MessageId, ClientError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ClientError::EmptyMessage);
        }
        if self.is_loading() {
            return Err(ClientError::ReplyInProgress);
        }

        self.messages.push(MessageView {
            id: MessageId::new(),
            content: text.to_string(),
            is_user: true,
            is_streaming: false,
        });

        let reply_id = MessageId::new();
        self.messages.push(MessageView {
            id: reply_id.clone(),
            content: String::new(),
            is_user: false,
            is_streaming: true,
        });

        Ok(reply_id)
    }

    /// Merges one wire event into the reply placeholder. Returns `true` when
    /// the event ends the stream.
    pub fn apply_event(&mut self, reply_id: &MessageId, event: &StreamEvent) -> bool {
        let Some(view) = self.find_mut(reply_id) else {
            return event.is_terminal();
        };

        match event.kind {
            StreamEventKind::Chunk => view.content.push_str(&event.content),
            StreamEventKind::Done => view.is_streaming = false,
            StreamEventKind::Error => {
                view.content = REPLY_FAILURE_TEXT.to_string();
                view.is_streaming = false;
            }
        }

        event.is_terminal()
    }

    /// Marks the reply as failed, e.g. after a transport error.
    pub fn fail(&mut self, reply_id: &MessageId) {
        if let Some(view) = self.find_mut(reply_id) {
            view.content = REPLY_FAILURE_TEXT.to_string();
            view.is_streaming = false;
        }
    }

    pub fn is_streaming(&self, reply_id: &MessageId) -> bool {
        self.messages
            .iter()
            .any(|m| &m.id == reply_id && m.is_streaming)
    }

    fn find_mut(&mut self, id: &MessageId) -> Option<&mut MessageView> {
        self.messages.iter_mut().find(|m| &m.id == id)
    }
}
