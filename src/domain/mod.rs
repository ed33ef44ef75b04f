mod chat;
mod chat_id;
mod chat_summary;
mod history_document;
mod message;
mod message_id;
mod stream_event;
mod timestamp;

pub use chat::{Chat, DEFAULT_CHAT_TITLE};
pub use chat_id::ChatId;
pub use chat_summary::{ChatSummary, NO_MESSAGES_TITLE};
pub use history_document::HistoryDocument;
pub use message::Message;
pub use message_id::MessageId;
pub use stream_event::{GENERIC_STREAM_ERROR, StreamEvent, StreamEventKind};
pub use timestamp::timestamp_now;
