mod chat;
mod error_response;
mod health;
mod history;
mod readme;

pub use chat::{ChatRequest, chat_handler};
pub use error_response::ErrorResponse;
pub use health::health_handler;
pub use history::{
    ChatMessagesResponse, CreateChatRequest, CreateChatResponse, HistoryQuery, HistoryResponse,
    chat_messages_handler, create_chat_handler, get_history_handler, list_chats_handler,
};
pub use readme::readme_handler;
