//! Browser-side chat flow: the message list state machine and the HTTP
//! client that feeds it from the reply stream.

mod chat_api_client;
mod chat_controller;
mod client_error;

pub use chat_api_client::ChatApiClient;
pub use chat_controller::{ChatController, MessageView, REPLY_FAILURE_TEXT};
pub use client_error::ClientError;
