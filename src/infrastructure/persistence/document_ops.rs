use crate::application::ports::HistoryStoreError;
use crate::domain::{Chat, ChatId, HistoryDocument, Message, timestamp_now};

pub(super) fn create_chat(
    document: &mut HistoryDocument,
    id: &ChatId,
) -> Result<Chat, HistoryStoreError> {
    if document.contains(id) {
        return Err(HistoryStoreError::AlreadyExists(id.to_string()));
    }
    let chat = Chat::new(id.clone());
    document.insert_front(chat.clone());
    Ok(chat)
}

pub(super) fn messages_of(
    document: &HistoryDocument,
    id: &ChatId,
) -> Result<Vec<Message>, HistoryStoreError> {
    document
        .find(id)
        .map(|chat| chat.messages.clone())
        .ok_or_else(|| HistoryStoreError::NotFound(id.to_string()))
}

pub(super) fn append_messages(
    document: &mut HistoryDocument,
    id: &ChatId,
    messages: Vec<Message>,
) -> Result<(), HistoryStoreError> {
    let chat = document
        .find_mut(id)
        .ok_or_else(|| HistoryStoreError::NotFound(id.to_string()))?;
    chat.messages.extend(messages);
    chat.updated_at = timestamp_now();
    Ok(())
}
