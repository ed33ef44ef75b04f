use chrono::Utc;
use tempfile::TempDir;

use neechat::application::ports::{HistoryStore, HistoryStoreError};
use neechat::domain::{ChatId, HistoryDocument, Message, NO_MESSAGES_TITLE, timestamp_now};
use neechat::infrastructure::persistence::JsonFileHistoryStore;

fn store_in(dir: &TempDir) -> JsonFileHistoryStore {
    JsonFileHistoryStore::new(dir.path().join("history.json"))
}

fn exchange(question: &str, answer: &str) -> Vec<Message> {
    let now = timestamp_now();
    vec![
        Message::user(question.to_string(), now.clone()),
        Message::assistant(answer.to_string(), now),
    ]
}

#[tokio::test]
async fn given_missing_file_when_listing_then_empty_history() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);

    assert!(store.list_summaries().await.unwrap().is_empty());
    assert!(store.find_chat(&ChatId::new("abc")).await.unwrap().is_none());
}

#[tokio::test]
async fn given_blank_file_when_loading_then_empty_history() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);
    std::fs::write(store.path(), "  \n").unwrap();

    assert!(store.load().await.unwrap().chats.is_empty());
}

#[tokio::test]
async fn given_empty_object_file_when_loading_then_empty_history() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);
    std::fs::write(store.path(), "{}").unwrap();

    assert!(store.load().await.unwrap().chats.is_empty());
}

#[tokio::test]
async fn given_corrupt_file_when_loading_then_serialization_error() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);
    std::fs::write(store.path(), "{\"chats\": [").unwrap();

    let result = store.list_summaries().await;

    assert!(matches!(result, Err(HistoryStoreError::Serialization(_))));
}

#[tokio::test]
async fn given_new_chat_when_created_then_file_holds_pretty_printed_chat() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);

    let chat = store.create_chat(&ChatId::new("abc")).await.unwrap();

    assert_eq!(chat.title, "New Conversation");
    assert!(chat.messages.is_empty());
    let raw = std::fs::read_to_string(store.path()).unwrap();
    assert!(raw.contains('\n'));
    assert!(raw.contains("\"createdAt\""));
    let document: HistoryDocument = serde_json::from_str(&raw).unwrap();
    assert_eq!(document.chats.len(), 1);
    assert_eq!(document.chats[0].id, ChatId::new("abc"));
}

#[tokio::test]
async fn given_nested_path_when_saving_then_parent_directory_is_created() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileHistoryStore::new(dir.path().join("data").join("history.json"));

    store.create_chat(&ChatId::new("abc")).await.unwrap();

    assert!(store.path().exists());
    assert!(!store.path().with_extension("json.tmp").exists());
}

#[tokio::test]
async fn given_two_chats_when_listing_then_newest_first_with_placeholder_titles() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);
    store.create_chat(&ChatId::new("first")).await.unwrap();
    store.create_chat(&ChatId::new("second")).await.unwrap();

    let summaries = store.list_summaries().await.unwrap();

    let ids: Vec<&str> = summaries.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, vec!["second", "first"]);
    assert!(summaries.iter().all(|s| s.title == NO_MESSAGES_TITLE));
}

#[tokio::test]
async fn given_existing_chat_when_created_again_then_already_exists_and_file_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);
    store.create_chat(&ChatId::new("abc")).await.unwrap();
    let before = std::fs::read_to_string(store.path()).unwrap();

    let result = store.create_chat(&ChatId::new("abc")).await;

    assert!(matches!(result, Err(HistoryStoreError::AlreadyExists(_))));
    assert_eq!(std::fs::read_to_string(store.path()).unwrap(), before);
}

#[tokio::test]
async fn given_unknown_chat_when_appending_then_not_found_and_no_chat_created() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);

    let result = store
        .append_messages(&ChatId::new("ghost"), exchange("q", "a"))
        .await;

    assert!(matches!(result, Err(HistoryStoreError::NotFound(_))));
    assert!(store.list_summaries().await.unwrap().is_empty());
}

#[tokio::test]
async fn given_unknown_chat_when_reading_transcript_then_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);

    let result = store.get_chat(&ChatId::new("ghost")).await;

    assert!(matches!(result, Err(HistoryStoreError::NotFound(_))));
}

#[tokio::test]
async fn given_two_appends_when_reading_then_messages_kept_in_append_order() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);
    let id = ChatId::new("abc");
    let created = store.create_chat(&id).await.unwrap();

    store.append_messages(&id, exchange("q1", "a1")).await.unwrap();
    store.append_messages(&id, exchange("q2", "a2")).await.unwrap();

    let contents: Vec<String> = store
        .get_chat(&id)
        .await
        .unwrap()
        .into_iter()
        .map(|m| m.content)
        .collect();
    assert_eq!(contents, vec!["q1", "a1", "q2", "a2"]);

    let chat = store.find_chat(&id).await.unwrap().unwrap();
    assert!(chat.updated_at >= created.updated_at);
    assert_eq!(chat.created_at, created.created_at);
}

#[tokio::test]
async fn given_persisted_history_when_reopened_then_same_document_is_read() {
    let dir = tempfile::tempdir().unwrap();
    let id = ChatId::new("abc");
    {
        let store = store_in(&dir);
        store.create_chat(&id).await.unwrap();
        store.append_messages(&id, exchange("hello", "world")).await.unwrap();
    }

    let reopened = store_in(&dir);
    let summaries = reopened.list_summaries().await.unwrap();

    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0].title, "hello");
    assert_eq!(reopened.get_chat(&id).await.unwrap().len(), 2);
}

#[tokio::test]
async fn given_file_with_legacy_stamps_when_used_then_loads_and_keeps_them() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);
    std::fs::write(
        store.path(),
        r#"{"chats":[{"id":"old","title":" chat_old","createdAt":"1700000000000","updatedAt":"10:30:00 AM","messages":[{"id":"m1","isUser":true,"content":"Hi","timestamp":"10:30:00 AM"}]}]}"#,
    )
    .unwrap();
    let id = ChatId::new("old");

    let summaries = store.list_summaries().await.unwrap();
    store.append_messages(&id, exchange("q", "a")).await.unwrap();

    assert_eq!(summaries[0].title, "Hi");
    let chat = store.find_chat(&id).await.unwrap().unwrap();
    assert_eq!(chat.created_at, "1700000000000");
    assert_eq!(chat.messages[0].timestamp, "10:30:00 AM");
    assert_eq!(chat.messages.len(), 3);
}
