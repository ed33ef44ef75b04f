use neechat::application::ports::HistoryStore;
use neechat::domain::ChatId;
use neechat::infrastructure::persistence::HistoryStoreFactory;
use neechat::presentation::config::{HistoryBackend, HistorySettings};

#[tokio::test]
async fn given_file_backend_when_creating_store_then_chats_land_in_configured_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("history.json");
    let settings = HistorySettings {
        backend: HistoryBackend::File,
        path: path.to_string_lossy().into_owned(),
    };

    let store = HistoryStoreFactory::create(&settings);
    store.create_chat(&ChatId::new("abc")).await.unwrap();

    let raw = std::fs::read_to_string(&path).unwrap();
    assert!(raw.contains("\"abc\""));
}

#[tokio::test]
async fn given_memory_backend_when_creating_store_then_nothing_touches_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("history.json");
    let settings = HistorySettings {
        backend: HistoryBackend::Memory,
        path: path.to_string_lossy().into_owned(),
    };

    let store = HistoryStoreFactory::create(&settings);
    store.create_chat(&ChatId::new("abc")).await.unwrap();

    assert_eq!(store.list_summaries().await.unwrap().len(), 1);
    assert!(!path.exists());
}
