use tokio::net::TcpListener;

use neechat::client::{ChatApiClient, ChatController, ClientError, REPLY_FAILURE_TEXT};
use neechat::domain::ChatId;
use neechat::infrastructure::llm::ScriptedGenerationClient;

use crate::helpers::{FIVE_FRAGMENTS, TestApp, stored_messages, test_app};

async fn serve(app: TestApp) -> (String, TestApp) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let router = app.router.clone();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    (format!("http://{}", addr), app)
}

#[tokio::test]
async fn given_new_chat_when_sending_message_then_rendered_reply_matches_persisted_reply() {
    let (base_url, app) = serve(test_app(Some(ScriptedGenerationClient::new(FIVE_FRAGMENTS)))).await;
    let api = ChatApiClient::new(base_url);
    let mut controller = ChatController::new(None);
    let chat_id = controller.start_new_chat();
    api.create_chat(&chat_id).await.unwrap();

    api.send_message(&mut controller, "Tell me").await.unwrap();

    let rendered = controller.messages();
    assert_eq!(rendered.len(), 2);
    assert_eq!(rendered[1].content, FIVE_FRAGMENTS.concat());
    assert!(!controller.is_loading());

    let persisted = stored_messages(&app.store, chat_id.as_str()).await;
    assert_eq!(persisted.len(), 2);
    assert_eq!(persisted[1].content, rendered[1].content);
}

#[tokio::test]
async fn given_upstream_failure_when_sending_message_then_failure_text_rendered() {
    let (base_url, app) = serve(test_app(Some(
        ScriptedGenerationClient::new(FIVE_FRAGMENTS).failing_after(2),
    )))
    .await;
    let api = ChatApiClient::new(base_url);
    let mut controller = ChatController::new(Some(ChatId::new("abc")));
    api.create_chat(&ChatId::new("abc")).await.unwrap();

    let result = api.send_message(&mut controller, "hello").await;

    assert!(matches!(result, Err(ClientError::ReplyFailed(_))));
    assert_eq!(controller.messages()[1].content, REPLY_FAILURE_TEXT);
    assert!(stored_messages(&app.store, "abc").await.is_empty());
}

#[tokio::test]
async fn given_unconfigured_server_when_sending_message_then_status_error_and_failure_text() {
    let (base_url, _app) = serve(test_app(None)).await;
    let api = ChatApiClient::new(base_url);
    let mut controller = ChatController::new(Some(ChatId::new("abc")));

    let result = api.send_message(&mut controller, "hello").await;

    match result {
        Err(ClientError::Status { status, body }) => {
            assert_eq!(status, 500);
            assert!(body.contains("Gemini API key not configured"));
        }
        other => panic!("unexpected result: {:?}", other),
    }
    assert_eq!(controller.messages()[1].content, REPLY_FAILURE_TEXT);
}

#[tokio::test]
async fn given_completed_exchange_when_reloading_chat_then_transcript_restored() {
    let (base_url, _app) = serve(test_app(Some(ScriptedGenerationClient::new(["pong"])))).await;
    let api = ChatApiClient::new(base_url);
    let chat_id = ChatId::new("abc");
    api.create_chat(&chat_id).await.unwrap();
    let mut first = ChatController::new(Some(chat_id.clone()));
    api.send_message(&mut first, "ping").await.unwrap();

    let mut reloaded = ChatController::new(Some(chat_id));
    api.load_chat(&mut reloaded).await.unwrap();

    let contents: Vec<&str> = reloaded
        .messages()
        .iter()
        .map(|m| m.content.as_str())
        .collect();
    assert_eq!(contents, vec!["ping", "pong"]);
}

#[tokio::test]
async fn given_created_chats_when_listing_then_summaries_returned_newest_first() {
    let (base_url, _app) = serve(test_app(None)).await;
    let api = ChatApiClient::new(base_url);
    api.create_chat(&ChatId::new("first")).await.unwrap();
    api.create_chat(&ChatId::new("second")).await.unwrap();

    let summaries = api.list_chats().await.unwrap();

    let ids: Vec<&str> = summaries.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, vec!["second", "first"]);
}

#[tokio::test]
async fn given_existing_chat_when_creating_again_then_conflict_status() {
    let (base_url, _app) = serve(test_app(None)).await;
    let api = ChatApiClient::new(base_url);
    api.create_chat(&ChatId::new("abc")).await.unwrap();

    let result = api.create_chat(&ChatId::new("abc")).await;

    assert!(matches!(result, Err(ClientError::Status { status: 409, .. })));
}
