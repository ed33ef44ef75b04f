use futures::StreamExt;

use neechat::application::ports::{GenerationClient, GenerationError};
use neechat::infrastructure::llm::ScriptedGenerationClient;

#[tokio::test]
async fn given_fixed_script_when_generating_then_fragments_replayed_in_order() {
    let client = ScriptedGenerationClient::new(["a", "b", "c"]);

    let fragments: Vec<String> = client
        .generate("ignored")
        .await
        .unwrap()
        .map(Result::unwrap)
        .collect()
        .await;

    assert_eq!(fragments, vec!["a", "b", "c"]);
}

#[tokio::test]
async fn given_echo_script_when_generating_then_prompt_returned_word_by_word() {
    let client = ScriptedGenerationClient::echo();

    let fragments: Vec<String> = client
        .generate("hello big world")
        .await
        .unwrap()
        .map(Result::unwrap)
        .collect()
        .await;

    assert_eq!(fragments, vec!["hello ", "big ", "world"]);
}

#[tokio::test]
async fn given_failure_after_one_when_generating_then_error_follows_first_fragment() {
    let client = ScriptedGenerationClient::new(["a", "b", "c"]).failing_after(1);

    let items: Vec<Result<String, GenerationError>> =
        client.generate("x").await.unwrap().collect().await;

    assert_eq!(items.len(), 2);
    assert_eq!(items[0].as_ref().unwrap(), "a");
    assert!(matches!(items[1], Err(GenerationError::ApiRequestFailed(_))));
}
