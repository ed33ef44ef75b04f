use futures::StreamExt;

use neechat::infrastructure::llm::create_generation_client;
use neechat::presentation::config::{LlmProvider, LlmSettings};

#[test]
fn given_gemini_without_key_when_creating_client_then_none() {
    let settings = LlmSettings {
        provider: LlmProvider::Gemini,
        api_key: "  ".to_string(),
        ..LlmSettings::default()
    };

    let client = create_generation_client(&settings).unwrap();

    assert!(client.is_none());
}

#[test]
fn given_gemini_with_key_when_creating_client_then_some() {
    let settings = LlmSettings {
        provider: LlmProvider::Gemini,
        api_key: "key".to_string(),
        ..LlmSettings::default()
    };

    let client = create_generation_client(&settings).unwrap();

    assert!(client.is_some());
}

#[tokio::test]
async fn given_scaffold_provider_when_creating_client_then_prompt_is_echoed() {
    let settings = LlmSettings {
        provider: LlmProvider::Scaffold,
        ..LlmSettings::default()
    };

    let client = create_generation_client(&settings).unwrap().unwrap();
    let reply: String = client
        .generate("echo me")
        .await
        .unwrap()
        .map(Result::unwrap)
        .collect()
        .await;

    assert_eq!(reply, "echo me");
}
