use std::time::Duration;

use async_trait::async_trait;
use futures::stream::StreamExt;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use crate::application::ports::{FragmentStream, GenerationClient, GenerationError};
use crate::presentation::config::LlmSettings;

use super::SseDecoder;

pub struct GeminiClient {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
}

#[derive(Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Serialize, Deserialize)]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize)]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    error: Option<UpstreamError>,
}

#[derive(Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
}

#[derive(Deserialize)]
struct UpstreamError {
    #[serde(default)]
    message: String,
}

impl GeminiClient {
    pub fn new(settings: &LlmSettings) -> Result<Self, GenerationError> {
        let mut builder = Client::builder()
            .connect_timeout(Duration::from_secs(settings.connect_timeout_seconds));
        if settings.request_timeout_seconds > 0 {
            builder = builder.timeout(Duration::from_secs(settings.request_timeout_seconds));
        }
        let client = builder
            .build()
            .map_err(|e| GenerationError::ApiRequestFailed(e.to_string()))?;

        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            api_key: settings.api_key.clone(),
            model: settings.model.clone(),
        })
    }

    fn stream_url(&self) -> String {
        format!(
            "{}/models/{}:streamGenerateContent?alt=sse",
            self.base_url, self.model
        )
    }
}

#[async_trait]
impl GenerationClient for GeminiClient {
    #[tracing::instrument(skip(self, prompt), fields(model = %self.model))]
    async fn generate(&self, prompt: &str) -> Result<FragmentStream, GenerationError> {
        let request_body = GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: Some(prompt.to_string()),
                }],
            }],
        };

        let response = self
            .client
            .post(self.stream_url())
            .header("x-goog-api-key", &self.api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(GenerationError::RateLimited);
        }
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(GenerationError::Unauthorized);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GenerationError::ApiRequestFailed(format!(
                "HTTP {}: {}",
                status, body
            )));
        }

        let mut byte_stream = Box::pin(response.bytes_stream());
        let fragments = async_stream::stream! {
            let mut decoder = SseDecoder::new();
            let mut failed = false;

            'read: while let Some(chunk_result) = byte_stream.next().await {
                let bytes = match chunk_result {
                    Ok(bytes) => bytes,
                    Err(e) => {
                        yield Err(map_transport_error(e));
                        failed = true;
                        break 'read;
                    }
                };
                for data in decoder.push(&bytes) {
                    match parse_frame(&data) {
                        Ok(Some(text)) => yield Ok(text),
                        Ok(None) => {}
                        Err(e) => {
                            yield Err(e);
                            failed = true;
                            break 'read;
                        }
                    }
                }
            }

            if let Some(data) = decoder.finish().filter(|_| !failed) {
                match parse_frame(&data) {
                    Ok(Some(text)) => yield Ok(text),
                    Ok(None) => {}
                    Err(e) => yield Err(e),
                }
            }
        };

        Ok(Box::pin(fragments))
    }
}

/// Extracts the reply text carried by one streamed frame.
fn parse_frame(data: &str) -> Result<Option<String>, GenerationError> {
    let response: GenerateContentResponse = serde_json::from_str(data)
        .map_err(|e| GenerationError::InvalidResponse(e.to_string()))?;

    if let Some(error) = response.error {
        return Err(GenerationError::ApiRequestFailed(error.message));
    }

    let text: String = response
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|part| part.text)
                .collect()
        })
        .unwrap_or_default();

    Ok(if text.is_empty() { None } else { Some(text) })
}

fn map_transport_error(e: reqwest::Error) -> GenerationError {
    if e.is_timeout() {
        GenerationError::Timeout
    } else {
        GenerationError::ApiRequestFailed(e.to_string())
    }
}
