use futures::stream::StreamExt;
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};

use crate::domain::{Chat, ChatId, ChatSummary, MessageId, StreamEvent, StreamEventKind};
use crate::infrastructure::llm::SseDecoder;

use super::{ChatController, ClientError};

#[derive(Serialize)]
struct SendMessageBody<'a> {
    message: &'a str,
    chat_id: Option<&'a str>,
}

#[derive(Serialize)]
struct CreateChatBody<'a> {
    chat_id: &'a str,
}

#[derive(Deserialize)]
struct HistoryPayload {
    #[serde(default)]
    messages: Vec<Chat>,
}

/// HTTP side of the chat UI: talks to the server and drives a
/// [`ChatController`] from the reply stream.
pub struct ChatApiClient {
    client: Client,
    base_url: String,
}

impl ChatApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Sends `text` in the controller's chat and renders the reply as it
    /// streams in. On any failure the reply bubble shows the failure text.
    #[tracing::instrument(skip(self, controller, text), fields(chat_id = ?controller.chat_id()))]
    pub async fn send_message(
        &self,
        controller: &mut ChatController,
        text: &str,
    ) -> Result<(), ClientError> {
        let reply_id = controller.begin_send(text)?;

        let result = self.stream_reply(controller, &reply_id, text.trim()).await;
        if let Err(e) = &result {
            tracing::warn!(error = %e, "Reply stream failed");
            controller.fail(&reply_id);
        }
        result
    }

    async fn stream_reply(
        &self,
        controller: &mut ChatController,
        reply_id: &MessageId,
        text: &str,
    ) -> Result<(), ClientError> {
        let body = SendMessageBody {
            message: text,
            chat_id: controller.chat_id().map(ChatId::as_str),
        };
        let response = self
            .client
            .post(format!("{}/api/v1/chat", self.base_url))
            .json(&body)
            .send()
            .await?;
        let response = ensure_success(response).await?;

        let mut decoder = SseDecoder::new();
        let mut bytes = Box::pin(response.bytes_stream());

        while let Some(chunk) = bytes.next().await {
            for data in decoder.push(&chunk?) {
                let event: StreamEvent = match serde_json::from_str(&data) {
                    Ok(event) => event,
                    Err(e) => {
                        tracing::warn!(error = %e, "Skipping unreadable stream event");
                        continue;
                    }
                };
                if controller.apply_event(reply_id, &event) {
                    return match event.kind {
                        StreamEventKind::Error => Err(ClientError::ReplyFailed(event.content)),
                        _ => Ok(()),
                    };
                }
            }
        }

        Err(ClientError::StreamClosed)
    }

    /// Replaces the controller's messages with the persisted transcript.
    pub async fn load_chat(&self, controller: &mut ChatController) -> Result<(), ClientError> {
        let Some(chat_id) = controller.chat_id().cloned() else {
            return Ok(());
        };
        let chats = self.fetch_history(&chat_id).await?;
        let messages = chats
            .into_iter()
            .next()
            .map(|chat| chat.messages)
            .unwrap_or_default();
        controller.load_history(messages);
        Ok(())
    }

    pub async fn fetch_history(&self, chat_id: &ChatId) -> Result<Vec<Chat>, ClientError> {
        let response = self
            .client
            .get(format!("{}/api/v1/c", self.base_url))
            .query(&[("chat_id", chat_id.as_str())])
            .send()
            .await?;
        let payload: HistoryPayload = ensure_success(response).await?.json().await?;
        Ok(payload.messages)
    }

    pub async fn create_chat(&self, chat_id: &ChatId) -> Result<(), ClientError> {
        let response = self
            .client
            .post(format!("{}/api/v1/c", self.base_url))
            .json(&CreateChatBody {
                chat_id: chat_id.as_str(),
            })
            .send()
            .await?;
        ensure_success(response).await?;
        Ok(())
    }

    pub async fn list_chats(&self) -> Result<Vec<ChatSummary>, ClientError> {
        let response = self
            .client
            .get(format!("{}/api/v1/chats", self.base_url))
            .send()
            .await?;
        Ok(ensure_success(response).await?.json().await?)
    }
}

async fn ensure_success(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(ClientError::Status {
        status: status.as_u16(),
        body,
    })
}
