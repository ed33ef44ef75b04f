use std::convert::Infallible;
use std::time::Duration;

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::header;
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use crate::application::services::{InvalidRequest, RelayRequest};
use crate::domain::ChatId;
use crate::presentation::state::AppState;

use super::error_response::{bad_request, internal_error};

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub chat_id: Option<String>,
}

/// `POST /api/v1/chat`: relays the reply as `text/event-stream`.
///
/// Only request validation answers with JSON; once the stream is open every
/// upstream failure, including one while connecting, is an `error` event.
#[tracing::instrument(skip(state, payload))]
pub async fn chat_handler(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Response {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            tracing::warn!(error = %rejection, "Rejected malformed chat request");
            return bad_request(InvalidRequest::EmptyMessage.to_string());
        }
    };

    let relay_request = RelayRequest {
        message: request.message.unwrap_or_default(),
        chat_id: request
            .chat_id
            .as_deref()
            .and_then(|raw| ChatId::parse(raw).ok()),
    };

    let mut relay_stream = match state.relay.start(relay_request) {
        Ok(stream) => stream,
        Err(reason @ InvalidRequest::EmptyMessage) => {
            tracing::warn!("Chat request with empty message");
            return bad_request(reason.to_string());
        }
        Err(reason @ InvalidRequest::MissingCredential) => {
            tracing::error!("Chat request rejected, generation client not configured");
            return internal_error(reason.to_string());
        }
    };

    let sse_stream = async_stream::stream! {
        while let Some(event) = relay_stream.recv().await {
            match Event::default().json_data(&event) {
                Ok(frame) => yield Ok::<_, Infallible>(frame),
                Err(e) => {
                    tracing::error!(error = %e, "Failed to encode stream event");
                    break;
                }
            }
        }
    };

    let keep_alive_seconds = state.settings.relay.sse_keep_alive_seconds.max(1);
    let sse = Sse::new(sse_stream).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(keep_alive_seconds))
            .text("keep-alive"),
    );

    ([(header::CACHE_CONTROL, "no-cache")], sse).into_response()
}
