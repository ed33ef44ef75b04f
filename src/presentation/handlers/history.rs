use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use crate::application::ports::HistoryStoreError;
use crate::domain::{Chat, ChatId, Message};
use crate::presentation::state::AppState;

use super::error_response::{error_response, internal_error};

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub chat_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub messages: Vec<Chat>,
}

#[derive(Debug, Deserialize)]
pub struct CreateChatRequest {
    #[serde(default)]
    pub chat_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CreateChatResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CreateChatResponse {
    fn created() -> Self {
        Self {
            success: true,
            message: Some("Chat created successfully".to_string()),
            error: None,
        }
    }

    fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            message: None,
            error: Some(error.into()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ChatMessagesResponse {
    pub messages: Vec<Message>,
}

/// `GET /api/v1/c?chat_id=`: the chats matching the id, as an array.
#[tracing::instrument(skip(state))]
pub async fn get_history_handler(
    State(state): State<AppState>,
    Query(query): Query<HistoryQuery>,
) -> Response {
    let Some(chat_id) = query.chat_id.as_deref().and_then(|raw| ChatId::parse(raw).ok()) else {
        return Json(HistoryResponse {
            messages: Vec::new(),
        })
        .into_response();
    };

    match state.history_store.find_chat(&chat_id).await {
        Ok(chat) => {
            tracing::debug!(found = chat.is_some(), "History lookup");
            Json(HistoryResponse {
                messages: chat.into_iter().collect(),
            })
            .into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to read history");
            internal_error("Failed to read history data")
        }
    }
}

/// `POST /api/v1/c`: creates an empty chat under a client-chosen id.
#[tracing::instrument(skip(state, payload))]
pub async fn create_chat_handler(
    State(state): State<AppState>,
    payload: Result<Json<CreateChatRequest>, JsonRejection>,
) -> Response {
    let raw_id = match payload {
        Ok(Json(request)) => request.chat_id.unwrap_or_default(),
        Err(rejection) => {
            tracing::warn!(error = %rejection, "Rejected malformed create-chat request");
            String::new()
        }
    };

    let chat_id = match ChatId::parse(&raw_id) {
        Ok(id) => id,
        Err(reason) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(CreateChatResponse::failed(reason)),
            )
                .into_response();
        }
    };

    match state.history_store.create_chat(&chat_id).await {
        Ok(_) => {
            tracing::info!(chat_id = %chat_id, "Chat created");
            (StatusCode::OK, Json(CreateChatResponse::created())).into_response()
        }
        Err(HistoryStoreError::AlreadyExists(id)) => {
            tracing::warn!(chat_id = %id, "Chat id already in use");
            (
                StatusCode::CONFLICT,
                Json(CreateChatResponse::failed(format!("Chat already exists: {}", id))),
            )
                .into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to create chat");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(CreateChatResponse::failed("Failed to add new chat")),
            )
                .into_response()
        }
    }
}

/// `GET /api/v1/chats`: sidebar summaries in history order.
#[tracing::instrument(skip(state))]
pub async fn list_chats_handler(State(state): State<AppState>) -> Response {
    match state.history_store.list_summaries().await {
        Ok(summaries) => Json(summaries).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to list chats");
            internal_error("Failed to read history data")
        }
    }
}

/// `GET /api/v1/chats/{chat_id}/messages`: one transcript, 404 when unknown.
#[tracing::instrument(skip(state))]
pub async fn chat_messages_handler(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Response {
    let Ok(chat_id) = ChatId::parse(&raw_id) else {
        return error_response(StatusCode::NOT_FOUND, format!("Chat not found: {}", raw_id));
    };

    match state.history_store.get_chat(&chat_id).await {
        Ok(messages) => Json(ChatMessagesResponse { messages }).into_response(),
        Err(HistoryStoreError::NotFound(id)) => {
            error_response(StatusCode::NOT_FOUND, format!("Chat not found: {}", id))
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to read chat");
            internal_error("Failed to read history data")
        }
    }
}
