use axum::Router;
use axum::http::Method;
use axum::http::header::CONTENT_TYPE;
use axum::middleware;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::infrastructure::observability::request_id_middleware;
use crate::presentation::handlers::{
    chat_handler, chat_messages_handler, create_chat_handler, get_history_handler,
    health_handler, list_chats_handler, readme_handler,
};
use crate::presentation::state::AppState;

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([CONTENT_TYPE]);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    Router::new()
        .route("/health", get(health_handler))
        .route("/api/readme", get(readme_handler))
        .route("/api/v1/chat", post(chat_handler))
        .route(
            "/api/v1/c",
            get(get_history_handler).post(create_chat_handler),
        )
        .route(
            "/api/v1/c/",
            get(get_history_handler).post(create_chat_handler),
        )
        .route("/api/v1/chats", get(list_chats_handler))
        .route(
            "/api/v1/chats/{chat_id}/messages",
            get(chat_messages_handler),
        )
        .layer(middleware::from_fn(request_id_middleware))
        .layer(trace_layer)
        .layer(cors)
        .with_state(state)
}
