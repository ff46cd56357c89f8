use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;

use super::resolver::OptionResolver;
use super::service::{ConversationError, ConversationService};
use super::session::{SessionId, SessionStore};

/// Router builder exposing the kiosk chat endpoints.
pub fn chat_router<S, R>(service: Arc<ConversationService<S, R>>) -> Router
where
    S: SessionStore + 'static,
    R: OptionResolver + 'static,
{
    Router::new()
        .route("/api/v1/chat/sessions", post(start_handler::<S, R>))
        .route(
            "/api/v1/chat/sessions/:session_id/messages",
            post(message_handler::<S, R>),
        )
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct MessageRequest {
    pub(crate) message: String,
}

async fn start_handler<S, R>(State(service): State<Arc<ConversationService<S, R>>>) -> Response
where
    S: SessionStore + 'static,
    R: OptionResolver + 'static,
{
    match service.start().await {
        Ok(opening) => (StatusCode::CREATED, Json(opening)).into_response(),
        Err(error) => error_response(error),
    }
}

async fn message_handler<S, R>(
    State(service): State<Arc<ConversationService<S, R>>>,
    Path(session_id): Path<String>,
    Json(request): Json<MessageRequest>,
) -> Response
where
    S: SessionStore + 'static,
    R: OptionResolver + 'static,
{
    let id = SessionId(session_id);
    match service.reply(&id, &request.message).await {
        Ok(reply) => (StatusCode::OK, Json(reply)).into_response(),
        Err(error) => error_response(error),
    }
}

fn error_response(error: ConversationError) -> Response {
    let status = match &error {
        ConversationError::UnknownSession(_) => StatusCode::NOT_FOUND,
        ConversationError::Resolve(_) => StatusCode::BAD_GATEWAY,
        ConversationError::CorruptSession(_)
        | ConversationError::Store(_)
        | ConversationError::Decision(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    let payload = json!({ "error": error.to_string() });
    (status, Json(payload)).into_response()
}
