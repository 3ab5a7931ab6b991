//! Message endpoints

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::db::{Message, MessageRepo};
use crate::http::error::ApiError;
use crate::http::extractors::JsonBody;
use crate::http::server::AppState;
use crate::models::MessageText;

/// Create message request
#[derive(Debug, Deserialize)]
pub struct CreateMessageRequest {
    /// Missing and `null` both land here as `None`
    pub text: Option<String>,
}

/// Message response
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessageResponse {
    pub id: i32,
    pub text: String,
    pub timestamp: NaiveDateTime,
}

impl From<Message> for MessageResponse {
    fn from(m: Message) -> Self {
        Self {
            id: m.id,
            text: m.text,
            timestamp: m.timestamp,
        }
    }
}

/// GET /messages - list every message, newest first
async fn list_messages(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<MessageResponse>>, ApiError> {
    let messages = MessageRepo::new(&state.pool)
        .list()
        .await
        .map_err(|e| ApiError::database("failed to fetch messages", e))?;

    Ok(Json(messages.into_iter().map(MessageResponse::from).collect()))
}

/// POST /messages - store a new message
async fn create_message(
    State(state): State<Arc<AppState>>,
    JsonBody(req): JsonBody<CreateMessageRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    let text = MessageText::new(req.text.as_deref().unwrap_or_default())?;

    let message = MessageRepo::new(&state.pool)
        .create(text)
        .await
        .map_err(|e| ApiError::database("failed to create message", e))?;

    Ok((StatusCode::CREATED, Json(MessageResponse::from(message))))
}

/// Message routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/messages", get(list_messages).post(create_message))
}
