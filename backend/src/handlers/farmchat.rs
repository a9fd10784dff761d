//! HTTP handlers for the FarmGPT assistant

use axum::{extract::State, Json};

use crate::error::AppResult;
use crate::services::farmchat::FarmChatService;
use crate::AppState;
use shared::{ChatMessage, ChatResponse, ChatStatus};

/// Answer a farming question
pub async fn chat_with_farm_gpt(
    State(state): State<AppState>,
    Json(message): Json<ChatMessage>,
) -> AppResult<Json<ChatResponse>> {
    let service = FarmChatService::from_state(&state);
    let response = service.chat(&message).await?;
    Ok(Json(response))
}

/// Whether the model backend is reachable
pub async fn get_chat_status(State(state): State<AppState>) -> Json<ChatStatus> {
    let service = FarmChatService::from_state(&state);
    Json(service.status().await)
}
