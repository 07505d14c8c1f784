use std::sync::Arc;

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};

use careerdost_core::ServiceError;

use crate::gemini::GeminiClient;
use crate::model::{ChatRequest, ChatResponse};

pub type AppState = Arc<GeminiClient>;

/// Build the assistant API router (nested under `/assistant`).
pub fn build_router(client: Arc<GeminiClient>) -> Router {
    Router::new()
        .route("/chat", post(chat))
        .with_state(client)
}

/// POST /assistant/chat — one conversational turn.
async fn chat(
    State(client): State<AppState>,
    Json(input): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ServiceError> {
    let response = client.chat(&input.message, &input.history).await?;
    Ok(Json(ChatResponse { response }))
}
