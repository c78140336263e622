//! Router for the chat API

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};

use super::public;
use crate::api::public::ApiError;
use crate::api::state::SharedState;

/// The visible conversation so far
async fn chat_transcript(State(state): State<SharedState>) -> Json<public::ChatTranscriptResponse> {
    let assistant = state
        .read()
        .expect("Unable to read share state")
        .assistant
        .clone();
    let messages = assistant.lock().await.messages().to_vec();

    Json(public::ChatTranscriptResponse { messages })
}

/// Send a message to the assistant and wait for the full reply
async fn chat_handler(
    State(state): State<SharedState>,
    Json(payload): Json<public::ChatRequest>,
) -> Result<Response, ApiError> {
    if payload.message.trim().is_empty() {
        return Ok((StatusCode::BAD_REQUEST, "Message must not be empty").into_response());
    }

    let (assistant, store) = {
        let shared_state = state.read().expect("Unable to read share state");
        (shared_state.assistant.clone(), shared_state.store.clone())
    };

    // Holding the lock for the whole turn serializes concurrent requests
    let reply = assistant.lock().await.send_message(&payload.message).await?;

    Ok(Json(public::ChatResponse {
        reply,
        events: store.list(),
    })
    .into_response())
}

/// Create the chat router
pub fn router() -> Router<SharedState> {
    Router::new().route("/", get(chat_transcript).post(chat_handler))
}
