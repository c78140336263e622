//! Router for the events API

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get},
};

use crate::api::state::SharedState;
use crate::calendar::CalendarEvent;

/// The whole calendar sorted by start
async fn events_list(State(state): State<SharedState>) -> Json<Vec<CalendarEvent>> {
    let store = state.read().expect("Unable to read share state").store.clone();
    Json(store.list())
}

/// Delete an event directly from the list view. Waits for any chat
/// turn in flight so the store never changes under a running turn.
async fn events_delete(State(state): State<SharedState>, Path(id): Path<String>) -> Response {
    let assistant = state.read().expect("Unable to read share state").assistant.clone();
    let assistant = assistant.lock().await;

    if assistant.store().delete(&id) {
        StatusCode::NO_CONTENT.into_response()
    } else {
        (StatusCode::NOT_FOUND, format!("Event {} not found", id)).into_response()
    }
}

/// Create the events router
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/", get(events_list))
        .route("/{id}", delete(events_delete))
}
