//! API routes module

pub mod chat;
pub mod events;

use axum::Router;

use crate::api::state::SharedState;

/// Create the combined API router
pub fn router() -> Router<SharedState> {
    Router::new()
        // Calendar list view
        .nest("/events", events::router())
        // Conversation with the assistant
        .nest("/chat", chat::router())
}
