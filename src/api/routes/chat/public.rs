//! Public types for the chat API
use serde::{Deserialize, Serialize};

use crate::ai::chat::ChatMessage;
use crate::calendar::CalendarEvent;

#[derive(Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

#[derive(Serialize, Deserialize)]
pub struct ChatResponse {
    pub reply: ChatMessage,
    /// Calendar state after the turn
    pub events: Vec<CalendarEvent>,
}

#[derive(Serialize, Deserialize)]
pub struct ChatTranscriptResponse {
    pub messages: Vec<ChatMessage>,
}
