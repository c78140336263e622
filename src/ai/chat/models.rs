//! The core models for managing a stateful chat with an LLM.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::openai::{FunctionCall, FunctionCallFn, Message};

/// Provider-facing history of the session, including tool traffic.
#[derive(Default)]
pub struct Transcript(Vec<Message>);

impl Transcript {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn new_with_messages(messages: Vec<Message>) -> Self {
        Self(messages)
    }

    pub fn messages(&self) -> &[Message] {
        &self.0
    }

    pub fn push(&mut self, msg: Message) {
        self.0.push(msg)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn truncate(&mut self, len: usize) {
        self.0.truncate(len)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Message> {
        self.0.iter()
    }
}

/// One resolved tool call. Only lives for the turn that produced it.
#[derive(Clone, Debug, PartialEq)]
pub struct ToolCallResult {
    pub id: String,
    pub name: String,
    pub arguments: String,
    pub response: Value,
}

impl ToolCallResult {
    pub fn request(&self) -> FunctionCall {
        FunctionCall {
            function: FunctionCallFn {
                arguments: self.arguments.clone(),
                name: self.name.clone(),
            },
            id: self.id.clone(),
            r#type: String::from("function"),
        }
    }

    pub fn response_message(&self) -> Message {
        Message::new_tool_call_response(&self.response.to_string(), &self.id)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Model,
    System,
}

/// An entry in the user-facing conversation. Tool traffic never shows
/// up here.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,
    pub role: ChatRole,
    pub text: String,
    pub timestamp: DateTime<Utc>,
    /// Set on locally generated failure notices.
    #[serde(default)]
    pub is_error: bool,
}

impl ChatMessage {
    pub fn new(role: ChatRole, text: &str) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role,
            text: text.to_string(),
            timestamp: Utc::now(),
            is_error: false,
        }
    }

    pub fn error(text: &str) -> Self {
        Self {
            is_error: true,
            ..Self::new(ChatRole::Model, text)
        }
    }
}
