//! The family calendar assistant: the boundary a UI talks to.
//!
//! Owns the chat session and the visible conversation. Every accepted
//! user message adds the user's entry plus exactly one model entry,
//! which is flagged as an error when the turn failed.

use anyhow::{Result, bail};
use chrono::Local;

use crate::ai::chat::{Chat, ChatBuilder, ChatMessage, ChatRole};
use crate::ai::prompt;
use crate::ai::tools::calendar_tools;
use crate::calendar::{CalendarEvent, EventStore};
use crate::core::AppConfig;

pub const WELCOME_MESSAGE: &str =
    "Hej! Jeg er din FamiliePrivatApp assistent. Hvad skal vi planlægge?";

pub const APOLOGY_MESSAGE: &str =
    "Beklager, der opstod en fejl i kommunikationen med kalenderen. Prøv igen.";

pub struct CalendarAssistant {
    chat: Chat,
    store: EventStore,
    messages: Vec<ChatMessage>,
}

impl CalendarAssistant {
    pub fn new(config: &AppConfig, store: EventStore) -> Result<Self> {
        let system_instruction = match &config.system_message {
            Some(msg) => msg.clone(),
            None => prompt::system_instruction(Local::now().date_naive())?,
        };

        let chat = ChatBuilder::new(
            &config.openai_api_hostname,
            &config.openai_api_key,
            &config.openai_model,
        )
        .system_instruction(&system_instruction)
        .tools(calendar_tools(&store))
        .max_tool_rounds(config.max_tool_rounds)
        .build();

        Ok(Self::with_chat(chat, store))
    }

    /// Wrap an already configured chat. The chat's tools are expected
    /// to operate on `store`.
    pub fn with_chat(chat: Chat, store: EventStore) -> Self {
        let welcome = ChatMessage {
            id: String::from("welcome"),
            ..ChatMessage::new(ChatRole::Model, WELCOME_MESSAGE)
        };

        Self {
            chat,
            store,
            messages: vec![welcome],
        }
    }

    pub fn store(&self) -> &EventStore {
        &self.store
    }

    pub fn events(&self) -> Vec<CalendarEvent> {
        self.store.list()
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Send `text` to the assistant and return its reply entry.
    ///
    /// Blank input is rejected without touching the conversation. A
    /// failed turn is not an `Err`: it produces an error entry with a
    /// fixed apology.
    pub async fn send_message(&mut self, text: &str) -> Result<ChatMessage> {
        if text.trim().is_empty() {
            bail!("Message is empty");
        }

        self.messages.push(ChatMessage::new(ChatRole::User, text));

        let reply = match self.chat.next_msg(text).await {
            Ok(reply) => ChatMessage::new(ChatRole::Model, &reply),
            Err(e) => {
                tracing::error!("Calendar assistant error: {}. Root cause: {}", e, e.root_cause());
                ChatMessage::error(APOLOGY_MESSAGE)
            }
        };
        self.messages.push(reply.clone());

        Ok(reply)
    }
}
