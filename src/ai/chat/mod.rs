mod core;
pub use self::core::{Chat, ChatBuilder, EMPTY_REPLY_FALLBACK, TOOL_ROUNDS_EXHAUSTED};

pub mod models;
pub use models::{ChatMessage, ChatRole, ToolCallResult, Transcript};
