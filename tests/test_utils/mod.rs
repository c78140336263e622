//! Test utilities for integration tests
#![allow(dead_code)]

use std::sync::{Arc, RwLock};

use axum::{Router, body::Body};

use famcal::api::{AppState, app};
use famcal::calendar::EventStore;
use famcal::core::AppConfig;

/// Creates a test application with the seeded calendar and the LLM
/// provider pointed at `llm_url`.
pub fn test_app_with_llm(llm_url: &str) -> (Router, EventStore) {
    let store = EventStore::with_seed();
    let app_state = AppState::new(&AppConfig::for_host(llm_url), store.clone())
        .expect("Failed to build app state");
    (app(Arc::new(RwLock::new(app_state))), store)
}

/// Creates a test application whose LLM provider is unreachable.
pub fn test_app() -> (Router, EventStore) {
    test_app_with_llm("http://127.0.0.1:9")
}

pub async fn body_to_string(body: Body) -> String {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Failed to read body");
    String::from_utf8(bytes.to_vec()).expect("Body is not UTF-8")
}

pub fn completion_text(content: &str) -> String {
    serde_json::json!({
        "id": "chatcmpl-123",
        "object": "chat.completion",
        "model": "gpt-4.1-mini",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop"
        }]
    })
    .to_string()
}

pub fn completion_tool_call(id: &str, name: &str, args: serde_json::Value) -> String {
    serde_json::json!({
        "id": "chatcmpl-122",
        "object": "chat.completion",
        "model": "gpt-4.1-mini",
        "choices": [{
            "index": 0,
            "message": {
                "role": "assistant",
                "content": null,
                "tool_calls": [{
                    "id": id,
                    "type": "function",
                    "function": {"name": name, "arguments": args.to_string()}
                }]
            },
            "finish_reason": "tool_calls"
        }]
    })
    .to_string()
}
