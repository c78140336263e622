use std::env;

/// Default cap on model -> tool -> model round trips within one turn.
pub const DEFAULT_MAX_TOOL_ROUNDS: usize = 8;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub openai_model: String,
    pub openai_api_hostname: String,
    pub openai_api_key: String,
    /// Replaces the rendered calendar system instruction when set.
    pub system_message: Option<String>,
    pub max_tool_rounds: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        let openai_api_hostname = env::var("FAMCAL_LLM_HOST")
            .unwrap_or_else(|_| "https://api.openai.com".to_string());
        let openai_api_key =
            env::var("OPENAI_API_KEY").unwrap_or_else(|_| "thiswontworkforopenai".to_string());
        let openai_model =
            env::var("FAMCAL_LLM_MODEL").unwrap_or_else(|_| "gpt-4.1-mini".to_string());
        let system_message = env::var("FAMCAL_SYSTEM_MESSAGE").ok();
        let max_tool_rounds = match env::var("FAMCAL_MAX_TOOL_ROUNDS") {
            Ok(val) => val.parse().unwrap_or_else(|_| {
                tracing::warn!(
                    "Invalid FAMCAL_MAX_TOOL_ROUNDS {:?}, using {}",
                    val,
                    DEFAULT_MAX_TOOL_ROUNDS
                );
                DEFAULT_MAX_TOOL_ROUNDS
            }),
            Err(_) => DEFAULT_MAX_TOOL_ROUNDS,
        };

        Self {
            openai_model,
            openai_api_hostname,
            openai_api_key,
            system_message,
            max_tool_rounds,
        }
    }
}

impl AppConfig {
    /// Config pointed at an explicit LLM host, ignoring the
    /// environment. Used by tests and local tooling.
    pub fn for_host(api_hostname: &str) -> Self {
        Self {
            openai_model: String::from("gpt-4.1-mini"),
            openai_api_hostname: api_hostname.to_string(),
            openai_api_key: String::from("test-api-key"),
            system_message: Some(String::from("You are a helpful calendar assistant.")),
            max_tool_rounds: DEFAULT_MAX_TOOL_ROUNDS,
        }
    }
}
