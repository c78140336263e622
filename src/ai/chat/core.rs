use anyhow::{Error, Result, anyhow, bail};
use serde_json::{Value, json};

use super::models::{ToolCallResult, Transcript};
use crate::core::config::DEFAULT_MAX_TOOL_ROUNDS;
use crate::openai::{BoxedToolCall, Message, Role, completion};

/// Reply used when the model ends a turn without any text, which
/// happens when it only ran tools.
pub const EMPTY_REPLY_FALLBACK: &str = "Jeg har udført handlingen.";

/// Reply used when the model keeps requesting tools past the round
/// limit.
pub const TOOL_ROUNDS_EXHAUSTED: &str =
    "Jeg kunne ikke fuldføre handlingen. Prøv at omformulere din besked.";

/// A single persistent chat session with an LLM using an OpenAI
/// compatible API.
///
/// Each call to `next_msg` is one turn: the user's text is sent, any
/// tool calls the model asks for are run one at a time in the order
/// they were received, their results go back to the model and this
/// repeats until the model answers with plain text.
///
/// Use `Chat::builder()` to construct a valid `Chat`.
pub struct Chat {
    api_hostname: String,
    api_key: String,
    model: String,
    system_instruction: String,
    tools: Option<Vec<BoxedToolCall>>,
    max_tool_rounds: usize,
    transcript: Transcript,
}

impl Chat {
    pub fn builder(api_hostname: &str, api_key: &str, model: &str) -> ChatBuilder {
        ChatBuilder::new(api_hostname, api_key, model)
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    async fn handle_tool_call(
        tools: Option<&[BoxedToolCall]>,
        tool_call: &Value,
    ) -> Result<ToolCallResult, Error> {
        let tool_call_id = tool_call["id"]
            .as_str()
            .ok_or(anyhow!("Tool call missing ID: {}", tool_call))?;
        let tool_call_function = &tool_call["function"];
        let tool_call_args = tool_call_function["arguments"]
            .as_str()
            .ok_or(anyhow!("Tool call missing arguments: {}", tool_call))?;
        let tool_call_name = tool_call_function["name"]
            .as_str()
            .ok_or(anyhow!("Tool call missing name: {}", tool_call))?;

        tracing::debug!(
            "\nTool call: {}\nargs: {}",
            &tool_call_name,
            &tool_call_args
        );

        let tool = tools
            .unwrap_or_default()
            .iter()
            .find(|i| i.function_name() == tool_call_name);

        let response = match tool {
            Some(tool) => tool.call(tool_call_args).await?,
            None => {
                tracing::warn!("Received tool call that doesn't exist: {}", tool_call_name);
                json!({ "error": "Unknown function" })
            }
        };

        Ok(ToolCallResult {
            id: tool_call_id.to_string(),
            name: tool_call_name.to_string(),
            arguments: tool_call_args.to_string(),
            response,
        })
    }

    /// Runs tool calls sequentially. Later calls in a batch may
    /// depend on ids created by earlier ones.
    async fn handle_tool_calls(
        tools: Option<&[BoxedToolCall]>,
        tool_calls: &[Value],
    ) -> Result<Vec<ToolCallResult>, Error> {
        let mut results = Vec::with_capacity(tool_calls.len());
        for call in tool_calls {
            results.push(Self::handle_tool_call(tools, call).await?);
        }
        Ok(results)
    }

    async fn complete(&self) -> Result<Value, Error> {
        completion(
            self.transcript.messages(),
            self.tools.as_deref(),
            &self.api_hostname,
            &self.api_key,
            &self.model,
        )
        .await
    }

    /// Runs the next turn of the chat and returns the model's reply.
    ///
    /// On error the session history is restored to what it was before
    /// the turn. Calendar changes made by tools that already ran are
    /// kept.
    pub async fn next_msg(&mut self, text: &str) -> Result<String, Error> {
        if self.transcript.is_empty() {
            self.transcript
                .push(Message::new(Role::System, &self.system_instruction));
        }

        let checkpoint = self.transcript.len();
        self.transcript.push(Message::new(Role::User, text));

        let result = self.run_turn().await;
        if result.is_err() {
            self.transcript.truncate(checkpoint);
        }
        result
    }

    async fn run_turn(&mut self) -> Result<String, Error> {
        let mut resp = self.complete().await?;
        let mut rounds = 0;

        // Tool calls need to be handled for the chat to proceed
        loop {
            if !resp["choices"][0]["message"].is_object() {
                bail!("No message received. Resp:\n\n {}", resp);
            }
            let tool_calls = match resp["choices"][0]["message"]["tool_calls"].as_array() {
                Some(calls) if !calls.is_empty() => calls.clone(),
                _ => break,
            };

            if rounds >= self.max_tool_rounds {
                tracing::warn!(
                    "Model still requesting tools after {} rounds, ending turn",
                    rounds
                );
                self.transcript
                    .push(Message::new(Role::Assistant, TOOL_ROUNDS_EXHAUSTED));
                return Ok(TOOL_ROUNDS_EXHAUSTED.to_string());
            }
            rounds += 1;

            let results = Self::handle_tool_calls(self.tools.as_deref(), &tool_calls).await?;

            // Report every result of the batch back in a single turn
            self.transcript.push(Message::new_tool_call_request(
                results.iter().map(ToolCallResult::request).collect(),
            ));
            for result in results.iter() {
                self.transcript.push(result.response_message());
            }

            resp = self.complete().await?;
        }

        let reply = resp["choices"][0]["message"]["content"]
            .as_str()
            .filter(|content| !content.trim().is_empty())
            .unwrap_or(EMPTY_REPLY_FALLBACK)
            .to_string();
        self.transcript.push(Message::new(Role::Assistant, &reply));

        Ok(reply)
    }
}

pub struct ChatBuilder {
    api_hostname: String,
    api_key: String,
    model: String,
    system_instruction: String,
    tools: Option<Vec<BoxedToolCall>>,
    max_tool_rounds: usize,
    transcript: Transcript,
}

impl ChatBuilder {
    pub fn new(api_hostname: &str, api_key: &str, model: &str) -> Self {
        Self {
            api_hostname: api_hostname.to_string(),
            api_key: api_key.to_string(),
            model: model.to_string(),
            system_instruction: String::from("You are a helpful assistant."),
            tools: None,
            max_tool_rounds: DEFAULT_MAX_TOOL_ROUNDS,
            transcript: Transcript::new(),
        }
    }

    pub fn build(self) -> Chat {
        Chat {
            api_hostname: self.api_hostname,
            api_key: self.api_key,
            model: self.model,
            system_instruction: self.system_instruction,
            tools: self.tools,
            max_tool_rounds: self.max_tool_rounds,
            transcript: self.transcript,
        }
    }

    /// Only used when the session starts, i.e. when the transcript is
    /// still empty on the first turn.
    pub fn system_instruction(mut self, instruction: &str) -> Self {
        self.system_instruction = instruction.to_string();
        self
    }

    pub fn transcript(mut self, messages: Vec<Message>) -> Self {
        self.transcript = Transcript::new_with_messages(messages);
        self
    }

    pub fn tools(mut self, tools: Vec<BoxedToolCall>) -> Self {
        self.tools = Some(tools);
        self
    }

    pub fn max_tool_rounds(mut self, rounds: usize) -> Self {
        self.max_tool_rounds = rounds;
        self
    }
}
