//! Contains all data structures that are particularly used for the Cohere Chat API

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{Role, SafetyMode};

/// A single turn of the conversation history sent upstream.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ConversationMessage {
    role: Role,
    #[serde(rename = "message")]
    content: String,
}

impl ConversationMessage {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

/// Describes a tool the model may ask to invoke.
///
/// The parameter schemas are forwarded to the API untouched.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub parameter_definitions: BTreeMap<String, serde_json::Value>,
}

impl ToolDefinition {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameter_definitions: BTreeMap::new(),
        }
    }

    /// Adds (or replaces) the schema of one parameter.
    pub fn parameter(mut self, name: impl Into<String>, schema: serde_json::Value) -> Self {
        self.parameter_definitions.insert(name.into(), schema);
        self
    }
}

/// The outputs produced locally for a tool call the model emitted earlier.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ToolInvocationResult {
    /// The tool call exactly as it was received in a [`StreamEvent::ToolCalls`](crate::types::StreamEvent::ToolCalls) event.
    pub call: serde_json::Value,
    pub outputs: Vec<serde_json::Value>,
}

impl ToolInvocationResult {
    pub fn new(call: serde_json::Value, outputs: Vec<serde_json::Value>) -> Self {
        Self { call, outputs }
    }
}

/// Truncation strategy applied by the API when the prompt overflows the context window.
#[derive(Serialize, Deserialize, Default, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PromptTruncation {
    #[default]
    Off,
    Auto,
}

/// Wire body of a streaming `POST /v1/chat` call.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ChatRequest {
    pub chat_history: Vec<ConversationMessage>,
    pub connectors: Vec<String>,
    pub message: String,
    pub model: String,
    pub preamble: String,
    pub prompt_truncation: PromptTruncation,
    pub stream: bool,
    pub temperature: f32,
    pub tools: Vec<ToolDefinition>,
    pub tool_results: Vec<ToolInvocationResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub safety_mode: Option<SafetyMode>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub stop_sequences: Vec<String>,
}

/// Caller-facing input of a single reply.
///
/// In completion mode only the message is used, as the prompt.
#[derive(Default, Debug, Clone)]
pub struct ReplyRequest {
    pub history: Vec<ConversationMessage>,
    pub preamble: String,
    pub message: String,
    pub tools: Vec<ToolDefinition>,
    pub tool_results: Vec<ToolInvocationResult>,
}

impl ReplyRequest {
    /// Creates a new [`ReplyRequest`] for the given user message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Default::default()
        }
    }

    /// Sets the system prompt, sent as `preamble`.
    pub fn preamble(mut self, preamble: impl Into<String>) -> Self {
        self.preamble = preamble.into();
        self
    }

    /// Appends a message to the conversation history.
    pub fn add_history(mut self, message: ConversationMessage) -> Self {
        self.history.push(message);
        self
    }

    /// Replaces the conversation history.
    pub fn history(mut self, history: Vec<ConversationMessage>) -> Self {
        self.history = history;
        self
    }

    /// Adds a tool definition the model may call.
    pub fn add_tool(mut self, tool: ToolDefinition) -> Self {
        self.tools.push(tool);
        self
    }

    /// Adds the result of a previously emitted tool call.
    pub fn add_tool_result(mut self, result: ToolInvocationResult) -> Self {
        self.tool_results.push(result);
        self
    }
}
