//! Builds request bodies for the chat and generate endpoints.

use serde::Serialize;

use crate::types::chat::{ChatRequest, PromptTruncation, ReplyRequest};
use crate::types::generate::GenerateRequest;
use crate::types::GenerationConfig;

pub const CHAT_ENDPOINT: &str = "/v1/chat";
pub const GENERATE_ENDPOINT: &str = "/v1/generate";

/// The body of one streaming request, in either chat or completion mode.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum Payload {
    Chat(ChatRequest),
    Generate(GenerateRequest),
}

impl Payload {
    /// Assembles the body for `request` using the mode and parameters of `config`.
    ///
    /// Tools, tool results, the history and `safety_mode` only exist in chat mode.
    pub fn build(config: &GenerationConfig, request: &ReplyRequest) -> Self {
        let temperature = config.effective_temperature();

        if config.completion {
            return Payload::Generate(GenerateRequest {
                k: config.top_k,
                model: config.model.clone(),
                max_tokens: config.max_tokens,
                prompt: request.message.clone(),
                raw_prompting: false,
                stream: true,
                temperature,
                stop_sequences: config.stop_sequences.clone(),
            });
        }

        Payload::Chat(ChatRequest {
            chat_history: request.history.clone(),
            connectors: Vec::new(),
            message: request.message.clone(),
            model: config.model.clone(),
            preamble: request.preamble.clone(),
            prompt_truncation: PromptTruncation::Off,
            stream: true,
            temperature,
            tools: request.tools.clone(),
            tool_results: request.tool_results.clone(),
            seed: config.effective_seed(),
            safety_mode: config.safety_mode,
            stop_sequences: config.stop_sequences.clone(),
        })
    }

    /// Path of the endpoint this body is posted to.
    pub fn endpoint(&self) -> &'static str {
        match self {
            Payload::Chat(_) => CHAT_ENDPOINT,
            Payload::Generate(_) => GENERATE_ENDPOINT,
        }
    }

    pub fn mode(&self) -> &'static str {
        match self {
            Payload::Chat(_) => "chat",
            Payload::Generate(_) => "completion",
        }
    }
}
