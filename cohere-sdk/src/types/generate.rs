//! Contains all data structures that are particularly used for the Cohere Generate API

use serde::Serialize;

/// Wire body of a streaming `POST /v1/generate` call.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct GenerateRequest {
    /// Top-k sampling width.
    pub k: u32,
    pub model: String,
    pub max_tokens: u32,
    pub prompt: String,
    /// Always `false`: the prompt is run through the model's template.
    pub raw_prompting: bool,
    pub stream: bool,
    pub temperature: f32,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub stop_sequences: Vec<String>,
}
