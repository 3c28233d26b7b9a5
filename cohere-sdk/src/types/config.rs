use serde::{Deserialize, Serialize};

use super::models::COMMAND_R;

/// Temperature used when the configured one is negative.
pub const DEFAULT_TEMPERATURE: f32 = 0.95;

/// Content moderation applied upstream. Only sent in chat mode.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum SafetyMode {
    Contextual,
    Strict,
    None,
}

/// Generation parameters shared by every reply of a client.
///
/// A negative `temperature` means "unset" and a `seed` of zero or less is not
/// sent. The value is never modified once the client is built; see
/// [`GenerationConfig::effective_temperature`].
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationConfig {
    pub model: String,
    pub temperature: f32,
    pub seed: i32,
    pub top_k: u32,
    pub max_tokens: u32,
    pub stop_sequences: Vec<String>,
    pub safety_mode: Option<SafetyMode>,
    /// Selects the `/v1/generate` endpoint instead of `/v1/chat`.
    pub completion: bool,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            model: COMMAND_R.to_string(),
            temperature: -1.0,
            seed: 0,
            top_k: 0,
            max_tokens: 1024,
            stop_sequences: Vec::new(),
            safety_mode: None,
            completion: false,
        }
    }
}

impl GenerationConfig {
    /// The temperature actually sent upstream.
    pub fn effective_temperature(&self) -> f32 {
        if self.temperature < 0.0 {
            DEFAULT_TEMPERATURE
        } else {
            self.temperature
        }
    }

    /// The seed to send, if any.
    pub fn effective_seed(&self) -> Option<i32> {
        (self.seed > 0).then_some(self.seed)
    }
}
