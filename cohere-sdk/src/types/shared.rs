use cohere_sdk_macros::FromBytes;
use serde::{Deserialize, Serialize};

/// The author of a message in the chat history.
#[derive(Serialize, Deserialize, Default, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    System,
    #[default]
    User,
    Chatbot,
    Tool,
}

/// Error body returned by the API alongside a non-success status.
#[derive(Serialize, Deserialize, FromBytes, Debug, Clone)]
pub struct ApiError {
    pub message: String,
}
