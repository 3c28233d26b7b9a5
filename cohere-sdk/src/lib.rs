//! An unofficial client for the Cohere streaming chat and generate APIs.
//!
//! A [`CohereClient`] posts one request per reply and hands back a
//! [`ReplyStream`](types::ReplyStream) immediately; a background task decodes
//! the response body line by line and feeds it.

use std::sync::Arc;

use thiserror::Error;

use self::transport::Transport;
use self::types::GenerationConfig;

pub mod builder;
pub mod client;
pub mod payload;
pub mod stream;
pub mod transport;
pub mod types;

#[derive(Clone)]
pub struct CohereClient {
    transport: Arc<dyn Transport + Send + Sync>,
    config: GenerationConfig,
}

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Client error: {0}")]
    Client(String),

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Server error: {0}")]
    Server(String),

    #[error("JSON error: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Protocol error: {0}")]
    Protocol(String),
}
