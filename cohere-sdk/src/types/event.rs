//! Events produced while a reply is being streamed.

use std::fmt;
use std::pin::Pin;
use std::task::{Context, Poll};

use cohere_sdk_macros::FromBytes;
use futures::Stream;
use serde::{Deserialize, Deserializer};
use tokio::sync::mpsc;

pub const TEXT_GENERATION: &str = "text-generation";
pub const TOOL_CALLS_GENERATION: &str = "tool-calls-generation";

/// One line of the upstream stream, as decoded from the wire.
///
/// Every field is optional on the wire; absent and `null` fields take their default.
#[derive(Deserialize, FromBytes, Default, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct EventBlock {
    #[serde(deserialize_with = "null_as_default")]
    pub is_finished: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub event_type: String,
    #[serde(deserialize_with = "null_as_default")]
    pub generation_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub text: String,
    #[serde(deserialize_with = "null_as_default")]
    pub finish_reason: String,
    pub tool_calls: Option<Vec<serde_json::Value>>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A normalized event delivered to the caller of
/// [`CohereClient::reply`](crate::CohereClient::reply).
///
/// The [`Display`](fmt::Display) form is the tagged line representation:
/// `text: ...`, `tool: [...]` or `error: ...`.
#[derive(Debug, Clone, PartialEq)]
pub enum StreamEvent {
    /// A piece of generated text, or the raw salvaged tail of a truncated stream.
    ///
    /// The salvaged tail is decoded lossily: a multi-byte character cut off by
    /// the end of the stream shows up as `U+FFFD`.
    Text(String),
    /// Tool calls requested by the model.
    ToolCalls {
        calls: Vec<serde_json::Value>,
        /// Compact JSON array encoding of `calls`.
        json: String,
    },
    /// The stream failed; no further events follow.
    Error(String),
}

impl StreamEvent {
    /// The tag used in the line representation.
    pub fn kind(&self) -> &'static str {
        match self {
            StreamEvent::Text(_) => "text",
            StreamEvent::ToolCalls { .. } => "tool",
            StreamEvent::Error(_) => "error",
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, StreamEvent::Error(_))
    }
}

impl fmt::Display for StreamEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StreamEvent::Text(text) => write!(f, "text: {}", text),
            StreamEvent::ToolCalls { json, .. } => write!(f, "tool: {}", json),
            StreamEvent::Error(message) => write!(f, "error: {}", message),
        }
    }
}

/// A stream of [`StreamEvent`]s for one reply.
///
/// The stream ends once the background resolver has finished. Dropping it
/// stops the resolver at its next send.
pub struct ReplyStream {
    inner: mpsc::Receiver<StreamEvent>,
}

impl ReplyStream {
    pub(crate) fn new(inner: mpsc::Receiver<StreamEvent>) -> Self {
        Self { inner }
    }
}

impl Stream for ReplyStream {
    type Item = StreamEvent;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.inner.poll_recv(cx)
    }
}
