//! Turns a streamed response body into [`StreamEvent`]s.
//!
//! The body is a sequence of JSON objects, one per line. Lines are rebuilt
//! from arbitrary transport chunks by [`LineReader`] and decoded one at a time
//! by [`StreamResolver`], which runs as its own task and publishes events on a
//! channel consumed through [`ReplyStream`].

mod line_reader;
mod resolver;

pub use line_reader::{Line, LineReader, DEFAULT_LINE_CAPACITY};
pub use resolver::{resolve, StreamResolver};

use tokio::io::AsyncRead;
use tokio::sync::mpsc;

use crate::types::{ReplyStream, StreamEvent};

/// Spawns a resolver for `body` on the current tokio runtime.
///
/// The returned stream is available immediately and yields events as they
/// are decoded.
pub fn spawn<R>(body: R) -> ReplyStream
where
    R: AsyncRead + Send + Unpin + 'static,
{
    let (events, receiver) = mpsc::channel::<StreamEvent>(1);
    tokio::spawn(resolve(events, body));
    ReplyStream::new(receiver)
}
