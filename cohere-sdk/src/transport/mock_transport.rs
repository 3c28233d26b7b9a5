use std::sync::{Arc, Mutex};

#[cfg(feature = "tracing")]
use tracing::instrument;

use async_trait::async_trait;
use bytes::Bytes;
use futures::stream;
use futures::StreamExt;

use crate::transport::{ByteStream, Transport};
use crate::types::HttpRequest;
use crate::{Error, Result};

/// A mock implementation of the [`Transport`] trait for testing purposes.
///
/// The mock replays pre-configured body chunks for every streaming request,
/// exactly as configured, so tests control where chunk boundaries fall. Every
/// request it receives is recorded and can be inspected afterwards.
#[derive(Clone, Default)]
pub struct MockTransport {
    /// Body chunks returned, in order, by the next streaming request.
    chunks: Arc<Mutex<Vec<Bytes>>>,
    /// Transport failure raised after the last chunk.
    stream_error: Arc<Mutex<Option<String>>>,
    /// When set, the next request fails as if the API answered with a non-success status.
    server_error: Arc<Mutex<Option<String>>>,
    /// Every request sent through this transport.
    requests: Arc<Mutex<Vec<HttpRequest>>>,
}

impl MockTransport {
    /// Creates a new, empty [`MockTransport`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the body as raw chunks. Chunk boundaries are kept as given.
    pub fn with_chunks(self, chunks: Vec<Bytes>) -> Self {
        *self.chunks.lock().unwrap() = chunks;
        self
    }

    /// Configures the body as newline-terminated lines, one chunk per line.
    pub fn with_lines(self, lines: Vec<String>) -> Self {
        let chunks = lines
            .into_iter()
            .map(|line| Bytes::from(format!("{}\n", line)))
            .collect();
        self.with_chunks(chunks)
    }

    /// Makes the body fail with a transport error after the configured chunks.
    pub fn with_stream_error(self, message: impl Into<String>) -> Self {
        *self.stream_error.lock().unwrap() = Some(message.into());
        self
    }

    /// Makes the next request fail with [`Error::Server`].
    pub fn with_server_error(self, message: impl Into<String>) -> Self {
        *self.server_error.lock().unwrap() = Some(message.into());
        self
    }

    /// Returns the requests received so far.
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for MockTransport {
    /// Mocks sending a streaming HTTP request.
    ///
    /// The request is recorded, then either the configured server error is
    /// returned or the configured chunks are replayed, followed by the
    /// configured stream error if any. Without configuration the body is empty.
    #[cfg_attr(feature = "tracing", instrument(skip(self, request)))]
    async fn send_http_stream_request(&self, request: HttpRequest) -> Result<ByteStream> {
        self.requests.lock().unwrap().push(request);

        if let Some(message) = self.server_error.lock().unwrap().take() {
            return Err(Error::Server(message));
        }

        let chunks = self
            .chunks
            .lock()
            .unwrap()
            .drain(..)
            .map(Ok)
            .collect::<Vec<Result<Bytes>>>();
        let tail = self
            .stream_error
            .lock()
            .unwrap()
            .take()
            .map(|message| Err(Error::Protocol(message)));

        Ok(stream::iter(chunks).chain(stream::iter(tail)).boxed())
    }
}
