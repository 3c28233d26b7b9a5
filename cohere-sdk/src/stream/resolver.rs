use std::io;
use std::ops::ControlFlow;

use bytes::BytesMut;
#[cfg(feature = "metrics")]
use metrics::counter;
use tokio::io::AsyncRead;
use tokio::sync::mpsc;

use super::line_reader::{LineReader, DEFAULT_LINE_CAPACITY};
use crate::types::{EventBlock, StreamEvent, TEXT_GENERATION, TOOL_CALLS_GENERATION};
use crate::Error;

/// Decodes `body` line by line and sends the resulting events on `events`.
///
/// Runs until the body ends, a line fails to decode, a finished block is seen
/// or the receiving side goes away. Both `events` and `body` are dropped on
/// return, so the receiver always observes the end of the stream.
pub async fn resolve<R>(events: mpsc::Sender<StreamEvent>, body: R)
where
    R: AsyncRead + Unpin,
{
    StreamResolver::new(events, body).run().await
}

/// Incremental decoder for one response body.
pub struct StreamResolver<R> {
    events: mpsc::Sender<StreamEvent>,
    reader: LineReader<R>,
    buffer: BytesMut,
}

impl<R> StreamResolver<R>
where
    R: AsyncRead + Unpin,
{
    pub fn new(events: mpsc::Sender<StreamEvent>, body: R) -> Self {
        Self::with_line_capacity(events, body, DEFAULT_LINE_CAPACITY)
    }

    /// Like [`StreamResolver::new`], with a custom read buffer size. Lines
    /// longer than `capacity` are reassembled from fragments.
    pub fn with_line_capacity(
        events: mpsc::Sender<StreamEvent>,
        body: R,
        capacity: usize,
    ) -> Self {
        Self {
            events,
            reader: LineReader::with_capacity(capacity, body),
            buffer: BytesMut::new(),
        }
    }

    pub async fn run(mut self) {
        loop {
            let line = match self.reader.read_line().await {
                Ok(Some(line)) => line,
                Ok(None) => return self.finish(None).await,
                Err(err) => return self.finish(Some(err)).await,
            };

            self.buffer.extend_from_slice(&line.bytes);
            if !line.complete {
                continue;
            }

            let raw = self.buffer.split();
            if self.dispatch(&raw).await.is_break() {
                return;
            }
        }
    }

    async fn dispatch(&mut self, raw: &[u8]) -> ControlFlow<()> {
        let block = match EventBlock::from_bytes(raw) {
            Ok(block) => block,
            Err(err) => {
                let message = match err {
                    Error::JsonParse(err) => err.to_string(),
                    other => other.to_string(),
                };
                let _ = self.emit(StreamEvent::Error(message)).await;
                return ControlFlow::Break(());
            }
        };

        if block.is_finished {
            return ControlFlow::Break(());
        }

        match block.event_type.as_str() {
            TEXT_GENERATION => self.emit(StreamEvent::Text(block.text)).await,
            TOOL_CALLS_GENERATION => {
                let calls = block.tool_calls.unwrap_or_default();
                match serde_json::to_string(&calls) {
                    Ok(json) => self.emit(StreamEvent::ToolCalls { calls, json }).await,
                    Err(err) => {
                        let _ = self.emit(StreamEvent::Error(err.to_string())).await;
                        ControlFlow::Break(())
                    }
                }
            }
            _ => {
                #[cfg(feature = "tracing")]
                tracing::debug!(event_type = %block.event_type, "skipping stream event");
                ControlFlow::Continue(())
            }
        }
    }

    /// Salvages whatever is left in the buffer once the body is exhausted.
    async fn finish(mut self, err: Option<io::Error>) {
        if let Some(err) = err {
            if self.emit(StreamEvent::Error(err.to_string())).await.is_break() {
                return;
            }
        }

        if !self.buffer.is_empty() {
            let tail = String::from_utf8_lossy(&self.buffer).into_owned();
            let _ = self.emit(StreamEvent::Text(tail)).await;
        }
    }

    /// Breaks when the receiver has been dropped.
    async fn emit(&mut self, event: StreamEvent) -> ControlFlow<()> {
        #[cfg(feature = "metrics")]
        counter!("cohere_client.stream_events_total", "kind" => event.kind()).increment(1);

        match self.events.send(event).await {
            Ok(()) => ControlFlow::Continue(()),
            Err(_) => {
                #[cfg(feature = "tracing")]
                tracing::debug!("reply stream dropped, stopping resolver");
                ControlFlow::Break(())
            }
        }
    }
}
