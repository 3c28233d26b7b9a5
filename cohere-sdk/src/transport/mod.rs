use std::pin::Pin;

use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;

use crate::types::HttpRequest;
use crate::Result;

mod mock_transport;
mod reqwest_transport;

pub use mock_transport::MockTransport;
pub use reqwest_transport::ReqwestTransport;

/// A boxed stream of response body chunks.
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes>> + Send>>;

#[async_trait]
pub trait Transport: Send + Sync + 'static {
    /// Sends a streaming HTTP request and returns a stream of response bytes.
    ///
    /// Implementations must fail with [`Error::Server`](crate::Error::Server)
    /// instead of returning a body when the response status is not a success.
    async fn send_http_stream_request(&self, request: HttpRequest) -> Result<ByteStream>;
}
