use std::io;

use futures::StreamExt;
use tokio_util::io::StreamReader;

#[cfg(feature = "metrics")]
use metrics::counter;
#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::builder::CohereClientBuilder;
use crate::payload::Payload;
use crate::stream;
use crate::types::chat::ReplyRequest;
use crate::types::{GenerationConfig, HttpRequest, ReplyStream};
use crate::CohereClient;
use crate::Result;

impl CohereClient {
    pub fn builder() -> CohereClientBuilder {
        CohereClientBuilder::new()
    }

    /// The generation parameters every reply of this client is built with.
    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    /// Sends `request` and streams the reply.
    ///
    /// The endpoint (`/v1/chat` or `/v1/generate`) follows the client's
    /// completion switch. Request and status failures are returned here;
    /// everything that goes wrong once the body is streaming arrives as a
    /// [`StreamEvent::Error`](crate::types::StreamEvent::Error) on the stream.
    #[cfg_attr(feature = "tracing", instrument(skip(self, request)))]
    pub async fn reply(&self, request: ReplyRequest) -> Result<ReplyStream> {
        let payload = Payload::build(&self.config, &request);

        #[cfg(feature = "metrics")]
        counter!("cohere_client.reply_requests_total", "mode" => payload.mode()).increment(1);

        let request = HttpRequest::new(payload.endpoint()).body(&payload)?;

        let byte_stream = self.transport.send_http_stream_request(request).await?;
        let body = StreamReader::new(byte_stream.map(|chunk| chunk.map_err(io::Error::other)));

        Ok(stream::spawn(body))
    }
}
