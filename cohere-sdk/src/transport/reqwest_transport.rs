#[cfg(feature = "tracing")]
use tracing::instrument;

use async_trait::async_trait;
use futures::StreamExt;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT_LANGUAGE, ORIGIN, REFERER};
use reqwest::{Client, Proxy, Url};

use crate::transport::{ByteStream, Transport};
use crate::types::{ApiError, HttpRequest, HttpVerb};
use crate::{Error, Result};

const ACCEPT_LANGUAGE_VALUE: &str = "en-US,en;q=0.9";
const DASHBOARD_ORIGIN: &str = "https://dashboard.cohere.com";
const DASHBOARD_REFERER: &str = "https://dashboard.cohere.com/";

/// A [`Transport`] implementation that uses the `reqwest` crate for making HTTP requests.
///
/// This is the default transport used by [`CohereClient`](crate::CohereClient) if no custom
/// transport is provided. Every request carries the bearer token and the fixed
/// dashboard headers the API expects.
pub struct ReqwestTransport {
    client: Client,
    base_url: Url,
    token: Option<String>,
}

impl ReqwestTransport {
    /// Creates a new `ReqwestTransport`.
    ///
    /// # Arguments
    ///
    /// * `base_url` - The base URL of the Cohere API.
    /// * `token` - An optional API token, sent as a bearer token.
    /// * `proxy` - An optional proxy URL all requests are routed through.
    ///
    /// # Errors
    ///
    /// Returns an [`Error::Client`] if the proxy URL is invalid or the `reqwest`
    /// client cannot be built.
    pub fn new(base_url: Url, token: Option<String>, proxy: Option<&str>) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static(ACCEPT_LANGUAGE_VALUE));
        headers.insert(ORIGIN, HeaderValue::from_static(DASHBOARD_ORIGIN));
        headers.insert(REFERER, HeaderValue::from_static(DASHBOARD_REFERER));

        let mut builder = Client::builder().default_headers(headers);
        if let Some(proxy) = proxy {
            let proxy =
                Proxy::all(proxy).map_err(|e| Error::Client(format!("Invalid proxy: {}", e)))?;
            builder = builder.proxy(proxy);
        }

        let client = builder.build().map_err(|e| Error::Client(e.to_string()))?;
        Ok(Self {
            client,
            base_url,
            token,
        })
    }

    /// Helper to build and send a reqwest request, handling common logic.
    async fn build_and_send_request(&self, request: HttpRequest) -> Result<reqwest::Response> {
        let url = self
            .base_url
            .join(&request.url)
            .map_err(|e| Error::Client(e.to_string()))?;

        let mut request_builder = match request.verb {
            HttpVerb::POST => self.client.post(url),
        };

        if let Some(token) = &self.token {
            request_builder = request_builder.bearer_auth(token);
        }

        if let Some(body) = request.body {
            request_builder = request_builder.json(&body);
        }

        let response = request_builder.send().await.map_err(Error::Transport)?;
        let status = response.status();
        if !status.is_success() {
            let body = response.bytes().await.unwrap_or_default();
            let message = ApiError::from_bytes(&body)
                .map(|e| e.message)
                .unwrap_or_else(|_| status.to_string());
            return Err(Error::Server(message));
        }
        Ok(response)
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    /// Sends a streaming HTTP request using `reqwest` and returns a stream of response bytes.
    ///
    /// # Errors
    ///
    /// Returns an [`Error::Transport`] if the request fails, or an
    /// [`Error::Server`] if the API answers with a non-success status.
    #[cfg_attr(feature = "tracing", instrument(skip(self, request), fields(url = %request.url)))]
    async fn send_http_stream_request(&self, request: HttpRequest) -> Result<ByteStream> {
        let response = self.build_and_send_request(request).await?;
        let stream = response
            .bytes_stream()
            .map(|item| item.map_err(Error::Transport))
            .boxed();
        Ok(stream)
    }
}
