use std::sync::Arc;

#[cfg(feature = "tracing")]
use tracing::instrument;

use reqwest::Url;

use crate::transport::{ReqwestTransport, Transport};
use crate::types::{GenerationConfig, SafetyMode};
use crate::{CohereClient, Error, Result};

pub const DEFAULT_BASE_URL: &str = "https://api.cohere.ai";

/// A builder for constructing a [`CohereClient`].
///
/// This builder allows for flexible configuration of the client, including
/// the base URL of the API, the API token, an optional proxy, the generation
/// parameters and a custom transport layer.
///
/// - Uses either `CO_API_URL` environment variable or `https://api.cohere.ai`.
/// - Uses either `CO_API_KEY` environment variable or nothing.
/// - Starts from [`GenerationConfig::default`]: `command-r`, unset temperature, chat mode.
/// - Uses `reqwest`-based transport by default - [`ReqwestTransport`].
pub struct CohereClientBuilder {
    base_url: Option<String>,
    token: Option<String>,
    proxy: Option<String>,
    config: GenerationConfig,
    transport: Option<Arc<dyn Transport + Send + Sync>>,
}

impl CohereClientBuilder {
    /// Creates a new [`CohereClientBuilder`]. This method is called by [`CohereClient::builder`]
    pub(crate) fn new() -> Self {
        CohereClientBuilder {
            base_url: None,
            token: None,
            proxy: None,
            config: GenerationConfig::default(),
            transport: None,
        }
    }

    /// Sets the base URL for the Cohere API.
    ///
    /// If not set, the builder will try to read from the `CO_API_URL` environment variable,
    /// defaulting to `https://api.cohere.ai` if the environment variable is not found.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Sets the API token, sent as `Authorization: Bearer <token>`.
    ///
    /// If not set, the builder will try to read from the `CO_API_KEY` environment variable.
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Routes every request through the given proxy URL (`http://` or `https://`).
    pub fn proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.model = model.into();
        self
    }

    /// Sets the sampling temperature. Negative values mean "use the default".
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.config.temperature = temperature;
        self
    }

    /// Sets the sampling seed. Values of zero or less are not sent.
    pub fn seed(mut self, seed: i32) -> Self {
        self.config.seed = seed;
        self
    }

    pub fn top_k(mut self, top_k: u32) -> Self {
        self.config.top_k = top_k;
        self
    }

    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.config.max_tokens = max_tokens;
        self
    }

    pub fn stop_sequences(mut self, stop_sequences: Vec<String>) -> Self {
        self.config.stop_sequences = stop_sequences;
        self
    }

    pub fn safety_mode(mut self, safety_mode: SafetyMode) -> Self {
        self.config.safety_mode = Some(safety_mode);
        self
    }

    /// Switches between chat mode (`false`, the default) and completion mode (`true`).
    pub fn completion(mut self, completion: bool) -> Self {
        self.config.completion = completion;
        self
    }

    /// Replaces the whole generation configuration.
    pub fn config(mut self, config: GenerationConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets a custom transport implementation for the client.
    ///
    /// This allows for using different HTTP clients or mock implementations for testing.
    /// If not set, a `reqwest`-based transport \([`ReqwestTransport`]\) will be used.
    ///
    /// For testing, you can use [`MockTransport`](crate::transport::MockTransport)
    /// or your own mock [`Transport`] implementations.
    pub fn transport(mut self, transport: Arc<dyn Transport + Send + Sync>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Builds the [`CohereClient`] with the configured options.
    ///
    /// If no transport is provided, it constructs a default `reqwest`-based transport
    /// using the configured [`base_url`](CohereClientBuilder::base_url),
    /// [`token`](CohereClientBuilder::token) and [`proxy`](CohereClientBuilder::proxy).
    ///
    /// # Errors
    ///
    /// Returns an [`Error::Client`](variant@Error::Client) if the base URL or the proxy is
    /// invalid or if there's an issue initializing [`ReqwestTransport`].
    #[cfg_attr(feature = "tracing", instrument(skip(self)))]
    pub fn build(self) -> Result<CohereClient> {
        let transport = if let Some(t) = self.transport {
            t
        } else {
            let base_url_str = self.base_url.unwrap_or_else(|| {
                std::env::var("CO_API_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string())
            });
            let token = self.token.or_else(|| std::env::var("CO_API_KEY").ok());

            let base_url = Url::parse(&base_url_str)
                .map_err(|e| Error::Client(format!("Invalid base URL: {}", e)))?;

            Arc::new(ReqwestTransport::new(
                base_url,
                token,
                self.proxy.as_deref(),
            )?)
        };

        Ok(CohereClient {
            transport,
            config: self.config,
        })
    }
}
