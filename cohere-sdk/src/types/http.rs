use crate::Result;
use serde::Serialize;

/// A transport-agnostic description of one API call.
#[derive(Default, Debug, Clone)]
pub struct HttpRequest {
    /// Path relative to the client's base URL, e.g. `/v1/chat`.
    pub url: String,
    pub verb: HttpVerb,
    pub body: Option<serde_json::Value>,
}

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpVerb {
    #[default]
    POST,
}

impl HttpRequest {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    pub fn body<T: Serialize>(mut self, body: T) -> Result<Self> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }
}
