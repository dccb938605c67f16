//! HTTP transport configuration.

use std::fmt;
use std::time::Duration;

pub(crate) const DEFAULT_STREAM_PATH: &str = "/api/agents/chat/stream";

#[derive(Clone)]
pub struct HttpTransportConfig {
    pub base_url: String,
    pub stream_path: String,
    /// Sent as `Authorization: Bearer <token>` when present.
    pub token: Option<String>,
    pub connect_timeout: Duration,
    /// Upper bound on one whole exchange, body included.
    pub request_timeout: Duration,
}

impl fmt::Debug for HttpTransportConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpTransportConfig")
            .field("base_url", &self.base_url)
            .field("stream_path", &self.stream_path)
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("connect_timeout", &self.connect_timeout)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

impl HttpTransportConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            stream_path: DEFAULT_STREAM_PATH.to_string(),
            token: None,
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(300),
        }
    }

    pub fn with_stream_path(mut self, path: impl Into<String>) -> Self {
        self.stream_path = path.into();
        self
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Full URL of the streaming endpoint.
    pub fn stream_url(&self) -> String {
        let base = self.base_url.trim_end_matches('/');
        if self.stream_path.starts_with('/') {
            format!("{base}{}", self.stream_path)
        } else {
            format!("{base}/{}", self.stream_path)
        }
    }
}
