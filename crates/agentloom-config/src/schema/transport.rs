use serde::{Deserialize, Serialize};

/// Backend endpoint and HTTP client settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TransportConfig {
    pub base_url: String,
    /// Path of the streaming chat endpoint, appended to `base_url`.
    pub stream_path: String,
    /// Valid range: 1-60.
    pub connect_timeout_secs: u32,
    /// Valid range: 5-3600.
    pub request_timeout_secs: u32,
    /// Bearer token. Empty means no `Authorization` header.
    pub api_token: String,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".into(),
            stream_path: "/api/agents/chat/stream".into(),
            connect_timeout_secs: 10,
            request_timeout_secs: 300,
            api_token: String::new(),
        }
    }
}

impl TransportConfig {
    pub fn token(&self) -> Option<&str> {
        let token = self.api_token.trim();
        (!token.is_empty()).then_some(token)
    }
}
