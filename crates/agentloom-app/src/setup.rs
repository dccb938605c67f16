//! Turning config plus CLI overrides into a transport and a session.

use std::time::Duration;

use agentloom_config::{AgentloomConfig, SessionConfig, TransportConfig};
use agentloom_session::{HttpTransportConfig, Session};

use crate::cli::Args;

pub fn transport_config(config: &TransportConfig, url: Option<&str>) -> HttpTransportConfig {
    let base_url = url.unwrap_or(&config.base_url);
    let mut http = HttpTransportConfig::new(base_url)
        .with_stream_path(config.stream_path.clone())
        .with_connect_timeout(Duration::from_secs(u64::from(config.connect_timeout_secs)))
        .with_request_timeout(Duration::from_secs(u64::from(config.request_timeout_secs)));
    if let Some(token) = config.token() {
        http = http.with_token(token);
    }
    http
}

pub fn build_session(config: &SessionConfig, agent: Option<&str>, context: Option<&str>) -> Session {
    let agent = agent.unwrap_or(&config.default_agent);
    let mut session = Session::new(agent).with_cancel_on_clear(config.cancel_on_clear);
    if let Some(context) = context.or(config.context()) {
        session = session.with_context(context);
    }
    if let Some(limit) = config.history_limit() {
        session = session.with_history_limit(limit);
    }
    session
}

/// Log filter directive: `--log-level` wins over `logging.level`.
pub fn log_directive(args: &Args, config: &AgentloomConfig) -> String {
    let level = args
        .log_level
        .as_deref()
        .unwrap_or(config.logging.level.as_directive());
    format!("agentloom={level}")
}
