use super::helpers::{validate_non_empty, validate_range};
use crate::schema::AgentloomConfig;

pub(crate) fn validate_transport(errors: &mut Vec<String>, config: &AgentloomConfig) {
    let transport = &config.transport;

    validate_non_empty(errors, "transport.base_url", &transport.base_url);
    if !transport.base_url.trim().is_empty()
        && !(transport.base_url.starts_with("http://") || transport.base_url.starts_with("https://"))
    {
        errors.push(format!(
            "transport.base_url = {:?} must start with http:// or https://",
            transport.base_url
        ));
    }

    if !transport.stream_path.starts_with('/') {
        errors.push(format!(
            "transport.stream_path = {:?} must start with '/'",
            transport.stream_path
        ));
    }

    validate_range(
        errors,
        "transport.connect_timeout_secs",
        transport.connect_timeout_secs,
        1,
        60,
    );
    validate_range(
        errors,
        "transport.request_timeout_secs",
        transport.request_timeout_secs,
        5,
        3600,
    );
}
