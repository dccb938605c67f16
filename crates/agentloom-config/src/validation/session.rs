use super::helpers::{validate_non_empty, validate_range};
use crate::schema::AgentloomConfig;

pub(crate) fn validate_session(errors: &mut Vec<String>, config: &AgentloomConfig) {
    validate_non_empty(errors, "session.default_agent", &config.session.default_agent);

    // 0 is the "unbounded" sentinel.
    if config.session.history_limit != 0 {
        validate_range(
            errors,
            "session.history_limit",
            config.session.history_limit,
            1,
            1000,
        );
    }
}
