//! Full configuration validation.
//!
//! Each section has its own validator; this orchestrator calls them all
//! and collects errors into a single `ConfigError`.

mod helpers;
mod session;
mod transport;


use crate::schema::AgentloomConfig;
use agentloom_common::ConfigError;

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &AgentloomConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    transport::validate_transport(&mut errors, config);
    session::validate_session(&mut errors, config);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}
