//! agentloom configuration system.
//!
//! TOML-based configuration with validation. All config sections use
//! defaults so partial configs work out of the box.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use agentloom_config::load_config;
//!
//! let config = load_config().expect("failed to load config");
//! println!("agent: {}", config.session.default_agent);
//! ```

pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use schema::{
    AgentloomConfig, LogLevel, LoggingConfig, SessionConfig, TransportConfig,
    CONFIG_SCHEMA_VERSION,
};

use agentloom_common::ConfigError;
use std::path::Path;

/// Environment variable that overrides `transport.api_token`.
pub const API_TOKEN_ENV: &str = "AGENTLOOM_API_TOKEN";

/// Load config from the platform default path.
///
/// Creates a default `config.toml` if none exists, applies environment
/// overrides, and validates the result.
pub fn load_config() -> Result<AgentloomConfig, ConfigError> {
    let mut config = toml_loader::load_default()?;
    apply_env_overrides(&mut config);
    validation::validate(&config)?;
    Ok(config)
}

/// Like [`load_config`] but reads an explicit file, which must exist.
pub fn load_config_from(path: &Path) -> Result<AgentloomConfig, ConfigError> {
    let mut config = toml_loader::load_from_path(path)?;
    apply_env_overrides(&mut config);
    validation::validate(&config)?;
    Ok(config)
}

fn apply_env_overrides(config: &mut AgentloomConfig) {
    let token = std::env::var(API_TOKEN_ENV).ok();
    apply_token_override(config, token.as_deref());
}

/// Replace `transport.api_token` with `token` unless it is missing or blank.
fn apply_token_override(config: &mut AgentloomConfig, token: Option<&str>) {
    let Some(token) = token.map(str::trim).filter(|t| !t.is_empty()) else {
        return;
    };
    tracing::debug!("using API token from {API_TOKEN_ENV}");
    config.transport.api_token = token.to_string();
}
