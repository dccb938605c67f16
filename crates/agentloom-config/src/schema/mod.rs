//! Configuration schema types for agentloom.
//!
//! All structs use `serde(default)` so partial configs work correctly.

mod logging;
mod session;
mod transport;

pub use logging::*;
pub use session::*;
pub use transport::*;

use serde::{Deserialize, Serialize};

/// Current config schema version.
pub const CONFIG_SCHEMA_VERSION: u32 = 1;

/// Root configuration.
///
/// Only override what you want to change.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct AgentloomConfig {
    pub transport: TransportConfig,
    pub session: SessionConfig,
    pub logging: LoggingConfig,
}
