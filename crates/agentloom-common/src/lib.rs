pub mod errors;
pub mod events;
pub mod id;

pub use errors::{AgentloomError, ConfigError};
pub use events::EventBus;
pub use id::{new_correlation_id, new_id, MessageId, SessionId};

pub type Result<T> = std::result::Result<T, AgentloomError>;
