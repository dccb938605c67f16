use serde::{Deserialize, Serialize};

/// Defaults for a new conversation session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub default_agent: String,
    /// Empty means the conversation is not scoped to a project.
    pub default_context: String,
    /// Most recent log entries sent as history. 0 sends the whole log.
    pub history_limit: u32,
    /// Abort in-flight replies when the log is cleared.
    pub cancel_on_clear: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            default_agent: "general".into(),
            default_context: String::new(),
            history_limit: 0,
            cancel_on_clear: false,
        }
    }
}

impl SessionConfig {
    pub fn context(&self) -> Option<&str> {
        let context = self.default_context.trim();
        (!context.is_empty()).then_some(context)
    }

    pub fn history_limit(&self) -> Option<usize> {
        (self.history_limit > 0).then_some(self.history_limit as usize)
    }
}
