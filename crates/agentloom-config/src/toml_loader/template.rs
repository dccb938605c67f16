//! Default TOML config template with inline documentation comments.

/// Generate the default TOML config content with comments.
pub(crate) fn default_config_toml() -> String {
    r##"# agentloom configuration
# Schema version 1
# Only override what you want to change -- missing fields use defaults.

[transport]
# base_url = "http://localhost:8000"
# stream_path = "/api/agents/chat/stream"
# connect_timeout_secs = 10    # 1-60
# request_timeout_secs = 300   # 5-3600
# api_token = ""               # empty = no Authorization header; AGENTLOOM_API_TOKEN overrides

[session]
# default_agent = "general"
# default_context = ""         # empty = not scoped to a project
# history_limit = 0            # 0 = send the whole log, else 1-1000
# cancel_on_clear = false      # abort in-flight replies on /clear

[logging]
# level = "info"               # trace, debug, info, warn, error
"##
    .to_string()
}
