use std::path::PathBuf;

use clap::Parser;

/// agentloom: chat with backend AI agents from the terminal.
#[derive(Parser, Debug)]
#[command(name = "agentloom", version, about)]
pub struct Args {
    /// Config file path override.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log level override (trace, debug, info, warn, error).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Agent to address first, instead of `session.default_agent`.
    #[arg(short = 'a', long)]
    pub agent: Option<String>,

    /// Project or entity scope, instead of `session.default_context`.
    #[arg(short = 'c', long)]
    pub context: Option<String>,

    /// Backend base URL, instead of `transport.base_url`.
    #[arg(long)]
    pub url: Option<String>,
}

pub fn parse() -> Args {
    Args::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_overrides() {
        let args = Args::parse_from([
            "agentloom",
            "--agent",
            "coder",
            "-c",
            "proj-1",
            "--url",
            "https://agents.example.com",
            "--log-level",
            "debug",
        ]);
        assert_eq!(args.agent.as_deref(), Some("coder"));
        assert_eq!(args.context.as_deref(), Some("proj-1"));
        assert_eq!(args.url.as_deref(), Some("https://agents.example.com"));
        assert_eq!(args.log_level.as_deref(), Some("debug"));
        assert!(args.config.is_none());
    }

    #[test]
    fn no_flags_means_no_overrides() {
        let args = Args::parse_from(["agentloom"]);
        assert!(args.agent.is_none());
        assert!(args.context.is_none());
        assert!(args.url.is_none());
    }
}
