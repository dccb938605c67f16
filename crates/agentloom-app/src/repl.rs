//! Line commands for the interactive loop.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Plain text to send to the current agent.
    Submit(String),
    Agent(String),
    /// `None` unscopes the next submission.
    Context(Option<String>),
    Clear,
    /// Abort the newest reply still streaming.
    Cancel,
    History,
    Help,
    Quit,
    /// Nothing to do (blank line).
    Empty,
    /// Malformed command; carries a message for the user.
    Invalid(String),
}

pub const HELP: &str = "\
commands:
  /agent <id>     address the next message to another agent
  /context [id]   scope to a project, or unscope with no id
  /clear          start a new conversation
  /cancel         abort the newest streaming reply
  /history        print the conversation so far
  /quit           exit";

pub fn parse_line(line: &str) -> Command {
    let line = line.trim();
    if line.is_empty() {
        return Command::Empty;
    }
    let Some(rest) = line.strip_prefix('/') else {
        return Command::Submit(line.to_string());
    };

    let (name, arg) = match rest.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (rest, ""),
    };

    match name {
        "agent" if arg.is_empty() => Command::Invalid("usage: /agent <id>".into()),
        "agent" => Command::Agent(arg.to_string()),
        "context" if arg.is_empty() => Command::Context(None),
        "context" => Command::Context(Some(arg.to_string())),
        "clear" => Command::Clear,
        "cancel" => Command::Cancel,
        "history" => Command::History,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => Command::Invalid(format!("unknown command: /{other} (try /help)")),
    }
}
