//! Interactive loop: stdin lines in, streamed replies out.

use std::io::Write;

use agentloom_session::{Applied, MessageId, ReplyTransport, Role, Session, SessionUpdate};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::repl::{self, Command};

/// Drive `session` until `/quit` or end of input.
pub async fn run(
    session: &mut Session,
    transport: &dyn ReplyTransport,
) -> agentloom_common::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut printer = ReplyPrinter::default();

    print_banner(session);

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    tracing::debug!("stdin closed");
                    break;
                };
                if !handle_command(session, transport, repl::parse_line(&line), &mut printer) {
                    break;
                }
            }
            Some(update) = session.next_update(), if session.has_in_flight() => {
                printer.show(&update);
            }
        }
    }

    Ok(())
}

/// Returns `false` when the loop should stop.
fn handle_command(
    session: &mut Session,
    transport: &dyn ReplyTransport,
    command: Command,
    printer: &mut ReplyPrinter,
) -> bool {
    match command {
        Command::Empty => {}
        Command::Submit(text) => match session.submit(transport, text) {
            Ok(id) => printer.expect(id, session.current_agent()),
            Err(e) => eprintln!("! {e}"),
        },
        Command::Agent(agent) => {
            session.set_agent(agent);
            println!("agent: {}", session.current_agent());
        }
        Command::Context(context) => {
            session.set_context(context);
            println!("context: {}", session.current_context().unwrap_or("(none)"));
        }
        Command::Clear => {
            session.clear();
            printer.reset();
            println!("conversation cleared");
        }
        Command::Cancel => match session.latest_streaming().cloned() {
            Some(id) if session.cancel(&id) => println!("\n(cancelled)"),
            _ => println!("nothing to cancel"),
        },
        Command::History => print_history(session),
        Command::Help => println!("{}", repl::HELP),
        Command::Quit => return false,
        Command::Invalid(msg) => eprintln!("! {msg}"),
    }
    true
}

fn print_banner(session: &Session) {
    println!(
        "agentloom v{} | agent: {} | context: {} | /help for commands",
        env!("CARGO_PKG_VERSION"),
        session.current_agent(),
        session.current_context().unwrap_or("(none)")
    );
}

fn print_history(session: &Session) {
    if session.messages().is_empty() {
        println!("(empty)");
        return;
    }
    for message in session.messages() {
        let who = match message.role() {
            Role::User => "you".to_string(),
            Role::Assistant => message.agent_used().unwrap_or("agent").to_string(),
        };
        let marker = if message.is_streaming() { " ..." } else { "" };
        println!(
            "[{}] {who}: {}{marker}",
            message.timestamp().format("%H:%M:%S"),
            message.content()
        );
    }
}

/// Writes fragments as they arrive, starting a new labelled line whenever
/// output switches to a different reply.
#[derive(Default)]
struct ReplyPrinter {
    current: Option<MessageId>,
    labels: Vec<(MessageId, String)>,
}

impl ReplyPrinter {
    fn expect(&mut self, id: MessageId, agent: &str) {
        self.labels.push((id, agent.to_string()));
    }

    fn reset(&mut self) {
        if self.current.take().is_some() {
            println!();
        }
        self.labels.clear();
    }

    fn show(&mut self, update: &SessionUpdate) {
        match &update.applied {
            Applied::Fragment(text) => {
                self.switch_to(&update.message_id);
                print!("{text}");
                let _ = std::io::stdout().flush();
            }
            Applied::Completed => {
                self.switch_to(&update.message_id);
                println!();
                self.finish(&update.message_id);
            }
            Applied::Failed(err) => {
                if self.current.as_ref() == Some(&update.message_id) {
                    println!();
                }
                eprintln!("! reply failed: {err}");
                self.finish(&update.message_id);
            }
            Applied::Stale => {}
        }
    }

    fn switch_to(&mut self, id: &MessageId) {
        if self.current.as_ref() == Some(id) {
            return;
        }
        if self.current.is_some() {
            println!();
        }
        let label = self
            .labels
            .iter()
            .find(|(known, _)| known == id)
            .map_or("agent", |(_, label)| label.as_str());
        print!("{label}> ");
        self.current = Some(id.clone());
    }

    fn finish(&mut self, id: &MessageId) {
        if self.current.as_ref() == Some(id) {
            self.current = None;
        }
        self.labels.retain(|(known, _)| known != id);
    }
}
