//! Interactive console front end — reads descriptions from stdin, runs the
//! generator once per line and prints the result.
//!
//! Runs until the `shutdown` token is cancelled (Ctrl-C), stdin closes, or
//! the user types `/quit`. Line handling lives in [`Console::handle_line`]
//! so it can be driven without a terminal.

pub mod history;

use std::io::Write as _;
use std::sync::Arc;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::AppError;
use crate::generator::{Envelope, TestCaseGenerator};

pub use history::{ChatEntry, ChatHistory, Role};

const HELP: &str = "\
Describe the feature or function you need test cases for, then press Enter.

Commands:
  /help           Show this help
  /history        Show the conversation so far
  /clear          Forget the conversation
  /model [id]     Show or switch the model for the next requests
  /quit           Leave the console";

// ── Line parsing ──────────────────────────────────────────────────────────────

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Help,
    History,
    Clear,
    Model(Option<String>),
    Quit,
    Unknown(String),
    Message(String),
}

fn parse_line(line: &str) -> Option<Command> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    let Some(rest) = line.strip_prefix('/') else {
        return Some(Command::Message(line.to_string()));
    };

    let (name, arg) = match rest.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, Some(arg.trim().to_string()).filter(|a| !a.is_empty())),
        None => (rest, None),
    };

    Some(match name {
        "help" | "?" => Command::Help,
        "history" => Command::History,
        "clear" => Command::Clear,
        "model" => Command::Model(arg),
        "quit" | "exit" => Command::Quit,
        other => Command::Unknown(other.to_string()),
    })
}

// ── Console ───────────────────────────────────────────────────────────────────

/// What the read loop should do after a line.
#[derive(Debug, PartialEq, Eq)]
pub enum Reply {
    Print(String),
    Quit,
}

/// One interactive session: adapter handle, model choice and transcript.
pub struct Console {
    generator: Arc<TestCaseGenerator>,
    model: String,
    history: ChatHistory,
    session_id: Uuid,
}

impl Console {
    pub fn new(generator: Arc<TestCaseGenerator>, history_cap: usize) -> Self {
        let model = generator.default_model().to_string();
        Self { generator, model, history: ChatHistory::new(history_cap), session_id: Uuid::new_v4() }
    }

    pub fn history(&self) -> &ChatHistory {
        &self.history
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// Handle one input line. Blank lines produce `None`.
    pub async fn handle_line(&mut self, line: &str) -> Option<Reply> {
        let command = parse_line(line)?;
        debug!(session_id = %self.session_id, ?command, "console command");

        let reply = match command {
            Command::Help => Reply::Print(HELP.to_string()),
            Command::Quit => Reply::Quit,
            Command::Clear => {
                self.history.clear();
                Reply::Print("(history cleared)".to_string())
            }
            Command::History => Reply::Print(self.render_history()),
            Command::Model(None) => Reply::Print(format!("model: {}", self.model)),
            Command::Model(Some(model)) => {
                info!(session_id = %self.session_id, %model, "console model switched");
                self.model = model;
                Reply::Print(format!("model set to {}", self.model))
            }
            Command::Unknown(name) => Reply::Print(format!("unknown command /{name}, try /help")),
            Command::Message(text) => Reply::Print(self.ask(text).await),
        };
        Some(reply)
    }

    async fn ask(&mut self, text: String) -> String {
        self.history.push(Role::User, text.clone());
        let envelope = self.generator.generate(&text, Some(self.model.as_str())).await;

        match envelope {
            Envelope::Success { data, metadata } => {
                let caption = format!(
                    "Generated in {:.2}s using {}",
                    metadata.duration_secs(),
                    metadata.model
                );
                let shown = format!("{data}\n\n{caption}");
                self.history.push(Role::Assistant, data);
                shown
            }
            Envelope::Failure { message } => {
                let shown = format!("❌ Error: {message}");
                self.history.push(Role::Assistant, shown.clone());
                shown
            }
        }
    }

    fn render_history(&self) -> String {
        if self.history.is_empty() {
            return "(no messages yet)".to_string();
        }
        let mut out = String::new();
        if self.history.evicted() > 0 {
            out.push_str(&format!("({} older messages dropped)\n", self.history.evicted()));
        }
        for entry in self.history.entries() {
            out.push_str(&format!("[{}] {}\n", entry.role, entry.content));
        }
        out.trim_end().to_string()
    }
}

// ── Read loop ─────────────────────────────────────────────────────────────────

pub async fn run(
    generator: Arc<TestCaseGenerator>,
    history_cap: usize,
    shutdown: CancellationToken,
) -> Result<(), AppError> {
    let mut console = Console::new(generator, history_cap);

    info!(session_id = %console.session_id(), model = %console.model(), "console started");
    println!("─────────────────────────────────────────────");
    println!(" Test case generator  (/help, Ctrl-C to quit)");
    println!("─────────────────────────────────────────────");

    drive(&mut console, BufReader::new(tokio::io::stdin()), &shutdown).await;

    info!(session_id = %console.session_id(), messages = console.history().len(), "console closed");
    Ok(())
}

/// Feed lines from `input` to `console` until EOF, `/quit` or `shutdown`.
///
/// The token is watched while waiting for input and while a generation is
/// in flight; cancelling drops the pending request.
async fn drive<R>(console: &mut Console, input: R, shutdown: &CancellationToken)
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = input.lines();

    loop {
        print!("> ");
        let _ = std::io::stdout().flush();

        let input = tokio::select! {
            biased;

            _ = shutdown.cancelled() => {
                println!();
                info!("console shutting down");
                break;
            }

            line = lines.next_line() => match line {
                Err(e) => {
                    warn!("console read error: {e}");
                    break;
                }
                Ok(None) => {
                    info!("console stdin closed");
                    break;
                }
                Ok(Some(input)) => input,
            },
        };

        tokio::select! {
            biased;

            _ = shutdown.cancelled() => {
                println!();
                info!("console shutting down, pending request dropped");
                break;
            }

            reply = console.handle_line(&input) => match reply {
                None => continue,
                Some(Reply::Quit) => break,
                Some(Reply::Print(text)) => println!("{text}\n"),
            },
        }
    }
}
