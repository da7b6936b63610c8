//! REPL (Read-Eval-Print Loop) for interactive chat

use crate::{ConsoleFormatter, Spinner};
use monitor_application::{AiGateway, ChatBotUseCase};
use reedline::{DefaultPrompt, DefaultPromptSegment, FileBackedHistory, Reedline, Signal};
use std::io;
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;

/// History entries kept on disk.
const HISTORY_CAPACITY: usize = 1000;

/// What the loop does after a slash command
#[derive(Debug, PartialEq, Eq)]
enum CommandOutcome {
    Continue,
    Exit,
}

/// Interactive chat REPL
pub struct ChatRepl<G: AiGateway + 'static> {
    use_case: ChatBotUseCase<G>,
    history_path: Option<PathBuf>,
    show_progress: bool,
}

impl<G: AiGateway + 'static> ChatRepl<G> {
    /// Create a new ChatRepl
    pub fn new(use_case: ChatBotUseCase<G>) -> Self {
        Self {
            use_case,
            history_path: None,
            show_progress: true,
        }
    }

    /// Persist input history to `path`
    pub fn with_history(mut self, path: Option<PathBuf>) -> Self {
        self.history_path = path;
        self
    }

    /// Set whether to show progress
    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    fn editor(&self) -> io::Result<Reedline> {
        let editor = Reedline::create();
        let Some(path) = &self.history_path else {
            return Ok(editor);
        };
        if let Some(parent) = path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        let history = FileBackedHistory::with_file(HISTORY_CAPACITY, path.clone())
            .map_err(|e| io::Error::other(e.to_string()))?;
        Ok(editor.with_history(Box::new(history)))
    }

    /// Run the interactive REPL until `/quit`, Ctrl-C or Ctrl-D
    pub async fn run(&self) -> io::Result<()> {
        let mut editor = self.editor()?;
        let prompt = DefaultPrompt::new(
            DefaultPromptSegment::Basic("Ask".to_string()),
            DefaultPromptSegment::Empty,
        );

        self.print_welcome();

        loop {
            let line = match editor.read_line(&prompt) {
                Ok(Signal::Success(buffer)) => buffer,
                Ok(_) => {
                    println!("Bye!");
                    break;
                }
                Err(err) => {
                    eprintln!("Error: {}", err);
                    break;
                }
            };

            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            if line.starts_with('/') {
                if self.handle_command(line) == CommandOutcome::Exit {
                    break;
                }
                continue;
            }

            self.process_question(line).await;
        }

        Ok(())
    }

    fn print_welcome(&self) {
        println!();
        println!("╭─────────────────────────────────────────────╮");
        println!("│          team-monitor - Chat Mode           │");
        println!("╰─────────────────────────────────────────────╯");
        println!();
        println!("Tools: {}", self.use_case.registry().names().join(", "));
        println!();
        println!("Commands:");
        println!("  /help     - Show this help");
        println!("  /tools    - List available tools");
        println!("  /quit     - Exit chat");
        println!();
    }

    /// Handle slash commands.
    fn handle_command(&self, cmd: &str) -> CommandOutcome {
        match cmd {
            "/quit" | "/exit" | "/q" => {
                println!("Bye!");
                CommandOutcome::Exit
            }
            "/help" | "/h" | "/?" => {
                println!();
                println!("Commands:");
                println!("  /help, /h, /?    - Show this help");
                println!("  /tools           - List available tools");
                println!("  /quit, /exit, /q - Exit chat");
                println!();
                CommandOutcome::Continue
            }
            "/tools" => {
                println!();
                for definition in self.use_case.registry().definitions() {
                    println!("  - {}: {}", definition.name, definition.description);
                }
                println!();
                CommandOutcome::Continue
            }
            _ => {
                println!("Unknown command: {}", cmd);
                println!("Type /help for available commands");
                CommandOutcome::Continue
            }
        }
    }

    async fn process_question(&self, question: &str) {
        let token = CancellationToken::new();
        let spinner = Spinner::start(self.show_progress, "Thinking...");

        let result = tokio::select! {
            result = self.use_case.handle_with_cancellation(question, token.clone()) => Some(result),
            _ = tokio::signal::ctrl_c() => {
                token.cancel();
                None
            }
        };
        spinner.finish();

        match result {
            Some(Ok(answer)) => println!("{}", ConsoleFormatter::format_answer(&answer)),
            Some(Err(e)) => eprintln!("{}\n", ConsoleFormatter::format_error(&e)),
            None => println!("Cancelled.\n"),
        }
    }
}
