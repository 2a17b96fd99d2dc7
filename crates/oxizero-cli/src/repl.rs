//! Interactive REPL — streaming output with mid-turn interrupt.
//!
//! Line editing and persistent history come from `rustyline`.
//! While a turn is running, Ctrl-C fires the turn's cancel token instead
//! of killing the process; the partial answer is discarded and the loop
//! re-prompts.

use std::io::Write;

use anyhow::Result;
use colored::Colorize;
use rustyline::config::Configurer;
use rustyline::history::DefaultHistory;
use rustyline::{DefaultEditor, Editor};

use oxizero_agent::TurnError;
use oxizero_core::types::CancelToken;

use crate::helpers;
use crate::Session;

/// Inputs that end the session, matched case-insensitively.
const EXIT_COMMANDS: &[&str] = &["quit", "exit", "q"];

/// Interactive loop: read a line, run a turn, print the reply.
pub async fn run(mut session: Session) -> Result<()> {
    helpers::print_banner(session.driver.model());

    let mut editor = create_editor()?;

    loop {
        let input = match editor.readline("👤 You: ") {
            Ok(line) => line,
            Err(rustyline::error::ReadlineError::Interrupted)
            | Err(rustyline::error::ReadlineError::Eof) => {
                helpers::print_farewell();
                break;
            }
            Err(e) => {
                eprintln!("Input error: {e}");
                break;
            }
        };

        let trimmed = input.trim();
        if trimmed.is_empty() {
            continue;
        }
        if is_exit_command(trimmed) {
            helpers::print_farewell();
            break;
        }

        let _ = editor.add_history_entry(&input);

        print!("{} ", "🤖 Agent Zero:".green().bold());
        let _ = std::io::stdout().flush();

        // Ctrl-C during the turn flips the token; the driver notices at
        // the next stream event and backs out without touching the
        // transcript.
        let cancel = CancelToken::new();
        let watcher = {
            let cancel = cancel.clone();
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    cancel.cancel();
                }
            })
        };

        let result = session
            .driver
            .run_turn(&mut session.transcript, trimmed, &cancel, |delta| {
                print!("{delta}");
                let _ = std::io::stdout().flush();
            })
            .await;
        watcher.abort();

        match result {
            Ok(_) => {
                println!();
                println!();
            }
            Err(TurnError::Cancelled) => {
                println!();
                eprintln!("{}\n", "(turn interrupted)".dimmed());
            }
            Err(e) => {
                println!();
                eprintln!("{} {e}\n", "❌ Error:".red());
            }
        }
    }

    save_history(&mut editor);
    Ok(())
}

/// Editor configured with persistent history.
fn create_editor() -> Result<Editor<(), DefaultHistory>> {
    let mut editor = DefaultEditor::new()?;
    editor.set_max_history_size(1000)?;

    let history_path = helpers::history_path();
    if history_path.exists() {
        let _ = editor.load_history(&history_path);
    }

    Ok(editor)
}

/// Save history to disk.
fn save_history(editor: &mut Editor<(), DefaultHistory>) {
    let path = helpers::history_path();
    if let Some(parent) = path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }
    let _ = editor.save_history(&path);
}

/// Whether this input ends the session.
fn is_exit_command(input: &str) -> bool {
    let lower = input.to_lowercase();
    EXIT_COMMANDS.contains(&lower.as_str())
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_commands() {
        assert!(is_exit_command("quit"));
        assert!(is_exit_command("exit"));
        assert!(is_exit_command("q"));
        assert!(is_exit_command("QUIT"));
        assert!(!is_exit_command("hello"));
        assert!(!is_exit_command(""));
    }
}
