//! Shared CLI helpers — banner, farewell, history path.

use std::path::PathBuf;

use colored::Colorize;

/// Greeting block printed when the REPL starts.
pub fn print_banner(model: &str) {
    let version = env!("CARGO_PKG_VERSION");
    println!();
    println!("{}  v{}", "🤖 Agent Zero".cyan().bold(), version.dimmed());
    println!("{}", format!("Model: {model}").dimmed());
    println!("{}", "Type 'quit' or 'exit' to end the session.".dimmed());
    println!();
}

/// Print the farewell on session end.
pub fn print_farewell() {
    println!("\n{}", "👋 Goodbye!".cyan());
}

/// Path to the REPL history file (`~/.oxizero/history/cli_history`).
pub fn history_path() -> PathBuf {
    let base = dirs_next::home_dir()
        .map(|home| home.join(".oxizero"))
        .unwrap_or_else(|| std::env::temp_dir().join(".oxizero"));
    base.join("history").join("cli_history")
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn history_path_under_data_dir() {
        let path = history_path();
        assert!(path.to_string_lossy().contains(".oxizero"));
        assert!(path.to_string_lossy().contains("cli_history"));
    }
}
