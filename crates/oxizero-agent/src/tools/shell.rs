//! Terminal tool — run a shell command in a subprocess.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};
use tokio::process::Command;
use tracing::info;

use super::base::{require_string, Tool};
use super::code::finish_output;

/// Commands are killed after this many seconds unless overridden.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

// ─────────────────────────────────────────────
// TerminalCommandTool
// ─────────────────────────────────────────────

/// Executes a shell command and captures its output.
pub struct TerminalCommandTool {
    /// Wall-clock timeout per invocation.
    timeout: Duration,
}

impl TerminalCommandTool {
    /// Create a new terminal command tool.
    pub fn new(timeout_secs: Option<u64>) -> Self {
        Self {
            timeout: Duration::from_secs(timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS)),
        }
    }
}

#[async_trait]
impl Tool for TerminalCommandTool {
    fn name(&self) -> &str {
        "terminal_command"
    }

    fn description(&self) -> &str {
        "Execute a terminal command and return its output. \
         Use this for running CLI tools, inspecting the system, or file operations."
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "command": {
                    "type": "string",
                    "description": "The shell command to execute"
                }
            },
            "required": ["command"]
        })
    }

    async fn execute(&self, params: HashMap<String, Value>) -> anyhow::Result<String> {
        let command = require_string(&params, "command")?;

        info!(command = %command, "executing terminal command");

        let child = Command::new("sh")
            .args(["-c", &command])
            .stdout(std::process::Stdio::piped())
            .stderr(std::process::Stdio::piped())
            // Dropping the timed-out future must take the process with it.
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| anyhow::anyhow!("Failed to start shell: {e}"))?;

        let result = tokio::time::timeout(self.timeout, child.wait_with_output()).await;

        match result {
            Ok(Ok(output)) => {
                if output.status.success() {
                    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
                    Ok(finish_output(stdout))
                } else {
                    let code = output.status.code().unwrap_or(-1);
                    let stderr = String::from_utf8_lossy(&output.stderr);
                    Ok(format!("Exit code {code}: {}", stderr.trim()))
                }
            }
            Ok(Err(e)) => Ok(format!("Error: {e}")),
            Err(_) => Ok("Error: Command timeout".to_string()),
        }
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn command_params(command: &str) -> HashMap<String, Value> {
        let mut params = HashMap::new();
        params.insert("command".to_string(), json!(command));
        params
    }

    #[tokio::test]
    async fn test_command_stdout() {
        let tool = TerminalCommandTool::new(Some(10));
        let result = tool.execute(command_params("echo hello")).await.unwrap();
        assert!(result.contains("hello"));
    }

    #[tokio::test]
    async fn test_nonzero_exit_code_reported() {
        let tool = TerminalCommandTool::new(Some(10));
        let result = tool
            .execute(command_params("echo broken >&2; exit 42"))
            .await
            .unwrap();
        assert!(result.starts_with("Exit code 42:"));
        assert!(result.contains("broken"));
    }

    #[tokio::test]
    async fn test_timeout_marked_clearly() {
        let tool = TerminalCommandTool::new(Some(1));
        let result = tool.execute(command_params("sleep 30")).await.unwrap();
        assert_eq!(result, "Error: Command timeout");
    }

    #[tokio::test]
    async fn test_missing_command_param() {
        let tool = TerminalCommandTool::new(None);
        let err = tool.execute(HashMap::new()).await.unwrap_err();
        assert!(err.to_string().contains("Missing required parameter: command"));
    }

    #[test]
    fn test_tool_definition() {
        let tool = TerminalCommandTool::new(None);
        let def = tool.to_definition();
        assert_eq!(def.function.name, "terminal_command");
    }
}
