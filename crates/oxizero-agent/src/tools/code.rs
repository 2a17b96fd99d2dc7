//! Code execution tool — run Python or shell code in a subprocess.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};
use tokio::process::Command;
use tracing::info;

use super::base::{require_string, Tool};

/// Output beyond this many characters is clipped.
const MAX_OUTPUT_LEN: usize = 10_000;

/// Default execution timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

// ─────────────────────────────────────────────
// ExecuteCodeTool
// ─────────────────────────────────────────────

/// Runs a snippet of Python or shell code and captures its output.
pub struct ExecuteCodeTool {
    /// Wall-clock timeout per invocation.
    timeout: Duration,
}

impl ExecuteCodeTool {
    /// Create a new code execution tool.
    pub fn new(timeout_secs: Option<u64>) -> Self {
        Self {
            timeout: Duration::from_secs(timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS)),
        }
    }
}

#[async_trait]
impl Tool for ExecuteCodeTool {
    fn name(&self) -> &str {
        "execute_code"
    }

    fn description(&self) -> &str {
        "Execute Python code or shell commands. Use this to run calculations, \
         scripts, or any programmatic task. Returns the captured output."
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "language": {
                    "type": "string",
                    "description": "Language to run: 'python' or 'bash'"
                },
                "code": {
                    "type": "string",
                    "description": "The code to execute"
                }
            },
            "required": ["language", "code"]
        })
    }

    async fn execute(&self, params: HashMap<String, Value>) -> anyhow::Result<String> {
        let language = require_string(&params, "language")?;
        let code = require_string(&params, "code")?;

        // Language names match case-insensitively; the error echoes the
        // caller's original spelling.
        let mut command = match language.to_lowercase().as_str() {
            "python" => {
                let mut c = Command::new("python3");
                c.args(["-c", &code]);
                c
            }
            "bash" | "shell" | "sh" => {
                let mut c = Command::new("sh");
                c.args(["-c", &code]);
                c
            }
            _ => {
                return Ok(format!("Error: Unsupported language '{language}'"));
            }
        };

        info!(language = %language, "executing code");

        let child = command
            .stdout(std::process::Stdio::piped())
            .stderr(std::process::Stdio::piped())
            // Dropping the timed-out future must take the process with it.
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| anyhow::anyhow!("Failed to start interpreter: {e}"))?;

        let result = tokio::time::timeout(self.timeout, child.wait_with_output()).await;

        match result {
            Ok(Ok(output)) => {
                if output.status.success() {
                    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
                    Ok(finish_output(stdout))
                } else {
                    let stderr = String::from_utf8_lossy(&output.stderr);
                    Ok(format!("Error: {}", stderr.trim()))
                }
            }
            Ok(Err(e)) => Ok(format!("Error: {e}")),
            Err(_) => Ok("Error: Code execution timeout".to_string()),
        }
    }
}

/// Normalize successful output: placeholder when empty, truncated when huge.
pub(crate) fn finish_output(stdout: String) -> String {
    let mut text = stdout;
    if text.trim().is_empty() {
        return "(no output)".to_string();
    }
    if text.len() > MAX_OUTPUT_LEN {
        let remaining = text.len() - MAX_OUTPUT_LEN;
        text.truncate(MAX_OUTPUT_LEN);
        text.push_str(&format!("\n... (truncated, {remaining} more chars)"));
    }
    text
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
