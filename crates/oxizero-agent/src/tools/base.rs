//! Tool trait — the interface every agent capability implements.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;

use oxizero_core::types::ToolDefinition;

// ─────────────────────────────────────────────
// Tool trait
// ─────────────────────────────────────────────

/// Common interface for everything the model can invoke.
///
/// The driver advertises tools to the model via `to_definition()` and
/// dispatches the model's calls by `name()` through the registry.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Unique name the model calls this tool by (e.g. `"execute_code"`).
    fn name(&self) -> &str;

    /// Short description the model reads when picking a tool.
    fn description(&self) -> &str;

    /// JSON Schema for the accepted arguments.
    ///
    /// Shape is always `{"type": "object", "properties": {...}, "required": [...]}`.
    fn parameters(&self) -> Value;

    /// Run the tool with the model-supplied arguments.
    ///
    /// The string output goes back to the model verbatim. An `Err` does
    /// not escape the turn: the registry folds it into an error-string
    /// result the model can react to.
    async fn execute(&self, params: HashMap<String, Value>) -> anyhow::Result<String>;

    /// Wire-level definition advertised to the model.
    ///
    /// The default covers every tool here; override only for schemas
    /// built at runtime.
    fn to_definition(&self) -> ToolDefinition {
        ToolDefinition::new(self.name(), self.description(), self.parameters())
    }
}

// ─────────────────────────────────────────────
// Argument helpers
// ─────────────────────────────────────────────

/// Pull a required string argument out of the param map.
pub fn require_string(params: &HashMap<String, Value>, key: &str) -> anyhow::Result<String> {
    match params.get(key).and_then(Value::as_str) {
        Some(s) => Ok(s.to_string()),
        None => anyhow::bail!("Missing required parameter: {key}"),
    }
}

/// String argument that may be absent (or of the wrong type).
pub fn optional_string(params: &HashMap<String, Value>, key: &str) -> Option<String> {
    params.get(key).and_then(Value::as_str).map(str::to_string)
}

/// Integer argument that may be absent.
pub fn optional_i64(params: &HashMap<String, Value>, key: &str) -> Option<i64> {
    params.get(key).and_then(Value::as_i64)
}
