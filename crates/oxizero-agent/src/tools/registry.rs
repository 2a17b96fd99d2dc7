//! Tool registry — named capabilities the driver dispatches model calls to.
//!
//! Tools are injected at construction time rather than looked up from any
//! global table, so independent agent sessions never interfere.

use std::collections::HashMap;
use std::sync::Arc;

use oxizero_core::types::{ToolDefinition, ToolInvocationResult};
use oxizero_core::utils::truncate_string;
use tracing::{debug, info, warn};

use super::base::Tool;

// ─────────────────────────────────────────────
// Registry
// ─────────────────────────────────────────────

/// Owns the agent's tool set and routes calls by name.
///
/// Tools are held as `Arc<dyn Tool>` so they can be shared across tasks.
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    /// New registry with no tools.
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    /// Add a tool under its `name()`. A later registration with the same
    /// name replaces the earlier one.
    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        info!(tool = tool.name(), "tool registered");
        self.tools.insert(tool.name().to_string(), tool);
    }

    /// Whether a tool with this name exists.
    pub fn has(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Registered names in sorted order, so listings stay stable.
    pub fn tool_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.tools.keys().cloned().collect();
        names.sort();
        names
    }

    /// Definitions for every registered tool, sorted by name.
    pub fn get_definitions(&self) -> Vec<ToolDefinition> {
        let mut defs: Vec<ToolDefinition> = self.tools.values().map(|t| t.to_definition()).collect();
        defs.sort_by(|a, b| a.function.name.cmp(&b.function.name));
        defs
    }

    /// Dispatch a call to the named tool.
    ///
    /// The model always gets a textual result back, even on failure: an
    /// unknown name or a tool error becomes an `Error:`-prefixed result
    /// so the model can decide to retry, ask the user, or report.
    pub async fn execute(
        &self,
        name: &str,
        params: HashMap<String, serde_json::Value>,
    ) -> ToolInvocationResult {
        let tool = match self.tools.get(name) {
            Some(t) => t,
            None => {
                warn!(tool = name, "unknown tool requested");
                return ToolInvocationResult::error(name, format!("Error: Tool '{name}' not found"));
            }
        };

        match tool.execute(params).await {
            Ok(output) => {
                debug!(tool = name, output = %truncate_string(&output, 200), "tool result");
                ToolInvocationResult::ok(name, output)
            }
            Err(e) => {
                warn!(tool = name, error = %e, "tool returned an error");
                ToolInvocationResult::error(name, format!("Error executing {name}: {e}"))
            }
        }
    }

    /// Count of registered tools.
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// True when no tools are registered.
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::base::require_string;
    use async_trait::async_trait;
    use serde_json::json;

    /// Fixture that shouts its input back.
    struct UppercaseTool;

    #[async_trait]
    impl Tool for UppercaseTool {
        fn name(&self) -> &str {
            "uppercase"
        }
        fn description(&self) -> &str {
            "Uppercases the given text"
        }
        fn parameters(&self) -> serde_json::Value {
            json!({
                "type": "object",
                "properties": {
                    "text": { "type": "string", "description": "Text to transform" }
                },
                "required": ["text"]
            })
        }
        async fn execute(&self, params: HashMap<String, serde_json::Value>) -> anyhow::Result<String> {
            let text = require_string(&params, "text")?;
            Ok(text.to_uppercase())
        }
    }

    /// Fixture whose execution always errors.
    struct BrokenTool;

    #[async_trait]
    impl Tool for BrokenTool {
        fn name(&self) -> &str {
            "broken"
        }
        fn description(&self) -> &str {
            "Always errors"
        }
        fn parameters(&self) -> serde_json::Value {
            json!({"type": "object", "properties": {}, "required": []})
        }
        async fn execute(&self, _params: HashMap<String, serde_json::Value>) -> anyhow::Result<String> {
            anyhow::bail!("wires crossed")
        }
    }

    #[test]
    fn test_register_and_has() {
        let mut reg = ToolRegistry::new();
        reg.register(Arc::new(UppercaseTool));
        assert!(reg.has("uppercase"));
        assert!(!reg.has("lowercase"));
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn test_names_sorted() {
        let mut reg = ToolRegistry::new();
        reg.register(Arc::new(UppercaseTool));
        reg.register(Arc::new(BrokenTool));
        assert_eq!(reg.tool_names(), vec!["broken", "uppercase"]);
    }

    #[test]
    fn test_definitions_sorted() {
        let mut reg = ToolRegistry::new();
        reg.register(Arc::new(UppercaseTool));
        reg.register(Arc::new(BrokenTool));
        let defs = reg.get_definitions();
        assert_eq!(defs.len(), 2);
        assert_eq!(defs[0].function.name, "broken");
        assert_eq!(defs[1].function.name, "uppercase");
        assert_eq!(defs[0].tool_type, "function");
    }

    #[tokio::test]
    async fn test_execute_ok() {
        let mut reg = ToolRegistry::new();
        reg.register(Arc::new(UppercaseTool));
        let mut params = HashMap::new();
        params.insert("text".into(), json!("hello"));
        let result = reg.execute("uppercase", params).await;
        assert!(!result.is_error);
        assert_eq!(result.tool_name, "uppercase");
        assert_eq!(result.output, "HELLO");
    }

    #[tokio::test]
    async fn test_execute_unknown_tool() {
        let reg = ToolRegistry::new();
        let result = reg.execute("missing", HashMap::new()).await;
        assert!(result.is_error);
        assert_eq!(result.output, "Error: Tool 'missing' not found");
    }

    #[tokio::test]
    async fn test_execute_error_caught() {
        let mut reg = ToolRegistry::new();
        reg.register(Arc::new(BrokenTool));
        let result = reg.execute("broken", HashMap::new()).await;
        assert!(result.is_error);
        assert!(result.output.starts_with("Error executing broken:"));
        assert!(result.output.contains("wires crossed"));
    }

    #[test]
    fn test_default() {
        let reg = ToolRegistry::default();
        assert!(reg.is_empty());
    }
}
