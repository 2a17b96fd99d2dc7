//! Memory tool — store information in the active context's memory.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::debug;

use oxizero_core::context::ExecutionContext;

use super::base::{optional_string, require_string, Tool};

// ─────────────────────────────────────────────
// StoreMemoryTool
// ─────────────────────────────────────────────

/// Appends a free-text memory to the owning context's store.
pub struct StoreMemoryTool {
    context: Arc<ExecutionContext>,
}

impl StoreMemoryTool {
    /// Create a store-memory tool bound to `context`.
    pub fn new(context: Arc<ExecutionContext>) -> Self {
        Self { context }
    }
}

#[async_trait]
impl Tool for StoreMemoryTool {
    fn name(&self) -> &str {
        "store_memory"
    }

    fn description(&self) -> &str {
        "Store information in memory for future reference. \
         Use this to remember solutions, facts, or anything worth keeping."
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "content": {
                    "type": "string",
                    "description": "The information to remember"
                },
                "category": {
                    "type": "string",
                    "description": "Category label (default 'general')"
                }
            },
            "required": ["content"]
        })
    }

    async fn execute(&self, params: HashMap<String, Value>) -> anyhow::Result<String> {
        let content = require_string(&params, "content")?;
        let category = optional_string(&params, "category").unwrap_or_else(|| "general".to_string());

        let mut metadata = HashMap::new();
        metadata.insert("category".to_string(), json!(category));
        self.context.memory().add_memory(&content, metadata);

        debug!(
            agent = %self.context.agent_id(),
            category = %category,
            total = self.context.memory().memory_count(),
            "memory stored"
        );

        Ok(format!("Memory stored successfully in category '{category}'"))
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
