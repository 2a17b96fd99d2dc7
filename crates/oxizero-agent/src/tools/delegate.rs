//! Delegation tool — hand a subtask to a subordinate agent.
//!
//! Creates a child execution context and runs a complete nested
//! conversation turn scoped to it. The parent turn blocks until the
//! subordinate finishes; the subordinate's final answer becomes the
//! tool result.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::info;

use oxizero_core::config::Config;
use oxizero_core::context::ExecutionContext;
use oxizero_core::types::{CancelToken, ConversationTranscript};
use oxizero_providers::traits::ModelProvider;

use super::base::{optional_string, require_string, Tool};
use super::build_registry;
use crate::driver::ConversationDriver;

/// How deep the delegation chain may grow. A context at this depth may not
/// delegate further; the refusal goes back to the model as an error result.
const MAX_DELEGATION_DEPTH: usize = 3;

// ─────────────────────────────────────────────
// DelegateTaskTool
// ─────────────────────────────────────────────

/// Delegates a task to a freshly created subordinate context.
pub struct DelegateTaskTool {
    /// The delegating (parent) context.
    context: Arc<ExecutionContext>,
    /// Shared model backend, reused for the subordinate's turn.
    provider: Arc<dyn ModelProvider>,
    /// Settings the subordinate's driver and tools are built from.
    config: Config,
}

impl DelegateTaskTool {
    /// Create a delegation tool bound to the parent `context`.
    pub fn new(
        context: Arc<ExecutionContext>,
        provider: Arc<dyn ModelProvider>,
        config: Config,
    ) -> Self {
        Self {
            context,
            provider,
            config,
        }
    }
}

#[async_trait]
impl Tool for DelegateTaskTool {
    fn name(&self) -> &str {
        "delegate_task"
    }

    fn description(&self) -> &str {
        "Delegate a subtask to a subordinate agent. The subordinate works \
         through the task with its own tools and returns its final answer."
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "task_description": {
                    "type": "string",
                    "description": "What the subordinate should accomplish"
                },
                "context": {
                    "type": "string",
                    "description": "Optional background information for the subordinate"
                }
            },
            "required": ["task_description"]
        })
    }

    async fn execute(&self, params: HashMap<String, Value>) -> anyhow::Result<String> {
        let task_description = require_string(&params, "task_description")?;
        let extra_context = optional_string(&params, "context").unwrap_or_default();

        if self.context.depth() >= MAX_DELEGATION_DEPTH {
            return Ok(format!(
                "Error: Maximum delegation depth ({MAX_DELEGATION_DEPTH}) reached"
            ));
        }

        let subordinate = self.context.create_subordinate();
        info!(
            parent = %self.context.agent_id(),
            subordinate = %subordinate.agent_id(),
            "delegating task"
        );

        let input = if extra_context.is_empty() {
            task_description
        } else {
            format!("{task_description}\n\nContext: {extra_context}")
        };

        let tools = build_registry(&subordinate, &self.provider, &self.config);
        let driver = ConversationDriver::new(
            self.provider.clone(),
            tools,
            subordinate.clone(),
            &self.config,
        );

        // The subordinate gets a fresh transcript and an inert cancel
        // token; only the user can cancel, and the user talks to the root.
        let mut transcript = ConversationTranscript::new();
        let cancel = CancelToken::new();

        match driver.run_turn(&mut transcript, &input, &cancel, |_| {}).await {
            Ok(answer) => Ok(answer),
            Err(e) => Err(anyhow::anyhow!(
                "Delegation to agent {} failed: {e}",
                subordinate.agent_id()
            )),
        }
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
