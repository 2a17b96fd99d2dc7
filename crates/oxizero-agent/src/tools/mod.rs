//! Tool modules for the OxiZero agent.

pub mod base;
pub mod code;
pub mod delegate;
pub mod memory;
pub mod registry;
pub mod shell;
pub mod web;

pub use base::{optional_i64, optional_string, require_string, Tool};
pub use registry::ToolRegistry;

use std::sync::Arc;

use oxizero_core::config::Config;
use oxizero_core::context::ExecutionContext;
use oxizero_providers::traits::ModelProvider;

use code::ExecuteCodeTool;
use delegate::DelegateTaskTool;
use memory::StoreMemoryTool;
use shell::TerminalCommandTool;
use web::WebSearchTool;

/// Build the standard capability set for one execution context.
///
/// Subordinate contexts get the same set, so a delegated agent can run
/// code, store memories, and delegate again (up to the depth limit).
pub fn build_registry(
    context: &Arc<ExecutionContext>,
    provider: &Arc<dyn ModelProvider>,
    config: &Config,
) -> ToolRegistry {
    let timeout = Some(config.agent.tool_timeout_secs);
    let web_key = if config.tools.web.api_key.is_empty() {
        None
    } else {
        Some(config.tools.web.api_key.clone())
    };

    let mut tools = ToolRegistry::new();
    tools.register(Arc::new(ExecuteCodeTool::new(timeout)));
    tools.register(Arc::new(TerminalCommandTool::new(timeout)));
    tools.register(Arc::new(WebSearchTool::new(
        web_key,
        config.tools.web.max_results as usize,
    )));
    tools.register(Arc::new(StoreMemoryTool::new(context.clone())));
    tools.register(Arc::new(DelegateTaskTool::new(
        context.clone(),
        provider.clone(),
        config.clone(),
    )));
    tools
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use oxizero_core::types::{Message, StreamEvent, ToolDefinition};
    use oxizero_providers::error::ProviderError;
    use oxizero_providers::traits::RequestConfig;
    use tokio::sync::mpsc;

    /// Provider that immediately ends every round.
    struct NullProvider;

    #[async_trait]
    impl ModelProvider for NullProvider {
        async fn stream_turn(
            &self,
            _messages: &[Message],
            _tools: Option<&[ToolDefinition]>,
            _model: &str,
            _config: &RequestConfig,
        ) -> Result<mpsc::Receiver<Result<StreamEvent, ProviderError>>, ProviderError> {
            let (tx, rx) = mpsc::channel(1);
            tokio::spawn(async move {
                let _ = tx.send(Ok(StreamEvent::Done { finish_reason: None })).await;
            });
            Ok(rx)
        }

        fn default_model(&self) -> &str {
            "null-model"
        }

        fn display_name(&self) -> &str {
            "null"
        }
    }

    #[test]
    fn test_standard_tool_set() {
        let context = ExecutionContext::root();
        let provider: Arc<dyn ModelProvider> = Arc::new(NullProvider);
        let tools = build_registry(&context, &provider, &Config::default());

        assert_eq!(
            tools.tool_names(),
            vec![
                "delegate_task",
                "execute_code",
                "store_memory",
                "terminal_command",
                "web_search",
            ]
        );
    }

    #[test]
    fn test_definitions_cover_all_tools() {
        let context = ExecutionContext::root();
        let provider: Arc<dyn ModelProvider> = Arc::new(NullProvider);
        let tools = build_registry(&context, &provider, &Config::default());

        let defs = tools.get_definitions();
        assert_eq!(defs.len(), 5);
        assert!(defs.iter().all(|d| d.tool_type == "function"));
    }
}
