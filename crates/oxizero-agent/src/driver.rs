//! Conversation driver — runs one user turn through the model ↔ tool loop.
//!
//! A turn starts idle, submits the transcript and tool definitions to the
//! model, then alternates between streaming text and executing tool calls
//! until the model finishes a round with no pending calls (or the round
//! budget runs out). Text deltas are surfaced to the caller as they arrive;
//! tool results are fed back into the same logical turn, one at a time.

use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info, warn};

use oxizero_core::config::Config;
use oxizero_core::context::{ExecutionContext, LogLevel};
use oxizero_core::types::{CancelToken, ConversationTranscript, Message, StreamEvent, ToolCall};
use oxizero_providers::error::ProviderError;
use oxizero_providers::traits::{ModelProvider, RequestConfig};

use crate::prompt::SYSTEM_INSTRUCTIONS;
use crate::tools::registry::ToolRegistry;

// ─────────────────────────────────────────────
// TurnError
// ─────────────────────────────────────────────

/// Why a turn failed.
///
/// Tool failures never appear here: they flow back to the model as
/// error-string results inside the turn.
#[derive(Debug, Error)]
pub enum TurnError {
    /// The turn was cancelled between stream events.
    #[error("turn cancelled")]
    Cancelled,
    /// The model request or stream failed.
    #[error(transparent)]
    Provider(#[from] ProviderError),
}

// ─────────────────────────────────────────────
// ConversationDriver
// ─────────────────────────────────────────────

/// Drives a conversation for one execution context.
pub struct ConversationDriver {
    /// Model backend.
    provider: Arc<dyn ModelProvider>,
    /// Capabilities the model may invoke.
    tools: ToolRegistry,
    /// Identity, memory, and log scope this driver acts for.
    context: Arc<ExecutionContext>,
    /// Model to use.
    model: String,
    /// Request limits (max_tokens, temperature).
    request_config: RequestConfig,
    /// Maximum model/tool round-trips per turn.
    max_rounds: usize,
}

impl ConversationDriver {
    /// Create a driver for `context`, taking limits from `config`.
    pub fn new(
        provider: Arc<dyn ModelProvider>,
        tools: ToolRegistry,
        context: Arc<ExecutionContext>,
        config: &Config,
    ) -> Self {
        Self {
            provider,
            tools,
            context,
            model: config.agent.model.clone(),
            request_config: RequestConfig {
                max_tokens: config.agent.max_tokens,
                temperature: config.agent.temperature,
            },
            max_rounds: config.agent.max_turn_rounds as usize,
        }
    }

    /// The model this driver sends requests to.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Run one full turn for `user_message`.
    ///
    /// Streams text fragments to `on_delta` as they arrive and returns the
    /// accumulated response text. On success the user message and response
    /// are appended to `transcript` together; a cancelled or failed turn
    /// leaves the transcript exactly as it was.
    pub async fn run_turn(
        &self,
        transcript: &mut ConversationTranscript,
        user_message: &str,
        cancel: &CancelToken,
        mut on_delta: impl FnMut(&str),
    ) -> Result<String, TurnError> {
        self.context.log(
            format!("Processing user request: {user_message}"),
            LogLevel::Info,
        );

        // Full model-facing message list: system instructions, prior turns,
        // then the new user message. Tool traffic accumulates here but
        // never reaches the transcript.
        let mut messages = Vec::with_capacity(transcript.len() + 2);
        messages.push(Message::system(SYSTEM_INSTRUCTIONS));
        messages.extend(transcript.to_messages());
        messages.push(Message::user(user_message));

        let tool_defs = self.tools.get_definitions();
        let mut response = String::new();

        for round in 0..self.max_rounds {
            debug!(agent = %self.context.agent_id(), round = round, "model round");

            let mut rx = match self
                .provider
                .stream_turn(&messages, Some(&tool_defs), &self.model, &self.request_config)
                .await
            {
                Ok(rx) => rx,
                Err(e) => {
                    self.context
                        .log(format!("Model stream failed: {e}"), LogLevel::Error);
                    return Err(TurnError::Provider(e));
                }
            };

            let mut pending_calls: Vec<ToolCall> = Vec::new();
            let mut round_text = String::new();

            while let Some(event) = rx.recv().await {
                if cancel.is_cancelled() {
                    // Partial text is discarded, not appended.
                    self.context.log("Turn cancelled", LogLevel::Warn);
                    return Err(TurnError::Cancelled);
                }
                match event {
                    Ok(StreamEvent::TextDelta(delta)) => {
                        on_delta(&delta);
                        round_text.push_str(&delta);
                    }
                    Ok(StreamEvent::ToolCall(call)) => {
                        pending_calls.push(call);
                    }
                    Ok(StreamEvent::Done { finish_reason }) => {
                        debug!(finish_reason = ?finish_reason, "model round complete");
                        break;
                    }
                    Err(e) => {
                        self.context
                            .log(format!("Model stream failed: {e}"), LogLevel::Error);
                        return Err(TurnError::Provider(e));
                    }
                }
            }

            response.push_str(&round_text);

            if pending_calls.is_empty() {
                // No tool requests left: the turn is complete.
                transcript.push_user(user_message);
                transcript.push_assistant(&response);
                self.context.log(
                    format!("Response generated: {} characters", response.len()),
                    LogLevel::Info,
                );
                return Ok(response);
            }

            // The round's streamed text rides along with its calls in the
            // replayed assistant message. Then each tool result goes back
            // into the same logical turn, one call at a time.
            let narration = if round_text.is_empty() {
                None
            } else {
                Some(round_text)
            };
            messages.push(Message::assistant_with_calls(narration, pending_calls.clone()));
            for call in &pending_calls {
                let params: HashMap<String, serde_json::Value> =
                    serde_json::from_str(&call.function.arguments).unwrap_or_default();

                info!(
                    agent = %self.context.agent_id(),
                    tool = %call.function.name,
                    round = round,
                    "executing tool call"
                );

                let result = self.tools.execute(&call.function.name, params).await;
                messages.push(Message::tool_result(&call.id, &result.output));
            }
        }

        // Budget exhausted: a recoverable completion, not a crash. Return
        // whatever text accumulated so far.
        warn!(
            agent = %self.context.agent_id(),
            rounds = self.max_rounds,
            "turn budget exhausted"
        );
        self.context.log(
            format!("Turn budget exhausted after {} rounds", self.max_rounds),
            LogLevel::Warn,
        );
        transcript.push_user(user_message);
        transcript.push_assistant(&response);
        Ok(response)
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
