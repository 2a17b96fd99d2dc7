//! Model provider trait — the streaming capability the driver runs on.
//!
//! A provider turns one prepared round (messages + tools + limits) into an
//! ordered stream of [`StreamEvent`]s. The `HttpProvider` implementation
//! covers any OpenAI-compatible `/chat/completions` endpoint; tests swap in
//! scripted providers.

use async_trait::async_trait;
use tokio::sync::mpsc;

use oxizero_core::types::{Message, StreamEvent, ToolDefinition};

use crate::error::ProviderError;

/// Generation limits passed to each model round.
#[derive(Clone, Debug)]
pub struct RequestConfig {
    /// Generation cap in tokens.
    pub max_tokens: u32,
    /// Sampling temperature, 0.0 to 2.0.
    pub temperature: f64,
}

impl Default for RequestConfig {
    fn default() -> Self {
        Self {
            max_tokens: 8192,
            temperature: 0.7,
        }
    }
}

/// Trait that all model backends implement.
#[async_trait]
pub trait ModelProvider: Send + Sync {
    /// Start one streamed model round.
    ///
    /// # Arguments
    /// * `messages` — Conversation for this round, in OpenAI format.
    /// * `tools`    — Optional tool definitions the model may call.
    /// * `model`    — Model identifier (e.g. `"claude-opus-4-5"`).
    /// * `config`   — Generation limits.
    ///
    /// # Returns
    /// A channel of events in arrival order: zero or more text deltas and
    /// tool calls, closed out by exactly one `Done` event. Errors before
    /// the first event are returned directly; a mid-stream failure arrives
    /// as an `Err` item and ends the stream.
    async fn stream_turn(
        &self,
        messages: &[Message],
        tools: Option<&[ToolDefinition]>,
        model: &str,
        config: &RequestConfig,
    ) -> Result<mpsc::Receiver<Result<StreamEvent, ProviderError>>, ProviderError>;

    /// Model to use when the caller does not pick one.
    fn default_model(&self) -> &str;

    /// Human-readable name used in logs.
    fn display_name(&self) -> &str;
}
