//! Streaming HTTP client for OpenAI-compatible chat completion APIs.
//!
//! Talks to any `/chat/completions` endpoint with `stream: true` and turns
//! the server-sent-event frames into [`StreamEvent`]s: text deltas are
//! forwarded the moment they arrive, tool-call fragments are assembled by
//! index, and the round is closed out with a single `Done` event.

use async_trait::async_trait;
use futures::StreamExt;
use tokio::sync::mpsc;
use tracing::{debug, error, warn};

use oxizero_core::types::{
    ChatCompletionChunk, ChatCompletionRequest, Message, StreamEvent, ToolCall, ToolCallDelta,
    ToolDefinition,
};

use crate::error::ProviderError;
use crate::traits::{ModelProvider, RequestConfig};

// ─────────────────────────────────────────────
// HttpProvider
// ─────────────────────────────────────────────

/// A model provider that speaks the OpenAI streaming wire format.
pub struct HttpProvider {
    /// Shared client; reqwest pools connections behind it.
    client: reqwest::Client,
    /// API base URL (e.g. `"https://api.anthropic.com/v1"`).
    api_base: String,
    /// Key sent as a Bearer token.
    api_key: String,
    /// Model used when a request names none.
    default_model: String,
    /// Name used in logs.
    name: String,
}

impl std::fmt::Debug for HttpProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpProvider")
            .field("name", &self.name)
            .field("api_base", &self.api_base)
            .field("default_model", &self.default_model)
            .finish()
    }
}

impl HttpProvider {
    /// Create a new provider instance.
    pub fn new(
        name: impl Into<String>,
        api_base: impl Into<String>,
        api_key: impl Into<String>,
        default_model: impl Into<String>,
    ) -> Self {
        // No overall request timeout: a round streams for as long as the
        // model generates. Only connection setup is bounded.
        let client = reqwest::Client::builder()
            .connect_timeout(std::time::Duration::from_secs(30))
            .build()
            .expect("Failed to build HTTP client");

        HttpProvider {
            client,
            api_base: api_base.into(),
            api_key: api_key.into(),
            default_model: default_model.into(),
            name: name.into(),
        }
    }

    /// Join the API base with the completions path.
    fn completions_url(&self) -> String {
        let base = self.api_base.trim_end_matches('/');
        format!("{}/chat/completions", base)
    }
}

#[async_trait]
impl ModelProvider for HttpProvider {
    async fn stream_turn(
        &self,
        messages: &[Message],
        tools: Option<&[ToolDefinition]>,
        model: &str,
        config: &RequestConfig,
    ) -> Result<mpsc::Receiver<Result<StreamEvent, ProviderError>>, ProviderError> {
        debug!(
            provider = %self.name,
            model = %model,
            messages = messages.len(),
            tools = tools.map_or(0, |t| t.len()),
            "starting model round"
        );

        let request_body = ChatCompletionRequest {
            model: model.to_string(),
            messages: messages.to_vec(),
            tools: tools.map(|t| t.to_vec()),
            max_tokens: Some(config.max_tokens),
            temperature: Some(config.temperature),
            stream: true,
        };

        let response = self
            .client
            .post(self.completions_url())
            .bearer_auth(&self.api_key)
            .header("Accept", "text/event-stream")
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "(unreadable error body)".to_string());
            error!(provider = %self.name, status = %status, body = %body, "API error");
            return Err(ProviderError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let (tx, rx) = mpsc::channel(64);
        let provider_name = self.name.clone();
        tokio::spawn(pump_stream(response, tx, provider_name));

        Ok(rx)
    }

    fn default_model(&self) -> &str {
        &self.default_model
    }

    fn display_name(&self) -> &str {
        &self.name
    }
}

// ─────────────────────────────────────────────
// SSE pump
// ─────────────────────────────────────────────

/// Read the SSE byte stream and feed parsed events into the channel.
async fn pump_stream(
    response: reqwest::Response,
    tx: mpsc::Sender<Result<StreamEvent, ProviderError>>,
    provider: String,
) {
    let mut byte_stream = response.bytes_stream();
    let mut buffer = String::new();
    let mut state = RoundState::default();

    while let Some(chunk) = byte_stream.next().await {
        let bytes = match chunk {
            Ok(b) => b,
            Err(e) => {
                let _ = tx.send(Err(ProviderError::Stream(e.to_string()))).await;
                return;
            }
        };

        buffer.push_str(&String::from_utf8_lossy(&bytes));

        while let Some(line_end) = buffer.find('\n') {
            let line: String = buffer.drain(..=line_end).collect();
            match handle_line(line.trim(), &mut state, &tx, &provider).await {
                LineOutcome::Continue => {}
                LineOutcome::Finished | LineOutcome::Closed => return,
            }
        }
    }

    // Connection closed without a [DONE] sentinel. Process any trailing
    // partial line, then close the round out normally.
    if !buffer.trim().is_empty() {
        match handle_line(buffer.trim(), &mut state, &tx, &provider).await {
            LineOutcome::Finished | LineOutcome::Closed => return,
            LineOutcome::Continue => {}
        }
    }
    state.close(&tx).await;
}

/// What processing one SSE line means for the pump loop.
enum LineOutcome {
    /// Keep reading.
    Continue,
    /// The round was closed out; stop reading.
    Finished,
    /// The receiver went away; stop reading.
    Closed,
}

/// Per-round accumulation: tool-call fragments and the finish reason.
#[derive(Default)]
struct RoundState {
    assembler: ToolCallAssembler,
    finish_reason: Option<String>,
}

impl RoundState {
    /// Emit the assembled tool calls, then the `Done` marker.
    async fn close(&mut self, tx: &mpsc::Sender<Result<StreamEvent, ProviderError>>) {
        for call in self.assembler.drain() {
            if tx.send(Ok(StreamEvent::ToolCall(call))).await.is_err() {
                return;
            }
        }
        let _ = tx
            .send(Ok(StreamEvent::Done {
                finish_reason: self.finish_reason.take(),
            }))
            .await;
    }
}

async fn handle_line(
    line: &str,
    state: &mut RoundState,
    tx: &mpsc::Sender<Result<StreamEvent, ProviderError>>,
    provider: &str,
) -> LineOutcome {
    // Skip blank lines and SSE comments.
    if line.is_empty() || line.starts_with(':') {
        return LineOutcome::Continue;
    }
    let Some(data) = line.strip_prefix("data:") else {
        return LineOutcome::Continue;
    };
    let data = data.trim();

    if data == "[DONE]" {
        state.close(tx).await;
        return LineOutcome::Finished;
    }

    let chunk: ChatCompletionChunk = match serde_json::from_str(data) {
        Ok(c) => c,
        Err(e) => {
            warn!(provider = %provider, error = %e, "ignoring unparseable stream frame");
            return LineOutcome::Continue;
        }
    };

    if let Some(choice) = chunk.choices.into_iter().next() {
        if let Some(fragments) = choice.delta.tool_calls {
            for fragment in fragments {
                state.assembler.absorb(fragment);
            }
        }
        if let Some(text) = choice.delta.content {
            if !text.is_empty() && tx.send(Ok(StreamEvent::TextDelta(text))).await.is_err() {
                return LineOutcome::Closed;
            }
        }
        if let Some(reason) = choice.finish_reason {
            state.finish_reason = Some(reason);
        }
    }

    LineOutcome::Continue
}

// ─────────────────────────────────────────────
// Tool-call assembly
// ─────────────────────────────────────────────

/// Assembles tool-call fragments into complete calls.
///
/// The id and function name arrive on an index's first fragment; argument
/// JSON is concatenated across fragments in arrival order. Completed calls
/// are emitted in index order when the round closes.
#[derive(Default)]
struct ToolCallAssembler {
    partial: Vec<PartialCall>,
}

#[derive(Default)]
struct PartialCall {
    id: String,
    name: String,
    arguments: String,
}

impl ToolCallAssembler {
    fn absorb(&mut self, fragment: ToolCallDelta) {
        if fragment.index >= self.partial.len() {
            self.partial
                .resize_with(fragment.index + 1, PartialCall::default);
        }
        let slot = &mut self.partial[fragment.index];
        if let Some(id) = fragment.id {
            slot.id = id;
        }
        if let Some(function) = fragment.function {
            if let Some(name) = function.name {
                slot.name = name;
            }
            if let Some(arguments) = function.arguments {
                slot.arguments.push_str(&arguments);
            }
        }
    }

    /// Take the completed calls, in index order. Unnamed slots are dropped.
    fn drain(&mut self) -> Vec<ToolCall> {
        std::mem::take(&mut self.partial)
            .into_iter()
            .filter(|p| !p.name.is_empty())
            .map(|p| ToolCall::new(p.id, p.name, p.arguments))
            .collect()
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
