//! Core types for OxiZero — chat wire format, streamed events, transcript.
//!
//! The wire types model the OpenAI chat completions API as spoken by the
//! streaming endpoint: typed messages and tool schemas going out, incremental
//! chunk frames coming back. On top of those sit the runtime's own small
//! domain types: the append-only conversation transcript, the per-call tool
//! result, and the cooperative cancellation token.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

// ─────────────────────────────────────────────
// Chat messages
// ─────────────────────────────────────────────

/// One message in the OpenAI chat format.
///
/// Each variant maps to a `role` field value on the wire.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "role")]
pub enum Message {
    #[serde(rename = "system")]
    System { content: String },

    #[serde(rename = "user")]
    User { content: String },

    #[serde(rename = "assistant")]
    Assistant {
        #[serde(skip_serializing_if = "Option::is_none")]
        content: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        tool_calls: Option<Vec<ToolCall>>,
    },

    #[serde(rename = "tool")]
    Tool {
        content: String,
        tool_call_id: String,
    },
}

impl Message {
    /// System message setting the agent's instructions.
    pub fn system(content: impl Into<String>) -> Self {
        Message::System {
            content: content.into(),
        }
    }

    /// User message with the given content.
    pub fn user(content: impl Into<String>) -> Self {
        Message::User {
            content: content.into(),
        }
    }

    /// Assistant message carrying plain text.
    pub fn assistant(content: impl Into<String>) -> Self {
        Message::Assistant {
            content: Some(content.into()),
            tool_calls: None,
        }
    }

    /// Assistant message carrying tool calls, plus any text the model
    /// streamed before requesting them.
    pub fn assistant_with_calls(content: Option<String>, tool_calls: Vec<ToolCall>) -> Self {
        Message::Assistant {
            content,
            tool_calls: Some(tool_calls),
        }
    }

    /// Tool output tied back to the originating call id.
    pub fn tool_result(tool_call_id: impl Into<String>, content: impl Into<String>) -> Self {
        Message::Tool {
            content: content.into(),
            tool_call_id: tool_call_id.into(),
        }
    }
}

// ─────────────────────────────────────────────
// Tool calls
// ─────────────────────────────────────────────

/// Assistant-requested invocation of a named function.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ToolCall {
    /// Provider-assigned ID; tool results are matched back through it.
    pub id: String,
    /// Only "function" exists in the current API.
    #[serde(rename = "type")]
    pub call_type: String,
    /// The function to call.
    pub function: FunctionCall,
}

impl ToolCall {
    /// Tool call with explicit id, name, and raw JSON arguments.
    pub fn new(id: impl Into<String>, name: impl Into<String>, arguments: impl Into<String>) -> Self {
        ToolCall {
            id: id.into(),
            call_type: "function".to_string(),
            function: FunctionCall {
                name: name.into(),
                arguments: arguments.into(),
            },
        }
    }
}

/// Name plus raw JSON arguments inside a tool call.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct FunctionCall {
    /// Target function name.
    pub name: String,
    /// JSON-encoded arguments string.
    pub arguments: String,
}

// ─────────────────────────────────────────────
// Tool Definitions (for model requests)
// ─────────────────────────────────────────────

/// Definition of a tool, sent to the model so it knows what tools exist.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ToolDefinition {
    /// Fixed to "function".
    #[serde(rename = "type")]
    pub tool_type: String,
    /// The function schema.
    pub function: FunctionDefinition,
}

/// Schema of a function tool.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct FunctionDefinition {
    pub name: String,
    pub description: String,
    pub parameters: serde_json::Value,
}

impl ToolDefinition {
    /// Definition wrapping a function name, description, and schema.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        parameters: serde_json::Value,
    ) -> Self {
        ToolDefinition {
            tool_type: "function".to_string(),
            function: FunctionDefinition {
                name: name.into(),
                description: description.into(),
                parameters,
            },
        }
    }
}

// ─────────────────────────────────────────────
// Request payloads
// ─────────────────────────────────────────────

/// Body of a chat-completion request in the OpenAI-compatible shape.
///
/// `stream` is always serialized; the runtime only speaks the streaming
/// variant of the protocol.
#[derive(Debug, Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<Message>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<ToolDefinition>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    pub stream: bool,
}

// ─────────────────────────────────────────────
// Streamed chunk frames (server-sent events payloads)
// ─────────────────────────────────────────────

/// One `data:` frame of a streamed chat completion.
#[derive(Debug, Deserialize)]
pub struct ChatCompletionChunk {
    pub choices: Vec<ChunkChoice>,
}

/// A single choice within a streamed chunk.
#[derive(Debug, Deserialize)]
pub struct ChunkChoice {
    pub delta: ChunkDelta,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// The incremental payload of a chunk: a text fragment, tool-call
/// fragments, or neither (role-only frames at stream start).
#[derive(Debug, Default, Deserialize)]
pub struct ChunkDelta {
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub tool_calls: Option<Vec<ToolCallDelta>>,
}

/// A fragment of a tool call, keyed by `index`.
///
/// The id and function name arrive on the first fragment for an index;
/// argument JSON arrives split across any number of later fragments and
/// must be concatenated in order.
#[derive(Debug, Deserialize)]
pub struct ToolCallDelta {
    pub index: usize,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub function: Option<FunctionDelta>,
}

/// Partial function payload within a tool-call fragment.
#[derive(Debug, Default, Deserialize)]
pub struct FunctionDelta {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub arguments: Option<String>,
}

// ─────────────────────────────────────────────
// Stream events (what the driver consumes)
// ─────────────────────────────────────────────

/// An event from one streamed model round, in arrival order.
///
/// Text deltas are forwarded the moment they arrive; assembled tool calls
/// and the end-of-turn marker are emitted once the stream closes them out.
#[derive(Clone, Debug, PartialEq)]
pub enum StreamEvent {
    /// An incremental fragment of assistant text.
    TextDelta(String),
    /// A fully assembled tool call request.
    ToolCall(ToolCall),
    /// The round is over; carries the reported finish reason, if any.
    Done { finish_reason: Option<String> },
}

// ─────────────────────────────────────────────
// Conversation transcript
// ─────────────────────────────────────────────

/// Role of a transcript entry. Alternation is conventional, not enforced.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One entry of the running conversation history.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct TranscriptEntry {
    pub role: Role,
    pub content: String,
}

/// Append-only conversation history for one session.
///
/// Entries are only ever pushed; a turn that fails or is cancelled leaves
/// the transcript exactly as it found it.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ConversationTranscript {
    entries: Vec<TranscriptEntry>,
}

impl ConversationTranscript {
    /// Create an empty transcript.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a user entry.
    pub fn push_user(&mut self, content: impl Into<String>) {
        self.entries.push(TranscriptEntry {
            role: Role::User,
            content: content.into(),
        });
    }

    /// Append an assistant entry.
    pub fn push_assistant(&mut self, content: impl Into<String>) {
        self.entries.push(TranscriptEntry {
            role: Role::Assistant,
            content: content.into(),
        });
    }

    /// All entries, oldest first.
    pub fn entries(&self) -> &[TranscriptEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Render the history as wire messages, oldest first.
    pub fn to_messages(&self) -> Vec<Message> {
        self.entries
            .iter()
            .map(|e| match e.role {
                Role::User => Message::user(&e.content),
                Role::Assistant => Message::assistant(&e.content),
            })
            .collect()
    }
}

// ─────────────────────────────────────────────
// Tool invocation result
// ─────────────────────────────────────────────

/// Outcome of one dispatched tool call. Produced per call, fed straight
/// back into the model round, never persisted.
#[derive(Clone, Debug, PartialEq)]
pub struct ToolInvocationResult {
    pub tool_name: String,
    pub output: String,
    pub is_error: bool,
}

impl ToolInvocationResult {
    /// A successful result.
    pub fn ok(tool_name: impl Into<String>, output: impl Into<String>) -> Self {
        ToolInvocationResult {
            tool_name: tool_name.into(),
            output: output.into(),
            is_error: false,
        }
    }

    /// An error result. The output text is what the model sees.
    pub fn error(tool_name: impl Into<String>, output: impl Into<String>) -> Self {
        ToolInvocationResult {
            tool_name: tool_name.into(),
            output: output.into(),
            is_error: true,
        }
    }
}

// ─────────────────────────────────────────────
// Cancellation token
// ─────────────────────────────────────────────

/// Cooperative cancellation flag, checked by the driver between stream
/// events. Cloning shares the flag.
#[derive(Clone, Debug, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    /// Create a token in the not-cancelled state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. Idempotent.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    // ── Message serialization ──

    #[test]
    fn test_system_message_serialization() {
        let msg = Message::system("You are Agent Zero.");
        let json = serde_json::to_value(&msg).unwrap();

        assert_eq!(json["role"], "system");
        assert_eq!(json["content"], "You are Agent Zero.");
    }

    #[test]
    fn test_user_message_serialization() {
        let msg = Message::user("Hello, world!");
        let json = serde_json::to_value(&msg).unwrap();

        assert_eq!(json["role"], "user");
        assert_eq!(json["content"], "Hello, world!");
    }

    #[test]
    fn test_assistant_text_message_serialization() {
        let msg = Message::assistant("The answer is 42.");
        let json = serde_json::to_value(&msg).unwrap();

        assert_eq!(json["role"], "assistant");
        assert_eq!(json["content"], "The answer is 42.");
        // tool_calls should be absent (not null)
        assert!(json.get("tool_calls").is_none());
    }

    #[test]
    fn test_assistant_calls_only_serialization() {
        let tool_calls = vec![ToolCall::new(
            "call_123",
            "web_search",
            r#"{"query": "Rust programming"}"#,
        )];
        let msg = Message::assistant_with_calls(None, tool_calls);
        let json = serde_json::to_value(&msg).unwrap();

        assert_eq!(json["role"], "assistant");
        assert!(json.get("content").is_none());

        let calls = json["tool_calls"].as_array().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0]["id"], "call_123");
        assert_eq!(calls[0]["type"], "function");
        assert_eq!(calls[0]["function"]["name"], "web_search");
    }

    #[test]
    fn test_assistant_text_with_calls_serialization() {
        let tool_calls = vec![ToolCall::new("call_9", "execute_code", "{}")];
        let msg = Message::assistant_with_calls(Some("Checking...".into()), tool_calls);
        let json = serde_json::to_value(&msg).unwrap();

        assert_eq!(json["role"], "assistant");
        assert_eq!(json["content"], "Checking...");
        assert_eq!(json["tool_calls"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_tool_result_serialization() {
        let msg = Message::tool_result("call_123", "42");
        let json = serde_json::to_value(&msg).unwrap();

        assert_eq!(json["role"], "tool");
        assert_eq!(json["content"], "42");
        assert_eq!(json["tool_call_id"], "call_123");
    }

    #[test]
    fn test_message_round_trip() {
        let messages = vec![
            Message::system("You are Agent Zero."),
            Message::user("What is 2+2?"),
            Message::assistant("The answer is 4."),
            Message::tool_result("call_1", "done"),
        ];

        let json_str = serde_json::to_string(&messages).unwrap();
        let deserialized: Vec<Message> = serde_json::from_str(&json_str).unwrap();

        assert_eq!(messages, deserialized);
    }

    // ── ChatCompletionRequest ──

    #[test]
    fn test_chat_request_serialization() {
        let request = ChatCompletionRequest {
            model: "claude-opus-4-5".to_string(),
            messages: vec![Message::system("You are Agent Zero."), Message::user("Hello")],
            tools: None,
            max_tokens: Some(8192),
            temperature: Some(0.7),
            stream: true,
        };

        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["model"], "claude-opus-4-5");
        assert_eq!(json["messages"].as_array().unwrap().len(), 2);
        assert_eq!(json["max_tokens"], 8192);
        assert_eq!(json["stream"], true);
        // tools should not appear when None
        assert!(json.get("tools").is_none());
    }

    #[test]
    fn test_chat_request_with_tools() {
        let tool_def = ToolDefinition::new(
            "web_search",
            "Search the web",
            json!({"type": "object", "properties": {"query": {"type": "string"}}}),
        );

        let request = ChatCompletionRequest {
            model: "gpt-5.2".to_string(),
            messages: vec![Message::user("Search for Rust")],
            tools: Some(vec![tool_def]),
            max_tokens: None,
            temperature: None,
            stream: true,
        };

        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["tools"][0]["type"], "function");
        assert_eq!(json["tools"][0]["function"]["name"], "web_search");
        assert!(json.get("max_tokens").is_none());
        assert!(json.get("temperature").is_none());
    }

    // ── Streamed chunk frames ──

    #[test]
    fn test_chunk_text_delta_deserialization() {
        let frame = json!({
            "id": "chatcmpl-abc",
            "choices": [{
                "delta": { "content": "Hel" },
                "finish_reason": null
            }]
        });

        let chunk: ChatCompletionChunk = serde_json::from_value(frame).unwrap();
        assert_eq!(chunk.choices[0].delta.content.as_deref(), Some("Hel"));
        assert!(chunk.choices[0].finish_reason.is_none());
    }

    #[test]
    fn test_chunk_tool_call_fragment_deserialization() {
        let frame = json!({
            "choices": [{
                "delta": {
                    "tool_calls": [{
                        "index": 0,
                        "id": "call_42",
                        "function": { "name": "execute_code", "arguments": "{\"lang" }
                    }]
                },
                "finish_reason": null
            }]
        });

        let chunk: ChatCompletionChunk = serde_json::from_value(frame).unwrap();
        let fragments = chunk.choices[0].delta.tool_calls.as_ref().unwrap();
        assert_eq!(fragments[0].index, 0);
        assert_eq!(fragments[0].id.as_deref(), Some("call_42"));
        let function = fragments[0].function.as_ref().unwrap();
        assert_eq!(function.name.as_deref(), Some("execute_code"));
        assert_eq!(function.arguments.as_deref(), Some("{\"lang"));
    }

    #[test]
    fn test_chunk_continuation_fragment_has_no_id() {
        let frame = json!({
            "choices": [{
                "delta": {
                    "tool_calls": [{
                        "index": 0,
                        "function": { "arguments": "uage\": \"python\"}" }
                    }]
                },
                "finish_reason": null
            }]
        });

        let chunk: ChatCompletionChunk = serde_json::from_value(frame).unwrap();
        let fragments = chunk.choices[0].delta.tool_calls.as_ref().unwrap();
        assert!(fragments[0].id.is_none());
        assert!(fragments[0].function.as_ref().unwrap().name.is_none());
    }

    #[test]
    fn test_chunk_finish_frame_deserialization() {
        let frame = json!({
            "choices": [{
                "delta": {},
                "finish_reason": "stop"
            }]
        });

        let chunk: ChatCompletionChunk = serde_json::from_value(frame).unwrap();
        assert!(chunk.choices[0].delta.content.is_none());
        assert_eq!(chunk.choices[0].finish_reason.as_deref(), Some("stop"));
    }

    // ── Transcript ──

    #[test]
    fn test_transcript_append_order() {
        let mut transcript = ConversationTranscript::new();
        transcript.push_user("first");
        transcript.push_assistant("second");
        transcript.push_user("third");

        let entries = transcript.entries();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].role, Role::User);
        assert_eq!(entries[0].content, "first");
        assert_eq!(entries[1].role, Role::Assistant);
        assert_eq!(entries[2].content, "third");
    }

    #[test]
    fn test_transcript_to_messages() {
        let mut transcript = ConversationTranscript::new();
        transcript.push_user("Hi");
        transcript.push_assistant("Hello!");

        let messages = transcript.to_messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0], Message::user("Hi"));
        assert_eq!(messages[1], Message::assistant("Hello!"));
    }

    #[test]
    fn test_transcript_role_serializes_lowercase() {
        let mut transcript = ConversationTranscript::new();
        transcript.push_user("Hi");

        let json = serde_json::to_value(transcript.entries()).unwrap();
        assert_eq!(json[0]["role"], "user");
    }

    // ── ToolInvocationResult ──

    #[test]
    fn test_tool_result_constructors() {
        let ok = ToolInvocationResult::ok("execute_code", "42");
        assert!(!ok.is_error);
        assert_eq!(ok.output, "42");

        let err = ToolInvocationResult::error("execute_code", "Error: Code execution timeout");
        assert!(err.is_error);
        assert_eq!(err.tool_name, "execute_code");
    }

    // ── CancelToken ──

    #[test]
    fn test_cancel_token_shared_between_clones() {
        let token = CancelToken::new();
        let clone = token.clone();
        assert!(!token.is_cancelled());

        clone.cancel();
        assert!(token.is_cancelled());
        assert!(clone.is_cancelled());
    }
}
