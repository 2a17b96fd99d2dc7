//! OxiZero Core — shared types, memory, execution context, and config.
//!
//! Modules:
//! - **types**: chat wire format, streamed events, transcript, cancellation
//! - **memory**: append-only in-memory store for memories and solutions
//! - **context**: per-agent execution context and the delegation hierarchy
//! - **config**: schema + loader for `~/.oxizero/config.json` and env vars

pub mod config;
pub mod context;
pub mod memory;
pub mod types;
pub mod utils;

pub use config::Config;
pub use context::{ExecutionContext, LogEntry, LogLevel};
pub use memory::{MemoryRecord, MemoryStore, SolutionRecord};
pub use types::{
    CancelToken, ConversationTranscript, Message, StreamEvent, ToolCall, ToolDefinition,
    ToolInvocationResult,
};
