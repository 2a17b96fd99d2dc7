//! Agent core for OxiZero.
//!
//! # Architecture
//!
//! - [`driver::ConversationDriver`] — runs one user turn through the
//!   streaming model ↔ tool loop
//! - [`tools`] — the capability set (code, shell, memory, delegation, web)
//!   plus the registry that dispatches model calls by name
//! - [`prompt`] — the standing system instructions

pub mod driver;
pub mod prompt;
pub mod tools;

// Public surface
pub use driver::{ConversationDriver, TurnError};
pub use prompt::SYSTEM_INSTRUCTIONS;
pub use tools::{build_registry, Tool, ToolRegistry};
