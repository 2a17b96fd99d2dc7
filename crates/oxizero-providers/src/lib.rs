//! Model provider layer for OxiZero.
//!
//! # Architecture
//!
//! - [`traits::ModelProvider`] — trait the agent drives a model through
//! - [`http_provider::HttpProvider`] — streaming OpenAI-compatible HTTP client
//! - [`registry`] — model shortcut table (`claude`, `gpt`, `gemini`)
//! - [`error::ProviderError`] — failure modes of one streamed round

pub mod error;
pub mod http_provider;
pub mod registry;
pub mod traits;

// Re-exports
pub use error::ProviderError;
pub use http_provider::HttpProvider;
pub use registry::{resolve_shortcut, split_model_args, MODEL_SHORTCUTS};
pub use traits::{ModelProvider, RequestConfig};
