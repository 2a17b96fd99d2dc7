//! Config schema plus the loading and override pipeline.
//!
//! # Usage
//! ```no_run
//! use oxizero_core::config;
//!
//! let cfg = config::load_config(None);
//! println!("Model: {}", cfg.agent.model);
//! ```

pub mod loader;
pub mod schema;

// Re-exports
pub use loader::{get_config_path, load_config};
pub use schema::Config;
