//! Configuration schema.
//!
//! Hierarchy: `Config` → `AgentConfig`, `ProviderConfig`, `ToolsConfig`.
//!
//! On-disk JSON keys are camelCase; the field names here are snake_case.
//! `#[serde(rename_all = "camelCase")]` handles the conversion.
//!
//! The model API key is deliberately not part of the schema: it comes from
//! the `ANTHROPIC_API_KEY` environment variable only.

use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────
// Top-level config
// ─────────────────────────────────────────────

/// Root configuration — loaded from `~/.oxizero/config.json` + env vars.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    pub agent: AgentConfig,
    pub provider: ProviderConfig,
    pub tools: ToolsConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            agent: AgentConfig::default(),
            provider: ProviderConfig::default(),
            tools: ToolsConfig::default(),
        }
    }
}

// ─────────────────────────────────────────────
// Agent
// ─────────────────────────────────────────────

/// Settings for the conversation driver.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AgentConfig {
    /// Default model identifier.
    pub model: String,
    /// Token generation cap per response.
    pub max_tokens: u32,
    /// Sampling temperature, 0.0 to 2.0.
    pub temperature: f64,
    /// Maximum model/tool round-trips per turn before returning partial text.
    pub max_turn_rounds: u32,
    /// Wall-clock timeout in seconds for subprocess-backed tools.
    pub tool_timeout_secs: u64,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            model: "claude-opus-4-5".to_string(),
            max_tokens: 8192,
            temperature: 0.7,
            max_turn_rounds: 50,
            tool_timeout_secs: 30,
        }
    }
}

// ─────────────────────────────────────────────
// Provider
// ─────────────────────────────────────────────

/// Model endpoint settings. Credentials live in the environment, not here.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProviderConfig {
    /// Base URL of the OpenAI-compatible chat completions API.
    pub api_base: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_base: "https://api.anthropic.com/v1".to_string(),
        }
    }
}

// ─────────────────────────────────────────────
// Tools
// ─────────────────────────────────────────────

/// Tool configuration.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ToolsConfig {
    /// Web search configuration.
    #[serde(default)]
    pub web: WebSearchConfig,
}

/// Web search configuration (Brave API).
///
/// The API key falls back to the `BRAVE_API_KEY` env var when empty.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WebSearchConfig {
    #[serde(default)]
    pub api_key: String,
    /// Upper bound on returned search results.
    pub max_results: u32,
}

impl Default for WebSearchConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            max_results: 5,
        }
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
