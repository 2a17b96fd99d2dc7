//! Config loader — reads `~/.oxizero/config.json` and merges env vars.
//!
//! # Loading precedence
//! 1. Built-in defaults (`Config::default()`)
//! 2. JSON file at `~/.oxizero/config.json`
//! 3. Environment variables `OXIZERO_<SECTION>__<FIELD>` (override JSON)

use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use super::schema::Config;

/// Default location of the config file.
pub fn get_config_path() -> PathBuf {
    crate::utils::get_data_path().join("config.json")
}

/// Load config from `path` (or the default location), then apply env vars.
///
/// Falls back to `Config::default()` if the file doesn't exist or can't be
/// parsed.
pub fn load_config(path: Option<&Path>) -> Config {
    let config_path = path.map(PathBuf::from).unwrap_or_else(get_config_path);
    load_config_from_path(&config_path)
}

/// Load config from one explicit file.
fn load_config_from_path(path: &Path) -> Config {
    if !path.exists() {
        info!("No config file at {}, using built-in defaults", path.display());
        return apply_env_overrides(Config::default());
    }

    debug!("Loading config from {}", path.display());

    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            warn!("Could not read config file {}: {}", path.display(), e);
            return apply_env_overrides(Config::default());
        }
    };

    let config: Config = match serde_json::from_str(&content) {
        Ok(c) => c,
        Err(e) => {
            warn!("Failed to parse config JSON: {}", e);
            return apply_env_overrides(Config::default());
        }
    };

    apply_env_overrides(config)
}

/// Layer `OXIZERO_*` env var overrides onto a loaded config.
///
/// Env var format: `OXIZERO_<SECTION>__<FIELD>` (double underscore as
/// delimiter).
///
/// Supported overrides:
/// - `OXIZERO_AGENT__MODEL` → `agent.model`
/// - `OXIZERO_AGENT__MAX_TOKENS` → `agent.max_tokens`
/// - `OXIZERO_AGENT__TEMPERATURE` → `agent.temperature`
/// - `OXIZERO_AGENT__MAX_TURN_ROUNDS` → `agent.max_turn_rounds`
/// - `OXIZERO_AGENT__TOOL_TIMEOUT_SECS` → `agent.tool_timeout_secs`
/// - `OXIZERO_PROVIDER__API_BASE` → `provider.api_base`
fn apply_env_overrides(mut config: Config) -> Config {
    if let Ok(val) = std::env::var("OXIZERO_AGENT__MODEL") {
        config.agent.model = val;
    }
    if let Ok(val) = std::env::var("OXIZERO_AGENT__MAX_TOKENS") {
        if let Ok(n) = val.parse::<u32>() {
            config.agent.max_tokens = n;
        }
    }
    if let Ok(val) = std::env::var("OXIZERO_AGENT__TEMPERATURE") {
        if let Ok(t) = val.parse::<f64>() {
            config.agent.temperature = t;
        }
    }
    if let Ok(val) = std::env::var("OXIZERO_AGENT__MAX_TURN_ROUNDS") {
        if let Ok(n) = val.parse::<u32>() {
            config.agent.max_turn_rounds = n;
        }
    }
    if let Ok(val) = std::env::var("OXIZERO_AGENT__TOOL_TIMEOUT_SECS") {
        if let Ok(n) = val.parse::<u64>() {
            config.agent.tool_timeout_secs = n;
        }
    }
    if let Ok(val) = std::env::var("OXIZERO_PROVIDER__API_BASE") {
        config.provider.api_base = val;
    }

    config
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
