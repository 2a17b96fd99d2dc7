//! Web search tool backed by the Brave Search API.

use std::collections::HashMap;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use tracing::debug;

use super::base::{optional_i64, require_string, Tool};

/// Identifies this client to the search API.
const USER_AGENT: &str = concat!("oxizero/", env!("CARGO_PKG_VERSION"));

/// Search endpoint.
const SEARCH_URL: &str = "https://api.search.brave.com/res/v1/web/search";

// ─────────────────────────────────────────────
// WebSearchTool
// ─────────────────────────────────────────────

/// Searches the web and returns a numbered result list.
pub struct WebSearchTool {
    api_key: Option<String>,
    max_results: usize,
    client: Client,
}

impl WebSearchTool {
    /// Build the tool with an optional key and a default result count.
    ///
    /// When `api_key` is `None`, the `BRAVE_API_KEY` env var is consulted
    /// at call time instead.
    pub fn new(api_key: Option<String>, max_results: usize) -> Self {
        Self {
            api_key,
            max_results,
            client: Client::builder()
                .user_agent(USER_AGENT)
                .build()
                .unwrap_or_default(),
        }
    }

    fn resolve_api_key(&self) -> Option<String> {
        match &self.api_key {
            Some(key) => Some(key.clone()),
            None => std::env::var("BRAVE_API_KEY").ok(),
        }
    }
}

#[async_trait]
impl Tool for WebSearchTool {
    fn name(&self) -> &str {
        "web_search"
    }

    fn description(&self) -> &str {
        "Search the web. Returns a numbered list of results with titles, URLs, and descriptions."
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "Search terms"
                },
                "count": {
                    "type": "integer",
                    "description": "Number of results (1-10)",
                    "minimum": 1,
                    "maximum": 10
                }
            },
            "required": ["query"]
        })
    }

    async fn execute(&self, params: HashMap<String, Value>) -> anyhow::Result<String> {
        let query = require_string(&params, "query")?;
        let count = optional_i64(&params, "count").unwrap_or(self.max_results as i64) as usize;
        let count = count.clamp(1, 10);

        let api_key = self.resolve_api_key().ok_or_else(|| {
            anyhow::anyhow!("No Brave API key configured (set BRAVE_API_KEY env var)")
        })?;

        debug!(%query, count, "running web search");

        let resp = self
            .client
            .get(SEARCH_URL)
            .header("X-Subscription-Token", &api_key)
            .query(&[("q", &query), ("count", &count.to_string())])
            .send()
            .await
            .map_err(|e| anyhow::anyhow!("search request failed: {e}"))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            anyhow::bail!("search API returned {status}: {body}");
        }

        let body: Value = resp
            .json()
            .await
            .map_err(|e| anyhow::anyhow!("malformed search response: {e}"))?;

        let results = body["web"]["results"]
            .as_array()
            .map(Vec::as_slice)
            .unwrap_or(&[]);

        if results.is_empty() {
            return Ok("No results found.".into());
        }

        let listing = results
            .iter()
            .enumerate()
            .map(|(i, hit)| {
                let title = hit["title"].as_str().unwrap_or("(untitled)");
                let url = hit["url"].as_str().unwrap_or("");
                let snippet = hit["description"].as_str().unwrap_or("");
                format!("{}. {}\n   {}\n   {}", i + 1, title, url, snippet)
            })
            .collect::<Vec<_>>()
            .join("\n\n");

        Ok(listing)
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
