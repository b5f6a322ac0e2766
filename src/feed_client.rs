//! HTTP client for the explorer's `latest-blocks` endpoint.
//!
//! `GET {base}/latest-blocks?limit=N[&cursor=C]` with a bearer token. The
//! body must be a JSON array of blocks; each element is decoded into the
//! strict [`Block`] schema and malformed elements are dropped here so
//! nothing untyped travels further into the app.

use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;

use crate::error::FeedError;
use crate::types::Block;

/// Connection settings handed to [`BlockFeedClient`] at construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub timeout_ms: u64,
}

/// Source of block pages. Implemented over HTTP by [`BlockFeedClient`];
/// tests plug in canned feeds.
#[async_trait]
pub trait BlockFeed: Send + Sync {
    /// Newest-first page of at most `limit` blocks, continuing past `cursor`.
    async fn fetch_page(&self, limit: u32, cursor: Option<u64>) -> Result<Vec<Block>, FeedError>;
}

pub struct BlockFeedClient {
    http: reqwest::Client,
    cfg: ClientConfig,
}

/// Build the request URL for one page.
pub fn latest_blocks_url(base_url: &str, limit: u32, cursor: Option<u64>) -> String {
    let base = base_url.trim_end_matches('/');
    match cursor {
        Some(c) => format!("{base}/latest-blocks?limit={limit}&cursor={c}"),
        None => format!("{base}/latest-blocks?limit={limit}"),
    }
}

/// Cursor for the page after `page`: the parent slot of its last block.
pub fn next_cursor(page: &[Block]) -> Option<u64> {
    page.last().map(|b| b.parent_slot)
}

/// Drop anything past the first `limit` blocks. Returns how many were dropped.
pub fn clamp_to_limit(blocks: &mut Vec<Block>, limit: u32) -> usize {
    let limit = limit as usize;
    let extra = blocks.len().saturating_sub(limit);
    blocks.truncate(limit);
    extra
}

/// Decode a response body into blocks, dropping elements that do not fit
/// the schema. A non-array body, or a non-empty array with no usable
/// element, is a parse failure.
pub fn parse_blocks(body: &str) -> Result<Vec<Block>, FeedError> {
    let value: Value =
        serde_json::from_str(body).map_err(|e| FeedError::Parse(format!("invalid JSON: {e}")))?;
    let items = match value {
        Value::Array(items) => items,
        other => {
            return Err(FeedError::Parse(format!(
                "expected an array of blocks, got {}",
                json_kind(&other)
            )))
        }
    };

    let total = items.len();
    let mut blocks = Vec::with_capacity(total);
    for (idx, item) in items.into_iter().enumerate() {
        match serde_json::from_value::<Block>(item) {
            Ok(block) => match block.validate() {
                Ok(()) => blocks.push(block),
                Err(reason) => log::warn!("[feed_client] dropping record {idx}: {reason}"),
            },
            Err(e) => log::warn!("[feed_client] dropping malformed record {idx}: {e}"),
        }
    }

    if total > 0 && blocks.is_empty() {
        return Err(FeedError::Parse(format!("none of {total} records matched the block schema")));
    }
    Ok(blocks)
}

fn json_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

impl BlockFeedClient {
    pub fn new(cfg: ClientConfig) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .pool_max_idle_per_host(4)
            .tcp_nodelay(true)
            .build()?;
        Ok(Self { http, cfg })
    }

    fn classify(&self, e: reqwest::Error) -> FeedError {
        if e.is_timeout() {
            FeedError::Timeout { ms: self.cfg.timeout_ms }
        } else {
            FeedError::Network(e.to_string())
        }
    }
}

#[async_trait]
impl BlockFeed for BlockFeedClient {
    async fn fetch_page(&self, limit: u32, cursor: Option<u64>) -> Result<Vec<Block>, FeedError> {
        let url = latest_blocks_url(&self.cfg.base_url, limit, cursor);
        log::info!("[feed_client] GET {url}");

        let mut request = self
            .http
            .get(&url)
            .header("Accept", "application/json")
            .timeout(Duration::from_millis(self.cfg.timeout_ms));

        if let Some(key) = &self.cfg.api_key {
            request = request.header("Authorization", format!("Bearer {key}"));
        } else {
            log::debug!("[feed_client] no API key configured");
        }

        let response = request.send().await.map_err(|e| self.classify(e))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| self.classify(e))?;

        if !status.is_success() {
            // Upstream error bodies look like {"err": "..."}; keep them short in the log
            let detail = serde_json::from_str::<Value>(&body)
                .ok()
                .and_then(|v| v.get("err").and_then(|e| e.as_str()).map(str::to_string))
                .unwrap_or_else(|| body.chars().take(200).collect());
            return Err(FeedError::Status { status: status.as_u16(), body: detail });
        }

        let mut blocks = parse_blocks(&body)?;
        let extra = clamp_to_limit(&mut blocks, limit);
        if extra > 0 {
            log::warn!("[feed_client] upstream sent {extra} blocks past limit {limit}, dropped");
        }
        log::info!("[feed_client] received {} blocks", blocks.len());
        Ok(blocks)
    }
}
