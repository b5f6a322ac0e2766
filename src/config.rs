use anyhow::{anyhow, Result};
use clap::Parser;

use crate::feed::LIMIT_CHOICES;
use crate::feed_client::ClientConfig;
use crate::theme::Theme;

pub const DEFAULT_BASE_URL: &str = "https://api.solanabeach.io/v1";

/// solx - Solana recent blocks viewer
///
/// Terminal UI listing the latest blocks from a block explorer API.
/// Configuration priority: CLI args > Environment variables > Defaults
#[derive(Parser, Debug)]
#[command(name = "solx")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Solana recent blocks viewer", long_about = None)]
pub struct CliArgs {
    /// Explorer API base URL (without the trailing /latest-blocks)
    #[arg(long, env = "SOLX_BASE_URL")]
    pub base_url: Option<String>,

    /// Bearer token for the explorer API
    #[arg(long, env = "SOLX_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Request timeout in milliseconds (1000-60000)
    #[arg(long, env = "SOLX_TIMEOUT_MS")]
    pub timeout_ms: Option<u64>,

    /// Blocks per page (5, 10, 15, 20 or 25)
    #[arg(short, long, env = "SOLX_LIMIT")]
    pub limit: Option<u32>,

    /// Initial search query (block number or hash substring)
    #[arg(long, env = "SOLX_SEARCH")]
    pub search: Option<String>,

    /// Target UI rendering FPS (1-120)
    #[arg(long, env = "SOLX_RENDER_FPS")]
    pub render_fps: Option<u32>,

    /// Color theme: nord, amber-crt, green-phosphor
    #[arg(long, env = "SOLX_THEME", value_parser = clap::value_parser!(Theme))]
    pub theme: Option<Theme>,

    /// File that receives log output (the terminal is owned by the UI)
    #[arg(long, env = "SOLX_LOG_FILE")]
    pub log_file: Option<String>,
}

#[derive(Clone, Debug)]
pub struct Config {
    pub base_url: String,
    pub api_key: Option<String>,
    pub timeout_ms: u64,
    pub limit: u32,
    pub search: String,
    pub render_fps: u32,
    pub theme: Theme,
    pub log_file: String,
}

/// Validate that a value is within a given range (inclusive)
fn validate_in_range<T>(val: T, min: T, max: T, name: &str) -> Result<T>
where
    T: PartialOrd + std::fmt::Display + Copy,
{
    if val < min || val > max {
        Err(anyhow!("{name} must be in range [{min}, {max}], got {val}"))
    } else {
        Ok(val)
    }
}

/// Validate URL format (basic check)
fn validate_url(url: &str, name: &str) -> Result<()> {
    if url.is_empty() {
        return Err(anyhow!("{name} cannot be empty"));
    }
    if url.starts_with("http://") || url.starts_with("https://") {
        Ok(())
    } else {
        Err(anyhow!("{name} must start with http:// or https://"))
    }
}

fn validate_limit(limit: u32) -> Result<u32> {
    if LIMIT_CHOICES.contains(&limit) {
        Ok(limit)
    } else {
        Err(anyhow!(
            "SOLX_LIMIT must be one of {LIMIT_CHOICES:?}, got {limit}"
        ))
    }
}

/// Load configuration from CLI args and environment variables
pub fn load() -> Result<Config> {
    Config::from_args(CliArgs::parse())
}

impl Config {
    pub fn from_args(args: CliArgs) -> Result<Config> {
        let base_url = args
            .base_url
            .map(|u| u.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        validate_url(&base_url, "SOLX_BASE_URL")?;

        let timeout_ms = validate_in_range(args.timeout_ms.unwrap_or(8000), 1000, 60000, "SOLX_TIMEOUT_MS")?;
        let limit = validate_limit(args.limit.unwrap_or(10))?;
        let render_fps = validate_in_range(args.render_fps.unwrap_or(30), 1, 120, "SOLX_RENDER_FPS")?;

        Ok(Config {
            base_url,
            api_key: args.api_key.filter(|k| !k.trim().is_empty()),
            timeout_ms,
            limit,
            search: args.search.unwrap_or_default(),
            render_fps,
            theme: args.theme.unwrap_or_default(),
            log_file: args.log_file.unwrap_or_else(|| "solx.log".to_string()),
        })
    }

    /// The subset BlockFeedClient is constructed from.
    pub fn client(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.base_url.clone(),
            api_key: self.api_key.clone(),
            timeout_ms: self.timeout_ms,
        }
    }

    pub fn log_summary(&self) {
        log::info!("solx configuration:");
        log::info!("  Base URL: {}", self.base_url);
        log::info!("  Timeout: {}ms", self.timeout_ms);
        log::info!("  Page size: {}", self.limit);
        log::info!("  Render FPS: {}", self.render_fps);
        log::info!("  Theme: {}", self.theme);
        if self.api_key.is_some() {
            log::info!("  API key: configured");
        } else {
            log::warn!("  API key: not set, requests are sent without Authorization");
        }
    }
}
