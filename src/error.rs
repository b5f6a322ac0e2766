//! Non-fatal failure types.
//!
//! None of these ever stop the app: feed errors end in the controller as
//! "list retained + toast", clipboard errors end as a failure toast.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FeedError {
    /// Upstream unreachable (DNS, connect, reset, TLS).
    #[error("network failure: {0}")]
    Network(String),

    #[error("request timed out after {ms}ms")]
    Timeout { ms: u64 },

    /// Upstream answered with a non-2xx status.
    #[error("upstream returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// Body was not a JSON array of blocks.
    #[error("malformed response: {0}")]
    Parse(String),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClipboardError {
    #[error("clipboard unavailable: {0}")]
    Unavailable(String),

    #[error("clipboard rejected contents: {0}")]
    Rejected(String),
}
