//! solx - Solana recent blocks viewer
//!
//! Core of a terminal explorer that lists the latest blocks served by a
//! block explorer HTTP API and shows the details of a selected block.
//!
//! ## Architecture
//!
//! Data flows one way:
//! `FeedController` issues a [`types::PageRequest`] → the fetch worker
//! (`feed_source`) runs it through a [`feed_client::BlockFeed`] → the
//! result comes back as an [`types::AppEvent`] → the controller appends
//! it, the search filter narrows the view and `ui` renders rows. Picking
//! a row hands a copy of that block to the detail screen.
//!
//! The terminal binary needs the `native` feature (default):
//! ```bash
//! cargo run --features native -- --api-key <token>
//! ```

// Core modules (no terminal or clipboard backend needed)
pub mod config;
pub mod error;
pub mod types;
pub mod util_text;
pub mod theme;

pub mod filter;
pub mod feed_client;
pub mod feed;
pub mod feed_source;
pub mod detail;

// App state and rendering (any ratatui backend)
pub mod app;
pub mod ui;

// Copy functionality
pub mod copy_api;
pub mod copy_payload;

// Clipboard capability (system clipboard with the native feature)
pub mod platform;

// Re-export commonly used types
pub use app::{App, InputMode, Screen};
pub use config::Config;
pub use error::{ClipboardError, FeedError};
pub use feed::{FeedController, PageOutcome};
pub use feed_client::{BlockFeed, BlockFeedClient, ClientConfig};
pub use types::{AppEvent, Block, PageRequest};
