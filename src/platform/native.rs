//! Native clipboard backed by copypasta

use copypasta::{ClipboardContext, ClipboardProvider};

use super::Clipboard;
use crate::error::ClipboardError;

pub struct SystemClipboard {
    ctx: ClipboardContext,
}

impl SystemClipboard {
    pub fn new() -> Result<Self, ClipboardError> {
        ClipboardContext::new()
            .map(|ctx| Self { ctx })
            .map_err(|e| ClipboardError::Unavailable(e.to_string()))
    }
}

impl Clipboard for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.ctx
            .set_contents(text.to_string())
            .map_err(|e| ClipboardError::Rejected(e.to_string()))
    }
}
