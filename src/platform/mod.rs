//! Platform capabilities injected into the app (clipboard).

use crate::error::ClipboardError;

#[cfg(feature = "native")]
mod native;
#[cfg(feature = "native")]
pub use native::SystemClipboard;

/// Write-only clipboard. Fire-and-forget from the app's point of view:
/// the result only decides which toast is shown.
pub trait Clipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// Clipboard that refuses every write; used when no system clipboard exists.
#[derive(Debug, Default)]
pub struct NoClipboard;

impl Clipboard for NoClipboard {
    fn set_text(&mut self, _text: &str) -> Result<(), ClipboardError> {
        Err(ClipboardError::Unavailable("no clipboard on this platform".into()))
    }
}
