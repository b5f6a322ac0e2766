//! Shared "press `c` to copy" implementation.
//!
//! Decides *what* to copy for the current screen and selection; the app
//! does the clipboard write and shows the toast.
//!
//! - **Feed**: full hash of the selected block
//! - **Detail**: full value of the selected field (`c`), or the whole
//!   block as pretty JSON (`C`)

use crate::app::{App, Screen};
use crate::copy_payload::{block_json, pretty_no_newline};
use crate::detail::present;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CopyTarget {
    /// Selected field on the detail screen, or selected row's hash on the feed.
    Selection,
    /// Entire block as JSON.
    BlockJson,
}

/// The text that would be copied, if there is anything to copy.
pub fn current_text(app: &App, target: CopyTarget) -> Option<String> {
    match (app.screen(), target) {
        (Screen::Feed, CopyTarget::Selection) => app.selected_block().map(|b| b.block_hash.clone()),
        (Screen::Feed, CopyTarget::BlockJson) => {
            app.selected_block().map(|b| pretty_no_newline(&block_json(b)))
        }
        (Screen::Detail, CopyTarget::Selection) => {
            let block = app.detail_block()?;
            let fields = present(block, 0);
            fields.get(app.detail_selection())?.copy.clone()
        }
        (Screen::Detail, CopyTarget::BlockJson) => {
            app.detail_block().map(|b| pretty_no_newline(&block_json(b)))
        }
    }
}
