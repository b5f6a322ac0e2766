use std::time::{Duration, Instant};

use tokio::sync::mpsc::UnboundedSender;

use crate::copy_api::{self, CopyTarget};
use crate::detail::{present, DetailField};
use crate::error::FeedError;
use crate::feed::{FeedController, PageOutcome, LIMIT_CHOICES};
use crate::platform::Clipboard;
use crate::theme::{ColorScheme, Theme};
use crate::types::{AppEvent, Block, PageRequest};

const TOAST_DURATION: Duration = Duration::from_secs(2);

pub const MSG_LOAD_FAILED: &str = "Error loading blocks! Try again later";
pub const MSG_NO_BLOCKS: &str = "No blocks received";
pub const MSG_COPIED: &str = "Copied to clipboard!";
pub const MSG_COPY_FAILED: &str = "Could not copy to clipboard!";

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Screen { Feed, Detail }

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum InputMode { Normal, Search }

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ToastKind { Success, Error }

pub struct App {
    quit: bool,
    screen: Screen,
    input_mode: InputMode,

    feed: FeedController,
    sel: usize,                    // index into the filtered list

    detail: Option<Block>,         // record handed over from the feed
    detail_sel: usize,

    fetch_tx: Option<UnboundedSender<PageRequest>>,
    clipboard: Box<dyn Clipboard>,

    toast: Option<(String, ToastKind, Instant)>,

    theme: Theme,
    fps: u32,
}

impl App {
    pub fn new(
        limit: u32,
        search: String,
        clipboard: Box<dyn Clipboard>,
        fetch_tx: Option<UnboundedSender<PageRequest>>,
    ) -> Self {
        Self {
            quit: false,
            screen: Screen::Feed,
            input_mode: InputMode::Normal,
            feed: FeedController::new(limit, search),
            sel: 0,
            detail: None,
            detail_sel: 0,
            fetch_tx,
            clipboard,
            toast: None,
            theme: Theme::default(),
            fps: 30,
        }
    }

    pub fn with_display(mut self, theme: Theme, fps: u32) -> Self {
        self.theme = theme;
        self.fps = fps;
        self
    }

    // ----- getters -----
    pub fn quit_flag(&self) -> bool { self.quit }
    pub fn screen(&self) -> Screen { self.screen }
    pub fn input_mode(&self) -> InputMode { self.input_mode }
    pub fn feed(&self) -> &FeedController { &self.feed }
    pub fn selection(&self) -> usize { self.sel }
    pub fn detail_block(&self) -> Option<&Block> { self.detail.as_ref() }
    pub fn detail_selection(&self) -> usize { self.detail_sel }
    pub fn fps(&self) -> u32 { self.fps }
    pub fn theme(&self) -> ColorScheme { self.theme.colors() }

    pub fn selected_block(&self) -> Option<&Block> {
        self.feed.filtered().get(self.sel).copied()
    }

    /// Detail fields of the open block, timestamps relative to `now`.
    pub fn detail_fields(&self, now: i64) -> Vec<DetailField> {
        self.detail.as_ref().map(|b| present(b, now)).unwrap_or_default()
    }

    /// Current toast if it is still within its display window.
    pub fn toast(&self) -> Option<(&str, ToastKind)> {
        self.toast.as_ref().and_then(|(msg, kind, at)| {
            if at.elapsed() < TOAST_DURATION {
                Some((msg.as_str(), *kind))
            } else {
                None
            }
        })
    }

    pub fn show_toast(&mut self, msg: impl Into<String>, kind: ToastKind) {
        self.toast = Some((msg.into(), kind, Instant::now()));
    }

    // ----- lifecycle -----
    pub fn mount(&mut self) {
        let req = self.feed.on_mount();
        self.sel = 0;
        self.dispatch(req);
    }

    pub fn unmount(&mut self) {
        self.feed.on_unmount();
    }

    pub fn on_event(&mut self, ev: AppEvent) {
        match ev {
            AppEvent::PageLoaded { request, result } => {
                self.on_page_loaded(request.id, result);
            }
            AppEvent::Quit => self.quit = true,
        }
    }

    pub fn on_page_loaded(&mut self, request_id: u64, result: Result<Vec<Block>, FeedError>) -> PageOutcome {
        let outcome = self.feed.on_page_loaded(request_id, result);
        if outcome.needs_notice() {
            let msg = if outcome == PageOutcome::Empty { MSG_NO_BLOCKS } else { MSG_LOAD_FAILED };
            self.show_toast(msg, ToastKind::Error);
        } else if let PageOutcome::Applied { .. } = outcome {
            self.clamp_selection();
        }
        outcome
    }

    // ----- feed actions -----
    pub fn pull_to_refresh(&mut self) {
        let req = self.feed.on_pull_to_refresh();
        self.dispatch(req);
    }

    pub fn reload(&mut self) {
        let req = self.feed.on_reload();
        self.sel = 0;
        self.dispatch(req);
    }

    pub fn set_limit(&mut self, limit: u32) {
        let req = self.feed.on_limit_changed(limit);
        if req.is_some() {
            self.sel = 0;
        }
        self.dispatch(req);
    }

    /// Step to the next (or previous) page size, wrapping around.
    pub fn cycle_limit(&mut self, forward: bool) {
        let n = LIMIT_CHOICES.len();
        let idx = LIMIT_CHOICES.iter().position(|&l| l == self.feed.limit()).unwrap_or(0);
        let next = if forward { (idx + 1) % n } else { (idx + n - 1) % n };
        self.set_limit(LIMIT_CHOICES[next]);
    }

    fn dispatch(&mut self, req: Option<PageRequest>) {
        let Some(req) = req else { return };
        let Some(tx) = &self.fetch_tx else {
            log::debug!("[app] no fetch worker attached, request {} stays pending", req.id);
            return;
        };
        if tx.send(req).is_err() {
            log::error!("[app] fetch worker stopped, failing request {}", req.id);
            self.on_page_loaded(req.id, Err(FeedError::Network("fetch worker stopped".into())));
        }
    }

    // ----- navigation -----
    pub fn open_detail(&mut self) {
        if let Some(block) = self.selected_block().cloned() {
            log::debug!("[app] open detail for block {}", block.block_number);
            self.detail = Some(block);
            self.detail_sel = 0;
            self.screen = Screen::Detail;
        }
    }

    pub fn close_detail(&mut self) {
        self.screen = Screen::Feed;
        self.detail = None;
    }

    pub fn up(&mut self) { self.move_by(-1); }
    pub fn down(&mut self) { self.move_by(1); }
    pub fn page_up(&mut self, n: usize) { self.move_by(-(n as i64)); }
    pub fn page_down(&mut self, n: usize) { self.move_by(n as i64); }
    pub fn home(&mut self) { self.move_by(i64::MIN / 2); }
    pub fn end(&mut self) { self.move_by(i64::MAX / 2); }

    fn move_by(&mut self, delta: i64) {
        let (cur, len) = match self.screen {
            Screen::Feed => (self.sel, self.feed.filtered().len()),
            Screen::Detail => (self.detail_sel, self.detail_fields(0).len()),
        };
        if len == 0 {
            return;
        }
        let next = (cur as i64).saturating_add(delta).clamp(0, len as i64 - 1) as usize;
        match self.screen {
            Screen::Feed => self.sel = next,
            Screen::Detail => self.detail_sel = next,
        }
    }

    fn clamp_selection(&mut self) {
        let len = self.feed.filtered().len();
        self.sel = if len == 0 { 0 } else { self.sel.min(len - 1) };
    }

    // ----- search -----
    pub fn start_search(&mut self) { self.input_mode = InputMode::Search; }

    pub fn search_add_char(&mut self, c: char) {
        self.feed.push_query_char(c);
        self.clamp_selection();
    }

    pub fn search_backspace(&mut self) {
        self.feed.pop_query_char();
        self.clamp_selection();
    }

    /// Leave search mode keeping the query.
    pub fn finish_search(&mut self) { self.input_mode = InputMode::Normal; }

    /// Leave search mode and drop the query.
    pub fn clear_search(&mut self) {
        self.feed.clear_query();
        self.input_mode = InputMode::Normal;
        self.clamp_selection();
    }

    // ----- clipboard -----
    pub fn copy(&mut self, target: CopyTarget) -> bool {
        let Some(text) = copy_api::current_text(self, target) else {
            return false;
        };
        match self.clipboard.set_text(&text) {
            Ok(()) => {
                log::debug!("[app] copied {} chars", text.len());
                self.show_toast(MSG_COPIED, ToastKind::Success);
                true
            }
            Err(e) => {
                log::error!("[app] failed to copy to clipboard: {e}");
                self.show_toast(MSG_COPY_FAILED, ToastKind::Error);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::NoClipboard;
    use crate::types::fixtures::block;

    fn loaded() -> App {
        let mut app = App::new(10, String::new(), Box::new(NoClipboard), None);
        app.mount();
        let req = app.feed().in_flight().unwrap();
        app.on_page_loaded(req.id, Ok(vec![block(100, "abc", 3), block(101, "xyz", 2), block(102, "abc2", 1)]));
        app
    }

    #[test]
    fn failure_shows_error_toast() {
        let mut app = loaded();
        app.pull_to_refresh();
        let req = app.feed().in_flight().unwrap();
        app.on_page_loaded(req.id, Err(FeedError::Timeout { ms: 8000 }));
        assert_eq!(app.toast(), Some((MSG_LOAD_FAILED, ToastKind::Error)));
        assert_eq!(app.feed().blocks().len(), 3);
    }

    #[test]
    fn selection_clamps_when_filter_narrows() {
        let mut app = loaded();
        app.end();
        assert_eq!(app.selection(), 2);
        app.start_search();
        for c in "xyz".chars() {
            app.search_add_char(c);
        }
        assert_eq!(app.selection(), 0);
        assert_eq!(app.selected_block().unwrap().block_number, 101);
        app.clear_search();
        assert_eq!(app.input_mode(), InputMode::Normal);
        assert_eq!(app.feed().query(), "");
    }

    #[test]
    fn detail_receives_selected_block() {
        let mut app = loaded();
        app.down();
        app.open_detail();
        assert_eq!(app.screen(), Screen::Detail);
        assert_eq!(app.detail_block().unwrap().block_number, 101);
        app.end();
        assert_eq!(app.detail_selection(), 9);
        app.close_detail();
        assert_eq!(app.screen(), Screen::Feed);
    }

    #[test]
    fn open_detail_on_empty_feed_stays_on_feed() {
        let mut app = App::new(10, String::new(), Box::new(NoClipboard), None);
        app.open_detail();
        assert_eq!(app.screen(), Screen::Feed);
    }

    #[test]
    fn copy_failure_shows_error_toast() {
        let mut app = loaded();
        assert!(!app.copy(CopyTarget::Selection));
        assert_eq!(app.toast(), Some((MSG_COPY_FAILED, ToastKind::Error)));
    }

    #[test]
    fn cycle_limit_wraps() {
        let mut app = App::new(25, String::new(), Box::new(NoClipboard), None);
        app.cycle_limit(true);
        assert_eq!(app.feed().limit(), 5);
        app.cycle_limit(false);
        assert_eq!(app.feed().limit(), 25);
    }

    #[test]
    fn quit_event_sets_flag() {
        let mut app = App::new(10, String::new(), Box::new(NoClipboard), None);
        app.on_event(AppEvent::Quit);
        assert!(app.quit_flag());
    }
}
