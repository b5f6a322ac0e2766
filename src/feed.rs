//! Feed state and its refresh lifecycle.
//!
//! The controller is pure state: events come in (`on_mount`,
//! `on_pull_to_refresh`, `on_limit_changed`, ...) and page requests come
//! out. Whoever owns it is responsible for actually running the request
//! and feeding the result back through [`FeedController::on_page_loaded`].
//!
//! At most one request is in flight. Pull-to-refresh while refreshing is
//! ignored; reset events (mount, reload, limit change) replace the
//! in-flight request, and results for any request other than the current
//! one are discarded on arrival. That keeps the cursor chain in order.

use std::collections::HashSet;

use crate::error::FeedError;
use crate::feed_client::{clamp_to_limit, next_cursor};
use crate::filter::filter_blocks;
use crate::types::{Block, PageRequest};

/// Page sizes offered to the user.
pub const LIMIT_CHOICES: [u32; 5] = [5, 10, 15, 20, 25];

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Refreshing,
}

/// What happened when a page result was delivered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageOutcome {
    /// Blocks were appended (`added` may be 0 if the page was all duplicates).
    Applied { added: usize },
    /// Upstream returned no blocks; list and cursor unchanged.
    Empty,
    /// Fetch failed; list and cursor unchanged.
    Failed(FeedError),
    /// Result belonged to a superseded request or a torn-down view.
    Discarded,
}

impl PageOutcome {
    /// Whether the user should see a failure notice for this outcome.
    pub fn needs_notice(&self) -> bool {
        matches!(self, PageOutcome::Empty | PageOutcome::Failed(_))
    }
}

#[derive(Debug, Clone, Default)]
struct FeedState {
    blocks: Vec<Block>,
    cursor: Option<u64>,
    limit: u32,
    query: String,
}

pub struct FeedController {
    state: FeedState,
    seen: HashSet<u64>,
    in_flight: Option<PageRequest>,
    next_id: u64,
    mounted: bool,
}

impl FeedController {
    pub fn new(limit: u32, query: String) -> Self {
        Self {
            state: FeedState { blocks: Vec::new(), cursor: None, limit, query },
            seen: HashSet::new(),
            in_flight: None,
            next_id: 1,
            mounted: false,
        }
    }

    // ----- getters -----
    pub fn blocks(&self) -> &[Block] { &self.state.blocks }
    pub fn cursor(&self) -> Option<u64> { self.state.cursor }
    pub fn limit(&self) -> u32 { self.state.limit }
    pub fn query(&self) -> &str { &self.state.query }
    pub fn in_flight(&self) -> Option<PageRequest> { self.in_flight }

    pub fn phase(&self) -> Phase {
        if self.in_flight.is_some() { Phase::Refreshing } else { Phase::Idle }
    }

    pub fn is_refreshing(&self) -> bool {
        self.phase() == Phase::Refreshing
    }

    /// Blocks matching the current search query, server order.
    pub fn filtered(&self) -> Vec<&Block> {
        filter_blocks(&self.state.blocks, &self.state.query)
    }

    // ----- lifecycle events -----

    /// View appeared: start from an empty list and load the first page.
    pub fn on_mount(&mut self) -> Option<PageRequest> {
        self.mounted = true;
        log::info!("[feed] mount (limit {})", self.state.limit);
        self.reset_and_request()
    }

    /// Load the page after the cursor. Ignored while a request is running.
    pub fn on_pull_to_refresh(&mut self) -> Option<PageRequest> {
        if !self.mounted {
            return None;
        }
        if let Some(req) = self.in_flight {
            log::debug!("[feed] refresh ignored, request {} still in flight", req.id);
            return None;
        }
        Some(self.issue())
    }

    /// Drop everything and load the newest page again.
    pub fn on_reload(&mut self) -> Option<PageRequest> {
        if !self.mounted {
            return None;
        }
        log::info!("[feed] reload from head");
        self.reset_and_request()
    }

    /// New page size. Pages fetched under different limits are never mixed,
    /// so this resets list and cursor and fetches once at the new size.
    pub fn on_limit_changed(&mut self, limit: u32) -> Option<PageRequest> {
        if !LIMIT_CHOICES.contains(&limit) {
            log::debug!("[feed] ignoring unsupported limit {limit}");
            return None;
        }
        if limit == self.state.limit {
            return None;
        }
        log::info!("[feed] limit {} -> {limit}", self.state.limit);
        self.state.limit = limit;
        if !self.mounted {
            return None;
        }
        self.reset_and_request()
    }

    /// View torn down: whatever is still in flight is discarded on arrival.
    pub fn on_unmount(&mut self) {
        if let Some(req) = self.in_flight.take() {
            log::debug!("[feed] unmount with request {} in flight", req.id);
        }
        self.mounted = false;
    }

    pub fn on_page_loaded(
        &mut self,
        request_id: u64,
        result: Result<Vec<Block>, FeedError>,
    ) -> PageOutcome {
        let req = match self.in_flight {
            Some(req) if req.id == request_id && self.mounted => req,
            _ => {
                log::debug!("[feed] discarding stale result for request {request_id}");
                return PageOutcome::Discarded;
            }
        };
        self.in_flight = None;

        match result {
            Ok(page) if page.is_empty() => {
                log::warn!("[feed] no blocks received, keeping {} blocks", self.state.blocks.len());
                PageOutcome::Empty
            }
            Ok(mut page) => {
                let extra = clamp_to_limit(&mut page, req.limit);
                if extra > 0 {
                    log::warn!("[feed] page for request {} ran {extra} past limit {}", req.id, req.limit);
                }
                self.state.cursor = next_cursor(&page);
                let mut added = 0;
                for block in page {
                    if self.seen.insert(block.block_number) {
                        self.state.blocks.push(block);
                        added += 1;
                    }
                }
                log::info!(
                    "[feed] appended {added} blocks (total {}), cursor {:?}",
                    self.state.blocks.len(),
                    self.state.cursor
                );
                PageOutcome::Applied { added }
            }
            Err(e) => {
                log::error!("[feed] fetch failed: {e}");
                PageOutcome::Failed(e)
            }
        }
    }

    // ----- search -----
    pub fn push_query_char(&mut self, c: char) { self.state.query.push(c); }
    pub fn pop_query_char(&mut self) { self.state.query.pop(); }
    pub fn clear_query(&mut self) { self.state.query.clear(); }

    fn reset_and_request(&mut self) -> Option<PageRequest> {
        if let Some(old) = self.in_flight.take() {
            log::debug!("[feed] superseding request {}", old.id);
        }
        self.state.blocks.clear();
        self.state.cursor = None;
        self.seen.clear();
        Some(self.issue())
    }

    fn issue(&mut self) -> PageRequest {
        let req = PageRequest { id: self.next_id, limit: self.state.limit, cursor: self.state.cursor };
        self.next_id += 1;
        self.in_flight = Some(req);
        log::debug!("[feed] request {} limit={} cursor={:?}", req.id, req.limit, req.cursor);
        req
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::fixtures::block;

    fn mounted() -> (FeedController, PageRequest) {
        let mut feed = FeedController::new(10, String::new());
        let req = feed.on_mount().unwrap();
        (feed, req)
    }

    #[test]
    fn mount_requests_first_page_without_cursor() {
        let (feed, req) = mounted();
        assert_eq!(req.limit, 10);
        assert_eq!(req.cursor, None);
        assert_eq!(feed.phase(), Phase::Refreshing);
    }

    #[test]
    fn next_request_carries_last_parent_slot() {
        let (mut feed, req) = mounted();
        let page = vec![block(102, "c", 70), block(101, "b", 60), block(100, "a", 55)];
        assert_eq!(feed.on_page_loaded(req.id, Ok(page)), PageOutcome::Applied { added: 3 });
        assert_eq!(feed.phase(), Phase::Idle);
        assert_eq!(feed.cursor(), Some(55));

        let next = feed.on_pull_to_refresh().unwrap();
        assert_eq!(next.cursor, Some(55));
    }

    #[test]
    fn empty_first_page_leaves_cursor_unset() {
        let (mut feed, req) = mounted();
        assert_eq!(feed.on_page_loaded(req.id, Ok(vec![])), PageOutcome::Empty);
        assert_eq!(feed.cursor(), None);
        assert!(feed.blocks().is_empty());
        assert_eq!(feed.on_page_loaded(req.id, Ok(vec![])), PageOutcome::Discarded);
    }

    #[test]
    fn failure_keeps_existing_list() {
        let (mut feed, req) = mounted();
        feed.on_page_loaded(req.id, Ok(vec![block(5, "e", 40)]));
        let req = feed.on_pull_to_refresh().unwrap();
        let outcome = feed.on_page_loaded(req.id, Err(FeedError::Network("down".into())));
        assert!(outcome.needs_notice());
        assert!(!PageOutcome::Discarded.needs_notice());
        assert_eq!(feed.blocks().len(), 1);
        assert_eq!(feed.cursor(), Some(40));
        assert_eq!(feed.phase(), Phase::Idle);
    }

    #[test]
    fn refresh_while_refreshing_is_ignored() {
        let (mut feed, _req) = mounted();
        assert!(feed.on_pull_to_refresh().is_none());
    }

    #[test]
    fn limit_change_resets_and_supersedes() {
        let (mut feed, first) = mounted();
        feed.on_page_loaded(first.id, Ok(vec![block(9, "i", 80)]));
        let slow = feed.on_pull_to_refresh().unwrap();

        let fresh = feed.on_limit_changed(20).unwrap();
        assert_eq!(fresh.limit, 20);
        assert_eq!(fresh.cursor, None);
        assert!(feed.blocks().is_empty());

        // The older request resolves late and must not touch state
        assert_eq!(feed.on_page_loaded(slow.id, Ok(vec![block(8, "h", 70)])), PageOutcome::Discarded);
        assert!(feed.blocks().is_empty());
        assert_eq!(feed.cursor(), None);
        assert_eq!(feed.in_flight(), Some(fresh));
    }

    #[test]
    fn same_limit_is_a_no_op() {
        let (mut feed, _) = mounted();
        assert!(feed.on_limit_changed(10).is_none());
    }

    #[test]
    fn unsupported_limit_is_ignored() {
        let (mut feed, req) = mounted();
        feed.on_page_loaded(req.id, Ok(vec![block(9, "i", 80)]));
        assert!(feed.on_limit_changed(7).is_none());
        assert!(feed.on_limit_changed(0).is_none());
        assert_eq!(feed.limit(), 10);
        assert_eq!(feed.blocks().len(), 1);
        assert_eq!(feed.cursor(), Some(80));
    }

    #[test]
    fn oversized_page_is_cut_to_request_limit() {
        let mut feed = FeedController::new(5, String::new());
        let req = feed.on_mount().unwrap();
        let page: Vec<Block> = (0..8).map(|i| block(100 - i, "h", 50 - i)).collect();
        assert_eq!(feed.on_page_loaded(req.id, Ok(page)), PageOutcome::Applied { added: 5 });
        let numbers: Vec<u64> = feed.blocks().iter().map(|b| b.block_number).collect();
        assert_eq!(numbers, vec![100, 99, 98, 97, 96]);
        assert_eq!(feed.cursor(), Some(46));
    }

    #[test]
    fn unmount_discards_in_flight_result() {
        let (mut feed, req) = mounted();
        feed.on_unmount();
        assert_eq!(feed.on_page_loaded(req.id, Ok(vec![block(1, "a", 1)])), PageOutcome::Discarded);
        assert!(feed.blocks().is_empty());
        assert!(feed.on_pull_to_refresh().is_none());
    }

    #[test]
    fn overlapping_pages_are_deduplicated() {
        let (mut feed, req) = mounted();
        feed.on_page_loaded(req.id, Ok(vec![block(10, "j", 50), block(9, "i", 45)]));
        let req = feed.on_pull_to_refresh().unwrap();
        let outcome = feed.on_page_loaded(req.id, Ok(vec![block(9, "i", 45), block(8, "h", 40)]));
        assert_eq!(outcome, PageOutcome::Applied { added: 1 });
        let numbers: Vec<u64> = feed.blocks().iter().map(|b| b.block_number).collect();
        assert_eq!(numbers, vec![10, 9, 8]);
        assert_eq!(feed.cursor(), Some(40));
    }

    #[test]
    fn search_is_a_view_over_blocks() {
        let (mut feed, req) = mounted();
        feed.on_page_loaded(req.id, Ok(vec![block(100, "abc", 3), block(101, "xyz", 2), block(102, "abc2", 1)]));
        for c in "xyz".chars() {
            feed.push_query_char(c);
        }
        assert_eq!(feed.filtered().len(), 1);
        assert_eq!(feed.blocks().len(), 3);
        feed.pop_query_char();
        feed.clear_query();
        assert_eq!(feed.filtered().len(), 3);
    }
}
