//! App + fetch worker + scripted feed, wired the way the binary wires them.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use solx::app::{App, ToastKind, MSG_LOAD_FAILED, MSG_NO_BLOCKS};
use solx::platform::NoClipboard;
use solx::types::{BlockMetrics, BlockTime};
use solx::{feed_source, AppEvent, Block, BlockFeed, FeedError, PageRequest};
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver};

fn block(number: u64, hash: &str, parent_slot: u64) -> Block {
    Block {
        block_number: number,
        block_hash: hash.to_string(),
        previous_block_hash: "prev".to_string(),
        block_time: BlockTime { absolute: 1_700_000_000 },
        parent_slot,
        proposer: "Proposer".to_string(),
        metrics: BlockMetrics { tx_count: 2, failed_txs: 0, successful_txs: 2, total_fees_lamports: 10_000 },
    }
}

/// Answers fetches from a script and records every call.
#[derive(Default)]
struct ScriptedFeed {
    script: Mutex<VecDeque<Result<Vec<Block>, FeedError>>>,
    calls: Mutex<Vec<(u32, Option<u64>)>>,
}

impl ScriptedFeed {
    fn new(script: Vec<Result<Vec<Block>, FeedError>>) -> Arc<Self> {
        Arc::new(Self { script: Mutex::new(script.into()), calls: Mutex::default() })
    }

    fn calls(&self) -> Vec<(u32, Option<u64>)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl BlockFeed for ScriptedFeed {
    async fn fetch_page(&self, limit: u32, cursor: Option<u64>) -> Result<Vec<Block>, FeedError> {
        self.calls.lock().unwrap().push((limit, cursor));
        self.script.lock().unwrap().pop_front().unwrap_or(Ok(Vec::new()))
    }
}

struct Harness {
    app: App,
    events: UnboundedReceiver<AppEvent>,
}

impl Harness {
    fn start(feed: Arc<ScriptedFeed>, limit: u32) -> Self {
        let (event_tx, events) = unbounded_channel::<AppEvent>();
        let (req_tx, req_rx) = unbounded_channel::<PageRequest>();
        tokio::spawn(feed_source::run_feed_fetch(feed, req_rx, event_tx));
        let app = App::new(limit, String::new(), Box::new(NoClipboard), Some(req_tx));
        Self { app, events }
    }

    /// Deliver the next page result to the app.
    async fn settle(&mut self) {
        let ev = tokio::time::timeout(Duration::from_secs(2), self.events.recv())
            .await
            .expect("page result within 2s")
            .expect("worker alive");
        self.app.on_event(ev);
    }
}

#[tokio::test]
async fn second_page_continues_from_last_parent_slot() {
    let feed = ScriptedFeed::new(vec![
        Ok(vec![block(102, "c", 70), block(101, "b", 60), block(100, "a", 55)]),
        Ok(vec![block(99, "z", 50)]),
    ]);
    let mut h = Harness::start(feed.clone(), 10);

    h.app.mount();
    h.settle().await;
    assert_eq!(h.app.feed().cursor(), Some(55));

    h.app.pull_to_refresh();
    h.settle().await;

    assert_eq!(feed.calls(), vec![(10, None), (10, Some(55))]);
    let numbers: Vec<u64> = h.app.feed().blocks().iter().map(|b| b.block_number).collect();
    assert_eq!(numbers, vec![102, 101, 100, 99]);
}

#[tokio::test]
async fn empty_first_page_leaves_feed_untouched() {
    let feed = ScriptedFeed::new(vec![Ok(vec![])]);
    let mut h = Harness::start(feed.clone(), 10);

    h.app.mount();
    h.settle().await;

    assert!(h.app.feed().blocks().is_empty());
    assert_eq!(h.app.feed().cursor(), None);
    assert!(!h.app.feed().is_refreshing());
    assert_eq!(h.app.toast(), Some((MSG_NO_BLOCKS, ToastKind::Error)));
    assert!(h.events.try_recv().is_err(), "exactly one result delivered");
}

#[tokio::test]
async fn limit_change_triggers_exactly_one_fresh_fetch() {
    let feed = ScriptedFeed::new(vec![
        Ok(vec![block(102, "c", 70), block(101, "b", 60)]),
        Ok(vec![block(102, "c", 70)]),
    ]);
    let mut h = Harness::start(feed.clone(), 10);

    h.app.mount();
    h.settle().await;

    h.app.set_limit(20);
    assert!(h.app.feed().blocks().is_empty());
    assert_eq!(h.app.feed().cursor(), None);
    h.settle().await;

    assert_eq!(feed.calls(), vec![(10, None), (20, None)]);
    assert_eq!(h.app.feed().blocks().len(), 1);
    assert!(h.events.try_recv().is_err(), "no further fetches expected");
}

#[tokio::test]
async fn failed_fetch_keeps_list_and_notifies_once() {
    let feed = ScriptedFeed::new(vec![
        Ok(vec![block(5, "e", 40)]),
        Err(FeedError::Network("connection reset".into())),
    ]);
    let mut h = Harness::start(feed.clone(), 5);

    h.app.mount();
    h.settle().await;
    assert!(h.app.toast().is_none());

    h.app.pull_to_refresh();
    h.settle().await;

    assert_eq!(h.app.feed().blocks().len(), 1);
    assert_eq!(h.app.feed().cursor(), Some(40));
    assert_eq!(h.app.toast(), Some((MSG_LOAD_FAILED, ToastKind::Error)));
    assert!(h.events.try_recv().is_err(), "exactly one result delivered");
}

#[tokio::test]
async fn result_after_unmount_is_discarded() {
    let feed = ScriptedFeed::new(vec![Ok(vec![block(1, "a", 1)])]);
    let mut h = Harness::start(feed, 10);

    h.app.mount();
    h.app.unmount();
    h.settle().await;

    assert!(h.app.feed().blocks().is_empty());
    assert!(h.app.toast().is_none());
}
