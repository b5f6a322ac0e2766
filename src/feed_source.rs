use std::sync::Arc;

use anyhow::Result;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;

use crate::feed_client::BlockFeed;
use crate::types::{AppEvent, PageRequest};

/// Background task that runs page requests issued by the feed controller.
///
/// Each request is fetched on its own task and answered with
/// `AppEvent::PageLoaded`. A newer request aborts an older one that is
/// still running; the controller discards late answers either way.
pub async fn run_feed_fetch(
    feed: Arc<dyn BlockFeed>,
    mut req_rx: UnboundedReceiver<PageRequest>,
    event_tx: UnboundedSender<AppEvent>,
) -> Result<()> {
    log::info!("[feed_source] fetch task started");
    let mut in_flight: Option<(u64, JoinHandle<()>)> = None;

    while let Some(request) = req_rx.recv().await {
        if let Some((old_id, handle)) = in_flight.take() {
            if !handle.is_finished() {
                log::debug!("[feed_source] aborting request {old_id} for {}", request.id);
                handle.abort();
            }
        }

        let feed = Arc::clone(&feed);
        let tx = event_tx.clone();
        let handle = tokio::spawn(async move {
            let result = feed.fetch_page(request.limit, request.cursor).await;
            if let Err(e) = &result {
                log::warn!("[feed_source] request {} failed: {e}", request.id);
            }
            if tx.send(AppEvent::PageLoaded { request, result }).is_err() {
                log::debug!("[feed_source] UI gone, dropping result for request {}", request.id);
            }
        });
        in_flight = Some((request.id, handle));
    }

    if let Some((_, handle)) = in_flight {
        handle.abort();
    }
    log::info!("[feed_source] fetch task shutting down");
    Ok(())
}
