use crate::render::protocol::{FetchCommand, FetchResponse};
use crate::search::client::GifSource;
use crate::search::controller::SearchQuery;
use crate::search::payload::ResultItem;
use log::{debug, error, warn};
use std::sync::Arc;
use tokio::sync::mpsc::{Receiver, Sender};

/// Run the fetch worker processing commands from the coordinator.
///
/// Each search runs on its own task so a slow response never holds up newer requests. Requests
/// already in flight are left to finish; their responses may arrive in any order.
pub async fn fetch_worker_loop(
    mut rx: Receiver<FetchCommand>,
    tx: Sender<FetchResponse>,
    source: Arc<dyn GifSource>,
) {
    while let Some(cmd) = rx.recv().await {
        match cmd {
            FetchCommand::Search { request_id, query } => {
                let source = Arc::clone(&source);
                let tx = tx.clone();
                tokio::spawn(async move {
                    let items = fetch_results(source.as_ref(), &query).await;
                    let _ = tx
                        .send(FetchResponse::Completed {
                            request_id,
                            query,
                            items,
                        })
                        .await;
                });
            }
            FetchCommand::Shutdown => break,
        }
    }
}

/// Issue one search request and project the payload onto result items.
///
/// Failures are logged and yield an empty list; nothing is retried.
pub async fn fetch_results(source: &dyn GifSource, query: &SearchQuery) -> Vec<ResultItem> {
    debug!("fetching {:?} at offset {}", query.term, query.offset);
    match source.search(query).await {
        Ok(payload) => payload.into_items(),
        Err(err) if err.is_fetch_failure() => {
            warn!(
                "search for {:?} at offset {} failed: {}",
                query.term, query.offset, err
            );
            Vec::new()
        }
        Err(err) => {
            error!("search source error for {:?}: {}", query.term, err);
            Vec::new()
        }
    }
}
