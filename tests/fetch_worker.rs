use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::time::{sleep, timeout, Duration};

use giflens::error::{GiflensError, Result};
use giflens::render::protocol::{FetchCommand, FetchResponse};
use giflens::search::worker::{fetch_results, fetch_worker_loop};
use giflens::search::{GifSource, SearchPayload, SearchQuery};

const TIMEOUT_MS: u64 = 2_000;

/// In-memory source answering from canned JSON bodies, optionally after a delay.
#[derive(Default)]
struct CannedSource {
    bodies: HashMap<String, (&'static str, Duration)>,
    calls: AtomicUsize,
}

impl CannedSource {
    fn with(mut self, term: &str, body: &'static str, delay_ms: u64) -> Self {
        self.bodies
            .insert(term.to_string(), (body, Duration::from_millis(delay_ms)));
        self
    }
}

#[async_trait]
impl GifSource for CannedSource {
    async fn search(&self, query: &SearchQuery) -> Result<SearchPayload> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let (body, delay) = self
            .bodies
            .get(&query.term)
            .copied()
            .ok_or_else(|| GiflensError::other(format!("no canned body for {}", query.term)))?;
        sleep(delay).await;
        SearchPayload::from_json(body)
    }
}

const CAT_PAGE: &str = r#"{"data": [
    {"id": "c1", "title": "Cat One", "images": {"original": {"url": "https://media.giphy.com/c1.gif"}}},
    {"id": "c2", "title": "Cat Two", "images": {"original": {"url": "https://media.giphy.com/c2.gif"}}}
]}"#;

const OWL_PAGE: &str = r#"{"data": [
    {"id": "o1", "title": "Owl", "images": {"original": {"url": "https://media.giphy.com/o1.gif"}}}
]}"#;

async fn next_response(rx: &mut mpsc::Receiver<FetchResponse>) -> FetchResponse {
    timeout(Duration::from_millis(TIMEOUT_MS), rx.recv())
        .await
        .expect("worker response timed out")
        .expect("worker channel closed unexpectedly")
}

fn spawn_worker(
    source: Arc<dyn GifSource>,
) -> (
    mpsc::Sender<FetchCommand>,
    mpsc::Receiver<FetchResponse>,
    tokio::task::JoinHandle<()>,
) {
    let (cmd_tx, cmd_rx) = mpsc::channel(4);
    let (resp_tx, resp_rx) = mpsc::channel(4);
    let worker = tokio::spawn(fetch_worker_loop(cmd_rx, resp_tx, source));
    (cmd_tx, resp_rx, worker)
}

#[tokio::test]
async fn fetch_results_projects_payload_in_order() {
    let source = CannedSource::default().with("cat", CAT_PAGE, 0);
    let items = fetch_results(&source, &SearchQuery::new("cat", 0)).await;

    let ids: Vec<&str> = items.iter().map(|item| item.id.as_str()).collect();
    assert_eq!(ids, vec!["c1", "c2"]);
    assert_eq!(items[0].display_url, "https://media.giphy.com/c1.gif");
}

#[tokio::test]
async fn payload_without_data_yields_empty_list() {
    let source = CannedSource::default().with("dog", "{}", 0);
    let items = fetch_results(&source, &SearchQuery::new("dog", 0)).await;
    assert!(items.is_empty());
}

#[tokio::test]
async fn failures_are_swallowed_into_empty_list() {
    let source = CannedSource::default().with("html", "<html>oops</html>", 0);

    assert!(fetch_results(&source, &SearchQuery::new("html", 0))
        .await
        .is_empty());
    assert!(fetch_results(&source, &SearchQuery::new("unknown", 0))
        .await
        .is_empty());
    assert_eq!(source.calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn worker_answers_with_request_id_and_query() {
    let source = Arc::new(CannedSource::default().with("cat", CAT_PAGE, 0));
    let (cmd_tx, mut resp_rx, worker) = spawn_worker(source.clone());

    cmd_tx
        .send(FetchCommand::Search {
            request_id: 7,
            query: SearchQuery::new("cat", 20),
        })
        .await
        .unwrap();

    match next_response(&mut resp_rx).await {
        FetchResponse::Completed {
            request_id,
            query,
            items,
        } => {
            assert_eq!(request_id, 7);
            assert_eq!(query, SearchQuery::new("cat", 20));
            assert_eq!(items.len(), 2);
        }
    }

    cmd_tx.send(FetchCommand::Shutdown).await.unwrap();
    worker.await.unwrap();
    assert_eq!(source.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn slow_request_does_not_block_newer_one() {
    let source = Arc::new(
        CannedSource::default()
            .with("cat", CAT_PAGE, 300)
            .with("owl", OWL_PAGE, 0),
    );
    let (cmd_tx, mut resp_rx, worker) = spawn_worker(source);

    cmd_tx
        .send(FetchCommand::Search {
            request_id: 1,
            query: SearchQuery::new("cat", 0),
        })
        .await
        .unwrap();
    cmd_tx
        .send(FetchCommand::Search {
            request_id: 2,
            query: SearchQuery::new("owl", 0),
        })
        .await
        .unwrap();

    let ids: Vec<u64> = vec![
        next_response(&mut resp_rx).await,
        next_response(&mut resp_rx).await,
    ]
    .into_iter()
    .map(|response| match response {
        FetchResponse::Completed { request_id, .. } => request_id,
    })
    .collect();

    // The slower, older request resolves last; the coordinator is responsible for dropping it.
    assert_eq!(ids, vec![2, 1]);

    cmd_tx.send(FetchCommand::Shutdown).await.unwrap();
    worker.await.unwrap();
}

#[tokio::test]
async fn worker_exits_when_commands_close() {
    let source = Arc::new(CannedSource::default());
    let (cmd_tx, _resp_rx, worker) = spawn_worker(source);
    drop(cmd_tx);

    timeout(Duration::from_millis(TIMEOUT_MS), worker)
        .await
        .expect("worker did not stop")
        .unwrap();
}
