//! Application orchestration layer
//!
//! Wires the input thread, the debounced term stream, the fetch worker and the renderer
//! together and runs the event loop. All search state changes happen on this loop.

pub mod runtime;

use crate::config::Config;
use crate::debounce::debounce;
use crate::error::Result;
use crate::render::protocol::FetchCommand;
use crate::render::service::RenderLoopState;
use crate::render::ui::{UIRenderer, ViewState};
use crate::search::{fetch_worker_loop, GifSource, GiphyClient, SearchController};
use futures::StreamExt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_stream::wrappers::UnboundedReceiverStream;

const INPUT_POLL_INTERVAL: Duration = Duration::from_millis(50);
const FETCH_CHANNEL_CAPACITY: usize = 32;

/// Application orchestrator - coordinates components without duplicating their state
pub struct Application {
    source: Arc<dyn GifSource>,
    ui_renderer: Box<dyn UIRenderer>,
    debounce_delay: Duration,
}

impl Application {
    /// Create the application with the Giphy client described by `config`.
    pub fn new(config: &Config, ui_renderer: Box<dyn UIRenderer>) -> Result<Self> {
        let client = GiphyClient::new(config)?;
        Ok(Self::with_source(
            Arc::new(client),
            ui_renderer,
            config.debounce_delay,
        ))
    }

    /// Create the application around any search source.
    pub fn with_source(
        source: Arc<dyn GifSource>,
        ui_renderer: Box<dyn UIRenderer>,
        debounce_delay: Duration,
    ) -> Self {
        Self {
            source,
            ui_renderer,
            debounce_delay,
        }
    }

    /// Run the interactive event loop until the user quits.
    pub async fn run(&mut self) -> Result<()> {
        self.ui_renderer.initialize()?;
        let result = self.event_loop().await;
        self.ui_renderer.cleanup()?;
        result
    }

    async fn event_loop(&mut self) -> Result<()> {
        let (width, height) = self.ui_renderer.get_terminal_size()?;
        let mut view_state = ViewState::new(width, height);

        let (input_tx, mut input_rx) = mpsc::unbounded_channel();
        let shutdown = Arc::new(AtomicBool::new(false));
        let input_thread =
            runtime::spawn_input_thread(input_tx, Arc::clone(&shutdown), INPUT_POLL_INTERVAL);

        let (fetch_tx, fetch_rx) = mpsc::channel(FETCH_CHANNEL_CAPACITY);
        let (response_tx, mut response_rx) = mpsc::channel(FETCH_CHANNEL_CAPACITY);
        let worker = tokio::spawn(fetch_worker_loop(
            fetch_rx,
            response_tx,
            Arc::clone(&self.source),
        ));

        let (term_tx, term_rx) = mpsc::unbounded_channel();
        let mut debounced = debounce(
            UnboundedReceiverStream::new(term_rx),
            String::new(),
            self.debounce_delay,
        );

        let mut loop_state = RenderLoopState::new(SearchController::new(), fetch_tx.clone(), term_tx);
        self.ui_renderer.render(&view_state)?;

        let outcome = loop {
            let step = tokio::select! {
                action = input_rx.recv() => match action {
                    Some(action) => loop_state.process_action(action, &mut view_state).await,
                    // Input thread gave up
                    None => Ok(false),
                },
                Some(term) = debounced.next() => {
                    loop_state.apply_debounced(term, &mut view_state).await.map(|_| true)
                }
                Some(response) = response_rx.recv() => {
                    loop_state.handle_response(response, &mut view_state);
                    Ok(true)
                }
            };

            match step {
                Ok(true) => {}
                Ok(false) => break Ok(()),
                Err(err) => break Err(err),
            }

            if let Err(err) = self.ui_renderer.render(&view_state) {
                break Err(err);
            }
        };

        // Dropping the stream cancels any pending debounce update.
        drop(debounced);
        shutdown.store(true, Ordering::SeqCst);
        let _ = fetch_tx.send(FetchCommand::Shutdown).await;
        let _ = worker.await;
        runtime::join_input_thread(input_thread).await;

        outcome
    }
}
