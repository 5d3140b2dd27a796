//! Render coordination.
//!
//! `RenderLoopState` mediates between input actions, debounced terms, the fetch worker and the
//! view. It owns the `SearchController` and is the only code that mutates it. After every
//! transition it asks the controller whether the fetch key moved and, if so, issues a fetch
//! tagged with a fresh request id. Only the response to the latest id is applied.

use crate::error::{GiflensError, Result};
use crate::input::InputAction;
use crate::render::protocol::{FetchCommand, FetchResponse, RequestId};
use crate::render::ui::ViewState;
use crate::search::SearchController;
use log::debug;
use tokio::sync::mpsc;

/// Tracks render-related state that must persist across input actions and worker responses.
pub struct RenderLoopState {
    controller: SearchController,
    fetch_tx: mpsc::Sender<FetchCommand>,
    term_tx: mpsc::UnboundedSender<String>,
    next_request_id: RequestId,
    latest_fetch_request: Option<RequestId>,
}

impl RenderLoopState {
    /// `term_tx` feeds the debounced term stream; `fetch_tx` feeds the fetch worker.
    pub fn new(
        controller: SearchController,
        fetch_tx: mpsc::Sender<FetchCommand>,
        term_tx: mpsc::UnboundedSender<String>,
    ) -> Self {
        Self {
            controller,
            fetch_tx,
            term_tx,
            next_request_id: 1,
            latest_fetch_request: None,
        }
    }

    pub fn controller(&self) -> &SearchController {
        &self.controller
    }

    pub fn latest_fetch_request(&self) -> Option<RequestId> {
        self.latest_fetch_request
    }

    /// Apply one input action. Returns false when the app should quit.
    pub async fn process_action(
        &mut self,
        action: InputAction,
        view_state: &mut ViewState,
    ) -> Result<bool> {
        match action {
            InputAction::Quit => return Ok(false),
            InputAction::InsertText(text) => {
                let term = format!("{}{}", self.controller.term(), text);
                self.change_term(term)?;
            }
            InputAction::DeleteBackward => {
                let mut term = self.controller.term().to_string();
                if term.pop().is_none() {
                    return Ok(true);
                }
                self.change_term(term)?;
            }
            InputAction::ClearTerm => {
                self.controller.clear();
                self.term_tx
                    .send(String::new())
                    .map_err(|_| GiflensError::other("debounce task unavailable"))?;
            }
            InputAction::Cancel => {
                if !view_state.dropdown_visible() {
                    return Ok(false);
                }
                view_state.hide_history();
            }
            InputAction::ToggleHistory => {
                if view_state.dropdown_visible() {
                    view_state.hide_history();
                } else {
                    view_state.show_history();
                }
            }
            InputAction::HistoryUp => {
                if view_state.dropdown_visible() {
                    view_state.select_prev_history();
                }
            }
            InputAction::HistoryDown => {
                if view_state.dropdown_visible() {
                    view_state.select_next_history();
                } else {
                    view_state.show_history();
                }
            }
            InputAction::SelectHistory => {
                let selected = view_state.selected_history().map(str::to_string);
                view_state.hide_history();
                if let Some(term) = selected {
                    self.change_term(term)?;
                }
            }
            InputAction::RemoveHistoryItem => {
                if let Some(term) = view_state.selected_history().map(str::to_string) {
                    self.controller.remove_history_item(&term);
                    view_state.status_line.set_message(format!("removed '{term}' from history"));
                }
            }
            InputAction::Paginate(direction) => {
                if !self.controller.paginate(direction) {
                    return Ok(true);
                }
            }
            InputAction::Resize { width, height } => {
                view_state.update_terminal_size(width, height);
            }
            InputAction::NoAction | InputAction::InvalidInput => return Ok(true),
        }

        self.sync_fetch(view_state).await?;
        view_state.sync_from(&self.controller);
        Ok(true)
    }

    /// Take in a stable term from the debounced stream. Any status message belongs to the
    /// previous search and is cleared.
    pub async fn apply_debounced(&mut self, term: String, view_state: &mut ViewState) -> Result<()> {
        self.controller.apply_debounced(term);
        view_state.status_line.clear_message();
        self.sync_fetch(view_state).await?;
        view_state.sync_from(&self.controller);
        Ok(())
    }

    /// Apply a worker response if it answers the latest request; drop it otherwise.
    pub fn handle_response(&mut self, response: FetchResponse, view_state: &mut ViewState) {
        match response {
            FetchResponse::Completed {
                request_id,
                query,
                items,
            } => {
                if Some(request_id) != self.latest_fetch_request {
                    debug!(
                        "dropping stale response #{} for {:?} at offset {}",
                        request_id, query.term, query.offset
                    );
                    return;
                }
                self.latest_fetch_request = None;
                self.controller.replace_results(items);
                view_state.loading = false;
                view_state.sync_from(&self.controller);
            }
        }
    }

    fn change_term(&mut self, term: String) -> Result<()> {
        self.controller.set_term(term.clone());
        self.term_tx
            .send(term)
            .map_err(|_| GiflensError::other("debounce task unavailable"))
    }

    /// Issue a fetch if the (debounced term, offset) key changed.
    async fn sync_fetch(&mut self, view_state: &mut ViewState) -> Result<()> {
        let Some(query) = self.controller.take_fetch_query() else {
            return Ok(());
        };

        if query.term.is_empty() {
            // Nothing to search for; any response still in flight is now stale.
            self.latest_fetch_request = None;
            self.controller.replace_results(Vec::new());
            view_state.loading = false;
            return Ok(());
        }

        let request_id = self.next_request_id;
        self.next_request_id += 1;
        self.latest_fetch_request = Some(request_id);
        view_state.loading = true;
        debug!(
            "request #{} for {:?} at offset {}",
            request_id, query.term, query.offset
        );

        self.fetch_tx
            .send(FetchCommand::Search { request_id, query })
            .await
            .map_err(|_| GiflensError::other("fetch worker unavailable"))
    }
}
