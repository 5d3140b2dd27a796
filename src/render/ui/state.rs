//! UI state management structures
//!
//! `ViewState` is a render-ready snapshot of the search controller plus the bits of state that
//! only matter to the screen (dropdown visibility, selection, loading flag, terminal size).

use crate::search::{page_of, PageDirection, ResultItem, SearchController};

/// Everything the renderer needs to draw one frame
#[derive(Debug, Clone)]
pub struct ViewState {
    /// Raw text in the search box
    pub term: String,

    /// Current pagination offset
    pub offset: u32,

    /// Previously searched terms, oldest first
    pub history: Vec<String>,

    /// Displayed results in API order
    pub results: Vec<ResultItem>,

    /// Pagination button availability
    pub can_prev: bool,
    pub can_next: bool,

    /// Whether the history dropdown is open
    pub history_open: bool,

    /// Highlighted dropdown row
    pub history_selected: usize,

    /// A fetch for the current key is in flight
    pub loading: bool,

    /// Status line content
    pub status_line: StatusLine,

    /// Viewport dimensions
    pub viewport_width: u16,
    pub viewport_height: u16,
}

impl ViewState {
    pub fn new(viewport_width: u16, viewport_height: u16) -> Self {
        Self {
            term: String::new(),
            offset: 0,
            history: Vec::new(),
            results: Vec::new(),
            can_prev: false,
            can_next: false,
            history_open: false,
            history_selected: 0,
            loading: false,
            status_line: StatusLine::new(),
            viewport_width,
            viewport_height,
        }
    }

    /// Copy the controller's state into the snapshot.
    pub fn sync_from(&mut self, controller: &SearchController) {
        self.term = controller.term().to_string();
        self.offset = controller.offset();
        self.history = controller.history().entries().to_vec();
        self.results = controller.results().to_vec();
        self.can_prev = controller.can_paginate(PageDirection::Prev);
        self.can_next = controller.can_paginate(PageDirection::Next);
        if self.history.is_empty() {
            self.history_open = false;
        }
        self.clamp_history_selection();
    }

    /// The dropdown is drawn only when it is open and has something to show.
    pub fn dropdown_visible(&self) -> bool {
        self.history_open && !self.history.is_empty()
    }

    /// Opening an empty history leaves the dropdown closed.
    pub fn show_history(&mut self) {
        self.history_open = !self.history.is_empty();
        self.clamp_history_selection();
    }

    pub fn hide_history(&mut self) {
        self.history_open = false;
    }

    /// Move the dropdown highlight down, wrapping at the end.
    pub fn select_next_history(&mut self) {
        if self.history.is_empty() {
            return;
        }
        self.history_selected = (self.history_selected + 1) % self.history.len();
    }

    /// Move the dropdown highlight up, wrapping at the start.
    pub fn select_prev_history(&mut self) {
        if self.history.is_empty() {
            return;
        }
        self.history_selected = self
            .history_selected
            .checked_sub(1)
            .unwrap_or(self.history.len() - 1);
    }

    pub fn selected_history(&self) -> Option<&str> {
        if !self.dropdown_visible() {
            return None;
        }
        self.history.get(self.history_selected).map(String::as_str)
    }

    fn clamp_history_selection(&mut self) {
        if self.history_selected >= self.history.len() {
            self.history_selected = self.history.len().saturating_sub(1);
        }
    }

    /// Update terminal dimensions. Returns true if they actually changed.
    pub fn update_terminal_size(&mut self, width: u16, height: u16) -> bool {
        let changed = self.viewport_width != width || self.viewport_height != height;
        if changed {
            self.viewport_width = width;
            self.viewport_height = height;
        }
        changed
    }

    pub fn format_status_line(&self) -> String {
        self.status_line
            .format_status_line(self.offset, self.results.len(), self.loading)
    }
}

/// Status line information
#[derive(Debug, Clone, Default)]
pub struct StatusLine {
    pub message: Option<String>,
}

impl StatusLine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a temporary message
    pub fn set_message(&mut self, message: String) {
        self.message = Some(message);
    }

    /// Clear any temporary message
    pub fn clear_message(&mut self) {
        self.message = None;
    }

    pub fn format_status_line(&self, offset: u32, result_count: usize, loading: bool) -> String {
        let page = page_of(offset);
        let results = if loading {
            "searching...".to_string()
        } else {
            match result_count {
                0 => "no results".to_string(),
                1 => "1 result".to_string(),
                n => format!("{n} results"),
            }
        };

        match self.message {
            Some(ref message) => format!("page {page} | {results} | {message}"),
            None => format!("page {page} | {results}"),
        }
    }
}
