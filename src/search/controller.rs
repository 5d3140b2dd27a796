//! Search state and the rules for changing it.
//!
//! `SearchController` owns the term, pagination offset, history and the displayed results. All
//! operations are pure state transitions; the render loop asks [`SearchController::take_fetch_query`]
//! after each one whether the fetch key (debounced term, offset) moved and a request is due.

use crate::search::history::SearchHistory;
use crate::search::payload::ResultItem;

/// Results requested per page.
pub const PAGE_SIZE: u32 = 10;
/// Last page boundary the API serves (offsets stop below 5000).
pub const MAX_OFFSET: u32 = 4990;

/// Pagination button pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageDirection {
    Prev,
    Next,
}

/// One page of one search term.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct SearchQuery {
    pub term: String,
    pub offset: u32,
}

impl SearchQuery {
    pub fn new(term: impl Into<String>, offset: u32) -> Self {
        Self {
            term: term.into(),
            offset,
        }
    }

}

/// 1-based page number of the page starting at `offset`.
pub fn page_of(offset: u32) -> u32 {
    offset / PAGE_SIZE + 1
}

#[derive(Debug, Default)]
pub struct SearchController {
    term: String,
    offset: u32,
    history: SearchHistory,
    debounced_term: String,
    results: Vec<ResultItem>,
    /// Fetch key seen by the last `take_fetch_query` call.
    observed: SearchQuery,
}

impl SearchController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn term(&self) -> &str {
        &self.term
    }

    pub fn offset(&self) -> u32 {
        self.offset
    }

    pub fn debounced_term(&self) -> &str {
        &self.debounced_term
    }

    pub fn history(&self) -> &SearchHistory {
        &self.history
    }

    pub fn results(&self) -> &[ResultItem] {
        &self.results
    }

    /// Replace the term and go back to the first page.
    pub fn set_term(&mut self, new_term: impl Into<String>) {
        self.term = new_term.into();
        self.offset = 0;
    }

    pub fn clear(&mut self) {
        self.set_term("");
    }

    pub fn can_paginate(&self, direction: PageDirection) -> bool {
        match direction {
            PageDirection::Prev => self.offset > 0,
            PageDirection::Next => self.offset < MAX_OFFSET && !self.term.is_empty(),
        }
    }

    /// Move one page. Disallowed moves change nothing and return false.
    ///
    /// An allowed move empties the displayed results right away; the next fetch refills them.
    pub fn paginate(&mut self, direction: PageDirection) -> bool {
        if !self.can_paginate(direction) {
            return false;
        }
        self.results.clear();
        self.offset = match direction {
            PageDirection::Prev => self.offset - PAGE_SIZE,
            PageDirection::Next => self.offset + PAGE_SIZE,
        };
        true
    }

    pub fn record_history(&mut self, term: &str) -> bool {
        self.history.record(term)
    }

    pub fn remove_history_item(&mut self, term: &str) -> bool {
        self.history.remove(term)
    }

    /// Take in a value from the debounced term stream.
    pub fn apply_debounced(&mut self, term: impl Into<String>) {
        self.debounced_term = term.into();
        let term = self.debounced_term.clone();
        self.record_history(&term);
    }

    /// The fetch key to request, if it changed since the last call.
    pub fn take_fetch_query(&mut self) -> Option<SearchQuery> {
        let current = SearchQuery::new(self.debounced_term.clone(), self.offset);
        if current == self.observed {
            return None;
        }
        self.observed = current.clone();
        Some(current)
    }

    pub fn replace_results(&mut self, items: Vec<ResultItem>) {
        self.results = items;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str) -> ResultItem {
        ResultItem {
            id: id.to_string(),
            title: format!("gif {id}"),
            display_url: format!("https://media.giphy.com/{id}.gif"),
        }
    }

    fn controller_with_term(term: &str) -> SearchController {
        let mut controller = SearchController::new();
        controller.set_term(term);
        controller.apply_debounced(term);
        controller.take_fetch_query();
        controller
    }

    #[test]
    fn test_set_term_resets_offset() {
        let mut controller = controller_with_term("cat");
        controller.paginate(PageDirection::Next);
        controller.paginate(PageDirection::Next);
        assert_eq!(controller.offset(), 20);

        controller.set_term("cats");
        assert_eq!(controller.offset(), 0);
        assert_eq!(controller.term(), "cats");
    }

    #[test]
    fn test_clear_empties_term_and_offset() {
        let mut controller = controller_with_term("cat");
        controller.paginate(PageDirection::Next);
        controller.clear();

        assert_eq!(controller.term(), "");
        assert_eq!(controller.offset(), 0);
    }

    #[test]
    fn test_six_next_pages_reach_offset_sixty() {
        let mut controller = controller_with_term("cat");
        for _ in 0..6 {
            assert!(controller.paginate(PageDirection::Next));
        }
        assert_eq!(controller.offset(), 60);
        assert_eq!(page_of(controller.offset()), 7);
    }

    #[test]
    fn test_prev_at_first_page_is_noop() {
        let mut controller = controller_with_term("cat");
        controller.replace_results(vec![item("a")]);

        assert!(!controller.can_paginate(PageDirection::Prev));
        assert!(!controller.paginate(PageDirection::Prev));
        assert_eq!(controller.offset(), 0);
        assert_eq!(controller.results().len(), 1);
    }

    #[test]
    fn test_next_requires_term() {
        let mut controller = SearchController::new();
        assert!(!controller.can_paginate(PageDirection::Next));
        assert!(!controller.paginate(PageDirection::Next));
        assert_eq!(controller.offset(), 0);
    }

    #[test]
    fn test_next_stops_at_last_page_boundary() {
        let mut controller = controller_with_term("cat");
        while controller.paginate(PageDirection::Next) {}

        assert_eq!(controller.offset(), MAX_OFFSET);
        assert!(!controller.can_paginate(PageDirection::Next));
        assert!(!controller.paginate(PageDirection::Next));
        assert_eq!(controller.offset(), 4990);
        assert!(controller.can_paginate(PageDirection::Prev));
    }

    #[test]
    fn test_paginate_clears_results_immediately() {
        let mut controller = controller_with_term("cat");
        controller.replace_results(vec![item("a"), item("b")]);

        assert!(controller.paginate(PageDirection::Next));
        assert!(controller.results().is_empty());
    }

    #[test]
    fn test_debounced_term_is_recorded_once() {
        let mut controller = SearchController::new();
        controller.apply_debounced("cat");
        controller.apply_debounced("dog");
        controller.apply_debounced("cat");
        controller.apply_debounced("");

        assert_eq!(controller.history().entries(), ["cat", "dog"]);
    }

    #[test]
    fn test_fetch_query_fires_once_per_key_change() {
        let mut controller = SearchController::new();
        assert_eq!(controller.take_fetch_query(), None);

        // Typing alone does not move the fetch key.
        controller.set_term("c");
        controller.set_term("ca");
        controller.set_term("cat");
        assert_eq!(controller.take_fetch_query(), None);

        controller.apply_debounced("cat");
        assert_eq!(controller.take_fetch_query(), Some(SearchQuery::new("cat", 0)));
        assert_eq!(controller.take_fetch_query(), None);
    }

    #[test]
    fn test_offset_change_alone_refetches() {
        let mut controller = controller_with_term("cat");
        controller.paginate(PageDirection::Next);

        assert_eq!(controller.take_fetch_query(), Some(SearchQuery::new("cat", 10)));
    }

    #[test]
    fn test_term_change_on_later_page_refetches_first_page_of_stable_term() {
        let mut controller = controller_with_term("cat");
        controller.paginate(PageDirection::Next);
        controller.take_fetch_query();

        // The offset resets before the new term settles.
        controller.set_term("cats");
        assert_eq!(controller.take_fetch_query(), Some(SearchQuery::new("cat", 0)));

        controller.apply_debounced("cats");
        assert_eq!(controller.take_fetch_query(), Some(SearchQuery::new("cats", 0)));
    }

    #[test]
    fn test_remove_history_item() {
        let mut controller = SearchController::new();
        for term in ["cat", "dog", "owl"] {
            controller.record_history(term);
        }
        assert!(controller.remove_history_item("dog"));
        assert_eq!(controller.history().entries(), ["cat", "owl"]);
    }
}
