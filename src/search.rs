//! Search domain: the controller that owns the search state, the history it keeps, the Giphy
//! client and payload types, and the background fetch worker.

pub mod client;
pub mod controller;
pub mod history;
pub mod payload;
pub mod worker;

pub use client::{GifSource, GiphyClient, DEFAULT_ENDPOINT};
pub use controller::{
    page_of, PageDirection, SearchController, SearchQuery, MAX_OFFSET, PAGE_SIZE,
};
pub use history::SearchHistory;
pub use payload::{ResultItem, SearchPayload};
pub use worker::{fetch_results, fetch_worker_loop};
