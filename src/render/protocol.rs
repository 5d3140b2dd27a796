//! Protocol definitions shared between the render coordinator and the fetch worker.

use crate::search::{ResultItem, SearchQuery};

/// Identifier attached to every fetch so responses can be matched to the latest request.
pub type RequestId = u64;

/// Commands sent from the render coordinator to the fetch worker.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchCommand {
    Search {
        request_id: RequestId,
        query: SearchQuery,
    },
    Shutdown,
}

/// Responses emitted by the fetch worker back to the coordinator.
///
/// Failed fetches arrive as `Completed` with no items; the worker has already logged them.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchResponse {
    Completed {
        request_id: RequestId,
        query: SearchQuery,
        items: Vec<ResultItem>,
    },
}
