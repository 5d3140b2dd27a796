//! Rendering subsystem.
//!
//! `protocol` defines the messages exchanged with the fetch worker, `service` holds the render
//! loop state machine, and `ui` draws frames.

pub mod protocol;
pub mod service;
pub mod ui;

pub use protocol::{FetchCommand, FetchResponse, RequestId};
pub use service::RenderLoopState;
