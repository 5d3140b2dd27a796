//! Input subsystem.
//!
//! `raw` polls crossterm; `service` turns raw events into `InputAction`s.

pub mod raw;
pub mod service;

// Public re-exports for convenience. Modules outside this crate should prefer importing
// from `crate::input` rather than reaching into submodules.
pub use service::{InputAction, InputService, KeyBindings};
