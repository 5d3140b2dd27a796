//! # giflens - Terminal GIF Search
//!
//! A terminal client for the Giphy search API. Keystrokes are debounced before they turn into
//! requests, results are paged ten at a time, and every settled search term is kept in an
//! in-session history for quick re-selection.
//!
//! ## Architecture
//!
//! - [`debounce`] - Timer-backed debounced values and streams
//! - [`search`] - Search state controller, history, Giphy client and fetch worker
//! - [`input`] - Terminal input collection and key bindings
//! - [`render`] - Render loop coordination, worker protocol and the ratatui UI
//! - [`app`] - Application core and component wiring
//! - [`config`] - Layered configuration
//! - [`error`] - Centralized error types

// Core modules
pub mod config;
pub mod debounce;
pub mod error;

// Subsystems
pub mod input;
pub mod render;

// Core components
pub mod app;
pub mod search;

// Re-export commonly used types for convenience
pub use error::{GiflensError, Result};

// Public API surface for external usage
pub use app::Application;
pub use config::Config;
pub use debounce::{debounce, Debouncer};
pub use search::{GifSource, GiphyClient, SearchController};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
