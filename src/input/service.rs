//! High-level input service.
//!
//! Consumes raw events, applies the key bindings, and yields domain-level `InputAction`s
//! that the render coordinator consumes.

use crate::error::Result;
use crate::input::raw::{RawInputCollector, RawInputEvent};
use crate::search::PageDirection;
use ratatui::crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Duration;

/// Longest paste accepted into the search box, in characters.
pub const MAX_PASTE_CHARS: usize = 256;

/// High-level input actions emitted by the service.
///
/// Keys whose meaning depends on the history dropdown (`Cancel`, `ToggleHistory`, the history
/// moves) are resolved by the render loop, which owns the dropdown state.
#[derive(Debug, Clone, PartialEq)]
pub enum InputAction {
    /// Append text to the search term
    InsertText(String),
    /// Delete the last character of the search term
    DeleteBackward,
    ClearTerm,
    /// Esc: close the dropdown if it is showing, otherwise quit
    Cancel,
    ToggleHistory,
    HistoryUp,
    /// Opens the dropdown when it is closed
    HistoryDown,
    /// Search for the highlighted history entry
    SelectHistory,
    /// Drop the highlighted history entry
    RemoveHistoryItem,
    Paginate(PageDirection),
    Resize {
        width: u16,
        height: u16,
    },
    Quit,
    NoAction,
    InvalidInput,
}

/// Maps key presses to actions.
pub struct KeyBindings;

impl KeyBindings {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_key_event(&self, key_event: KeyEvent) -> InputAction {
        if key_event.kind == KeyEventKind::Release {
            return InputAction::NoAction;
        }

        let ctrl = key_event.modifiers.contains(KeyModifiers::CONTROL);
        let plain = !key_event
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT);

        match key_event.code {
            KeyCode::Char('c') if ctrl => InputAction::Quit,
            KeyCode::Char('u') | KeyCode::Char('l') if ctrl => InputAction::ClearTerm,
            KeyCode::Char('p') if ctrl => InputAction::Paginate(PageDirection::Prev),
            KeyCode::Char('n') if ctrl => InputAction::Paginate(PageDirection::Next),
            KeyCode::PageUp => InputAction::Paginate(PageDirection::Prev),
            KeyCode::PageDown => InputAction::Paginate(PageDirection::Next),
            KeyCode::Char(ch) if plain => InputAction::InsertText(ch.to_string()),
            KeyCode::Backspace => InputAction::DeleteBackward,

            KeyCode::Esc => InputAction::Cancel,
            KeyCode::Tab => InputAction::ToggleHistory,
            KeyCode::Up => InputAction::HistoryUp,
            KeyCode::Down => InputAction::HistoryDown,
            KeyCode::Enter => InputAction::SelectHistory,
            KeyCode::Delete => InputAction::RemoveHistoryItem,

            _ => InputAction::InvalidInput,
        }
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self::new()
    }
}

/// Service responsible for producing high-level `InputAction`s from terminal events.
pub struct InputService {
    key_bindings: KeyBindings,
    raw_input: RawInputCollector,
}

impl InputService {
    pub fn new() -> Self {
        Self {
            key_bindings: KeyBindings::new(),
            raw_input: RawInputCollector::new(),
        }
    }

    pub fn poll_actions(&mut self, timeout: Option<Duration>) -> Result<Vec<InputAction>> {
        let mut actions = Vec::new();

        if let Some(raw_event) = self.raw_input.poll_event(timeout)? {
            if let Some(action) = self.process_raw_event(raw_event) {
                actions.push(action);
            }

            while let Some(extra_event) = self.raw_input.pop_pending() {
                if let Some(action) = self.process_raw_event(extra_event) {
                    actions.push(action);
                }
            }
        }

        Ok(actions)
    }

    pub fn process_event(&mut self, event: Event) -> Vec<InputAction> {
        let mut actions = Vec::new();
        self.raw_input.process_event(event);
        while let Some(raw_event) = self.raw_input.pop_pending() {
            if let Some(action) = self.process_raw_event(raw_event) {
                actions.push(action);
            }
        }
        actions
    }

    fn process_raw_event(&mut self, event: RawInputEvent) -> Option<InputAction> {
        let action = match event {
            RawInputEvent::Key(key_event) => self.key_bindings.handle_key_event(key_event),
            RawInputEvent::Resize { width, height } => InputAction::Resize { width, height },
            RawInputEvent::Paste(text) => {
                // The search box is a single line
                let text: String = text
                    .chars()
                    .filter(|ch| !ch.is_control())
                    .take(MAX_PASTE_CHARS)
                    .collect();
                if text.is_empty() {
                    InputAction::NoAction
                } else {
                    InputAction::InsertText(text)
                }
            }
        };

        match action {
            InputAction::NoAction | InputAction::InvalidInput => None,
            _ => Some(action),
        }
    }
}

impl Default for InputService {
    fn default() -> Self {
        Self::new()
    }
}
