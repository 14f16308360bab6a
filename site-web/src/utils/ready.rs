//! `document.readyState`

use web_sys::Document;

/// Loading phase reported by `document.readyState`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadyState {
    Loading,
    Interactive,
    Complete,
}

impl ReadyState {
    pub fn of(document: &Document) -> Self {
        Self::parse(&document.ready_state())
    }

    /// Unknown values count as `Interactive`: the DOM is there, `load` may not be.
    pub fn parse(value: &str) -> Self {
        match value {
            "loading" => Self::Loading,
            "complete" => Self::Complete,
            _ => Self::Interactive,
        }
    }

    /// Whether `DOMContentLoaded` has already fired.
    pub fn dom_ready(self) -> bool {
        self != Self::Loading
    }

    /// Whether the window `load` event has already fired.
    pub fn loaded(self) -> bool {
        self == Self::Complete
    }
}
