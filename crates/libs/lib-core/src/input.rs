//! # Keyboard and Swipe Input
//!
//! Translates raw key names and touch positions into section steps.

/// Direction of a one-section step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    Forward,
    Backward,
}

/// Keys with a navigation meaning.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavKey {
    /// `ArrowDown` / `PageDown`
    Next,
    /// `ArrowUp` / `PageUp`
    Previous,
    /// `Home`
    First,
    /// `End`
    Last,
    /// `Escape`
    Escape,
}

impl NavKey {
    /// Map a `KeyboardEvent.key` value.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowDown" | "PageDown" => Some(NavKey::Next),
            "ArrowUp" | "PageUp" => Some(NavKey::Previous),
            "Home" => Some(NavKey::First),
            "End" => Some(NavKey::Last),
            "Escape" => Some(NavKey::Escape),
            _ => None,
        }
    }

    /// Whether the browser's own scrolling for this key must be suppressed.
    pub fn prevents_default(self) -> bool {
        !matches!(self, NavKey::Escape)
    }
}

/// Tracks one touch gesture on the document.
#[derive(Clone, Copy, Debug, Default)]
pub struct SwipeTracker {
    start_y: f64,
    moved: bool,
}

impl SwipeTracker {
    pub fn begin(&mut self, y: f64) {
        self.start_y = y;
        self.moved = false;
    }

    /// A touch move means the gesture is a scroll, not a swipe.
    pub fn mark_moved(&mut self) {
        self.moved = true;
    }

    /// Classify the gesture ending at `end_y`.
    ///
    /// Swiping up (finger travels towards the top) steps forward.
    pub fn finish(&self, end_y: f64, threshold: f64) -> Option<Step> {
        if self.moved {
            return None;
        }
        let travel = self.start_y - end_y;
        if travel.abs() <= threshold {
            return None;
        }
        Some(if travel > 0.0 { Step::Forward } else { Step::Backward })
    }
}
