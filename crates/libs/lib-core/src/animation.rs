//! # Loading Animations
//!
//! Pure state for the loading overlay: the typing cursor and the progress bar.
//! Timing lives in the controller; these types only decide what to show next.

/// Outcome of one typing step.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TypingStep {
    /// The visible prefix of the current message after typing one more character.
    Typed(String),
    /// The current message is fully typed.
    Finished,
}

/// Typing cursor cycling through an ordered list of messages.
#[derive(Clone, Debug)]
pub struct TypingAnimation {
    messages: Vec<String>,
    message: usize,
    chars: usize,
}

impl TypingAnimation {
    pub fn new(messages: Vec<String>) -> Self {
        Self {
            messages,
            message: 0,
            chars: 0,
        }
    }

    /// `(message index, character index)`.
    pub fn cursor(&self) -> (usize, usize) {
        (self.message, self.chars)
    }

    pub fn current_message(&self) -> Option<&str> {
        self.messages.get(self.message).map(String::as_str)
    }

    pub fn step(&mut self) -> TypingStep {
        let Some(message) = self.messages.get(self.message) else {
            return TypingStep::Finished;
        };

        if self.chars < message.chars().count() {
            self.chars += 1;
            TypingStep::Typed(message.chars().take(self.chars).collect())
        } else {
            TypingStep::Finished
        }
    }

    /// Move to the next message, wrapping to the first after the last.
    pub fn advance(&mut self) {
        self.message = (self.message + 1) % self.messages.len().max(1);
        self.chars = 0;
    }

    pub fn reset(&mut self) {
        self.message = 0;
        self.chars = 0;
    }
}

/// Progress bar filling by a fixed increment per step.
#[derive(Clone, Debug, PartialEq)]
pub struct ProgressAnimation {
    value: f64,
    increment: f64,
}

impl ProgressAnimation {
    pub fn new(increment: f64) -> Self {
        Self {
            value: 0.0,
            increment,
        }
    }

    /// Raw accumulated progress (may exceed 100 on the last step).
    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn is_complete(&self) -> bool {
        self.value >= 100.0
    }

    /// Advance one step and return the width to render, `None` once complete.
    pub fn step(&mut self) -> Option<f64> {
        if self.is_complete() {
            return None;
        }
        self.value += self.increment;
        Some(self.value.min(100.0))
    }
}
