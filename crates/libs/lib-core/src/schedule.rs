//! # Timer Tasks
//!
//! Every deferred action of the controller is a [`Task`] value pushed into a
//! [`TimerQueue`] with a delay. The host drains the queue after each dispatch,
//! waits out each delay and hands the task back to
//! [`PageController::run`](crate::PageController::run).
//!
//! Loops reschedule themselves from `run`. Loading loops carry the animation
//! generation they were started with; a tick from an older generation, or one
//! arriving after loading ended, is dropped.

use crate::section::Section;
use crate::surface::ElementId;

/// A deferred controller action.
#[derive(Clone, Debug, PartialEq)]
pub enum Task {
    /// Type the next character of the current message.
    TypeNext { generation: u64 },
    /// Clear a finished message and move to the next one.
    TypeAdvance { generation: u64 },
    ProgressStep { generation: u64 },
    LoadingGlitch { generation: u64 },
    ClearFilter(ElementId),
    /// End of the loading phase.
    FinishLoading,
    /// Remove the faded loading overlay from layout.
    CollapseLoadingScreen,
    RevealSection(ElementId),
    RevealCard(ElementId),
    LogoGlow,
    TitleGlitch,
    ClearAnimation(ElementId),
    FadeCyberEffect(ElementId),
    ReleasePress(ElementId),
    RemoveRipple(ElementId),
    DeepLink(Section),
}

/// A task due `delay_ms` after it was scheduled.
#[derive(Clone, Debug, PartialEq)]
pub struct Timer {
    pub delay_ms: u32,
    pub task: Task,
}

/// Outbox of timers waiting to be handed to the host.
#[derive(Debug, Default)]
pub struct TimerQueue {
    pending: Vec<Timer>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, delay_ms: u32, task: Task) {
        self.pending.push(Timer { delay_ms, task });
    }

    /// Take every timer scheduled since the last drain, in scheduling order.
    pub fn drain(&mut self) -> Vec<Timer> {
        std::mem::take(&mut self.pending)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drain_empties_queue_in_order() {
        let mut queue = TimerQueue::new();
        queue.schedule(100, Task::FinishLoading);
        queue.schedule(0, Task::LogoGlow);
        assert_eq!(queue.len(), 2);

        let timers = queue.drain();
        assert!(queue.is_empty());
        assert_eq!(timers[0].task, Task::FinishLoading);
        assert_eq!(timers[1], Timer { delay_ms: 0, task: Task::LogoGlow });
    }
}
