//! # Core Library
//!
//! Platform-independent page controller for the SRC robotics competition site:
//! section navigation, loading animations, menu and input handling, expressed
//! against the [`PageSurface`] DOM adapter so it runs (and is tested) without a
//! browser.
//!
//! ## Structure
//!
//! - **[`controller`]**: [`PageController`], the single owner of UI state
//! - **[`surface`]**: [`PageSurface`] trait and the [`Visual`] intents it applies
//! - **[`schedule`]**: deferred [`Task`]s and the [`TimerQueue`] outbox
//! - **[`animation`]**: typing cursor and progress bar state
//! - **[`input`]**: keyboard mapping and swipe detection
//! - **[`section`]**: the fixed, ordered [`Section`] set
//! - **[`config`]**: [`PageConfig`] with serde defaults
//! - **[`error`]**: [`SiteError`] and the [`Result`] alias

pub mod animation;
pub mod config;
pub mod controller;
pub mod error;
pub mod input;
pub mod schedule;
pub mod section;
pub mod surface;

#[cfg(test)]
pub(crate) mod testing;

// Re-export commonly used types
pub use config::PageConfig;
pub use controller::PageController;
pub use error::{Result, SiteError};
pub use input::NavKey;
pub use schedule::{Task, Timer, TimerQueue};
pub use section::Section;
pub use surface::{ElementId, Landmark, PageSurface, Point, Visual};
