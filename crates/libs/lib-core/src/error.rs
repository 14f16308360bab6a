//! # Centralized Error Handling
//!
//! This module defines the crate-wide error type [`SiteError`] used by the page
//! controller and its configuration layer. It follows the `thiserror` pattern.
//!
//! ## Error Categories
//!
//! 1. **Navigation Errors** - a requested section cannot be reached
//!    - [`UnknownSection`](SiteError::UnknownSection) - id outside the fixed section set
//!    - [`SectionNotRendered`](SiteError::SectionNotRendered) - known section, no element on the page
//!
//! 2. **Page Contract Errors** - an expected element is absent
//!    - [`MissingElement`](SiteError::MissingElement)
//!
//! 3. **Configuration Errors** - the embedded config block is malformed
//!    - [`Config`](SiteError::Config) / [`ConfigParse`](SiteError::ConfigParse)
//!
//! None of these ever reach the visitor. Hosts log them and skip the behaviour.
//!
//! ## Usage Example
//!
//! ```rust
//! use lib_core::error::{Result, SiteError};
//! use lib_core::Section;
//!
//! fn parse(id: &str) -> Result<Section> {
//!     id.parse()
//! }
//!
//! assert!(matches!(parse("sponsors"), Err(SiteError::UnknownSection(_))));
//! ```

use thiserror::Error;

use crate::section::Section;

/// Convenience type alias for `Result<T, SiteError>`.
pub type Result<T> = std::result::Result<T, SiteError>;

/// Error type covering every failure the page controller can observe.
#[derive(Debug, Error)]
pub enum SiteError {
    /// The id does not name one of the page sections.
    #[error("Unknown section: {0:?}")]
    UnknownSection(String),

    /// The section is known but its element is not on the page.
    #[error("Section not rendered: {0}")]
    SectionNotRendered(Section),

    /// An element required by a behaviour is missing from the page.
    #[error("Missing element: {0}")]
    MissingElement(&'static str),

    /// Configuration values failed validation.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The configuration block is not valid JSON for [`PageConfig`](crate::PageConfig).
    #[error("Configuration parse error: {0}")]
    ConfigParse(#[from] serde_json::Error),
}

impl SiteError {
    /// Whether the error only means a visual effect is skipped.
    ///
    /// Configuration problems are worth a warning; everything else is expected
    /// on pages that omit optional markup.
    pub fn is_benign(&self) -> bool {
        !matches!(self, SiteError::Config(_) | SiteError::ConfigParse(_))
    }
}
