//! # Page Sections
//!
//! The page is split into a fixed, ordered set of fragment-addressable
//! sections. Keyboard and swipe navigation walk this order without wrapping.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SiteError;

/// One fragment-addressable region of the page.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    Home,
    Events,
    Timeline,
    About,
    Contact,
}

impl Section {
    /// All sections in page order.
    pub const ALL: [Section; 5] = [
        Section::Home,
        Section::Events,
        Section::Timeline,
        Section::About,
        Section::Contact,
    ];

    /// Element id (and URL fragment without `#`).
    pub fn id(self) -> &'static str {
        match self {
            Section::Home => "home",
            Section::Events => "events",
            Section::Timeline => "timeline",
            Section::About => "about",
            Section::Contact => "contact",
        }
    }

    /// Position in page order.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn first() -> Self {
        Section::ALL[0]
    }

    pub fn last() -> Self {
        Section::ALL[Section::ALL.len() - 1]
    }

    /// The following section, `None` at the end of the page.
    pub fn next(self) -> Option<Self> {
        Section::ALL.get(self.index() + 1).copied()
    }

    /// The preceding section, `None` at the top of the page.
    pub fn previous(self) -> Option<Self> {
        self.index().checked_sub(1).map(|i| Section::ALL[i])
    }

    /// URL fragment including the leading `#`.
    pub fn fragment(self) -> String {
        format!("#{}", self.id())
    }

    /// Parse a URL fragment such as `#events` or `events`.
    ///
    /// Percent-encoded fragments are decoded first. Returns `None` for empty
    /// fragments and ids outside the fixed set.
    pub fn from_fragment(fragment: &str) -> Option<Self> {
        let raw = fragment.strip_prefix('#').unwrap_or(fragment);
        if raw.is_empty() {
            return None;
        }
        let decoded = urlencoding::decode(raw)
            .map(|id| id.into_owned())
            .unwrap_or_else(|_| raw.to_string());
        decoded.parse().ok()
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Section {
    type Err = SiteError;

    fn from_str(id: &str) -> Result<Self, Self::Err> {
        Section::ALL
            .iter()
            .copied()
            .find(|section| section.id() == id)
            .ok_or_else(|| SiteError::UnknownSection(id.to_string()))
    }
}
