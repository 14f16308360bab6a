//! # Page Configuration
//!
//! Timing and geometry knobs for the page controller. Every field has a
//! default matching the shipped site, so pages only override what they need.
//!
//! The web host reads an optional JSON block from the page:
//!
//! ```html
//! <script type="application/json" id="siteConfig">
//!   { "header_offset": 72, "typing_messages": ["BOOTING..."] }
//! </script>
//! ```
//!
//! ```rust
//! use lib_core::PageConfig;
//!
//! let config = PageConfig::from_json(r#"{ "header_offset": 72 }"#).unwrap();
//! assert_eq!(config.header_offset, 72.0);
//! assert_eq!(config.scroll_lookahead, 150.0);
//! ```

use serde::Deserialize;

use crate::error::{Result, SiteError};

/// Page controller configuration.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    /// Height of the fixed header; navigation scrolls sections this far below the viewport top.
    pub header_offset: f64,

    /// Look-ahead added to the scroll position when deciding which section is current.
    pub scroll_lookahead: f64,

    /// Minimum vertical travel (px) for a touch gesture to count as a swipe.
    pub swipe_threshold: f64,

    /// Delay between the window load event and hiding the loading overlay.
    pub load_delay_ms: u32,

    /// Delay before honouring a fragment present at startup (after the overlay is gone).
    pub deep_link_delay_ms: u32,

    /// Time the overlay fade-out gets before the overlay is removed from layout.
    pub overlay_fade_ms: u32,

    /// Messages cycled by the loading typing animation, in order.
    pub typing_messages: Vec<String>,

    /// Base delay between typed characters.
    pub typing_char_ms: u32,

    /// Random extra delay (0..=n) between typed characters.
    pub typing_char_jitter_ms: u32,

    /// How long a fully typed message stays on screen.
    pub typing_hold_ms: u32,

    /// Pause between clearing a message and typing the next one.
    pub typing_pause_ms: u32,

    /// Base delay between progress bar steps.
    pub progress_step_ms: u32,

    /// Random extra delay (0..=n) between progress bar steps.
    pub progress_jitter_ms: u32,

    /// Period of the hue-rotate glitch on the loading overlay.
    pub loading_glitch_interval_ms: u32,

    /// Stagger between section entrance animations.
    pub section_stagger_ms: u32,

    /// Stagger between card animations inside a revealed section.
    pub card_stagger_ms: u32,

    /// Period of the logo glow refresh.
    pub logo_glow_interval_ms: u32,

    /// Period of the random title glitch.
    pub title_glitch_interval_ms: u32,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            header_offset: 60.0,
            scroll_lookahead: 150.0,
            swipe_threshold: 100.0,
            load_delay_ms: 2000,
            deep_link_delay_ms: 2500,
            overlay_fade_ms: 800,
            typing_messages: vec![
                "INITIALIZING SYSTEMS...".to_string(),
                "LOADING ROBOTICS DATA...".to_string(),
                "CONNECTING TO SRC...".to_string(),
                "WELCOME TO THE FUTURE".to_string(),
            ],
            typing_char_ms: 50,
            typing_char_jitter_ms: 50,
            typing_hold_ms: 1000,
            typing_pause_ms: 500,
            progress_step_ms: 100,
            progress_jitter_ms: 100,
            loading_glitch_interval_ms: 2000,
            section_stagger_ms: 200,
            card_stagger_ms: 100,
            logo_glow_interval_ms: 2000,
            title_glitch_interval_ms: 8000,
        }
    }
}

impl PageConfig {
    /// Parse and validate a JSON configuration block.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: PageConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<()> {
        if self.typing_messages.is_empty() {
            return Err(SiteError::Config("typing_messages must not be empty".to_string()));
        }

        for (name, value) in [
            ("header_offset", self.header_offset),
            ("scroll_lookahead", self.scroll_lookahead),
            ("swipe_threshold", self.swipe_threshold),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(SiteError::Config(format!(
                    "{} must be a non-negative number, got {}",
                    name, value
                )));
            }
        }

        // Zero periods would spin the repeating animations without yielding.
        for (name, value) in [
            ("loading_glitch_interval_ms", self.loading_glitch_interval_ms),
            ("logo_glow_interval_ms", self.logo_glow_interval_ms),
            ("title_glitch_interval_ms", self.title_glitch_interval_ms),
            ("progress_step_ms", self.progress_step_ms),
        ] {
            if value == 0 {
                return Err(SiteError::Config(format!("{} must be greater than 0", name)));
            }
        }

        // Blank messages finish at once, so only the hold and pause delays remain.
        let all_blank = self.typing_messages.iter().all(|message| message.is_empty());
        if all_blank && self.typing_hold_ms == 0 && self.typing_pause_ms == 0 {
            return Err(SiteError::Config(
                "typing_messages are all empty while typing_hold_ms and typing_pause_ms are 0"
                    .to_string(),
            ));
        }

        if self.typing_char_ms == 0 && self.typing_char_jitter_ms == 0 {
            return Err(SiteError::Config(
                "typing_char_ms and typing_char_jitter_ms cannot both be 0".to_string(),
            ));
        }

        Ok(())
    }
}
