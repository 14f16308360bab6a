//! Page configuration embedded in the document

use lib_core::PageConfig;
use web_sys::Document;

use super::constants::CONFIG_ELEMENT_ID;

/// Read the optional `<script type="application/json" id="siteConfig">` block.
///
/// Missing or empty blocks give the defaults. An invalid block is logged and
/// ignored so a typo never takes the page down.
pub fn load_page_config(document: &Document) -> PageConfig {
    let Some(block) = document.get_element_by_id(CONFIG_ELEMENT_ID) else {
        return PageConfig::default();
    };

    let json = block.text_content().unwrap_or_default();
    if json.trim().is_empty() {
        return PageConfig::default();
    }

    match PageConfig::from_json(&json) {
        Ok(config) => {
            log::info!("Loaded site config from #{}", CONFIG_ELEMENT_ID);
            config
        }
        Err(err) => {
            log::warn!("Ignoring site config: {}", err);
            PageConfig::default()
        }
    }
}
