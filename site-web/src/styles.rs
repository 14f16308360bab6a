//! Styles injected at startup
//!
//! Keyframes and helper classes referenced by inline styles the controller
//! applies (`ripple`, `animate-in`), plus scrollbar/selection colours and the
//! forced background video visibility.

use web_sys::Document;

use crate::utils::constants::DYNAMIC_STYLES_ID;

pub const DYNAMIC_STYLES: &str = r#"
    @keyframes ripple {
        to {
            transform: scale(4);
            opacity: 0;
        }
    }

    @keyframes pulse {
        0%, 100% { transform: scale(1); }
        50% { transform: scale(1.05); }
    }

    @keyframes neonFlicker {
        0%, 100% { opacity: 1; }
        50% { opacity: 0.9; }
    }

    .animate-in {
        animation: fadeInUp 0.8s ease forwards;
    }

    .cyber-glow {
        animation: neonFlicker 3s infinite;
    }

    ::-webkit-scrollbar {
        width: 8px;
    }

    ::-webkit-scrollbar-track {
        background: rgba(10, 15, 28, 0.8);
    }

    ::-webkit-scrollbar-thumb {
        background: linear-gradient(45deg, #00ffff, #00d4ff);
        border-radius: 4px;
        box-shadow: 0 0 10px rgba(0, 255, 255, 0.5);
    }

    ::selection {
        background: rgba(0, 255, 255, 0.3);
        color: #ffffff;
    }

    .background-video,
    .background-video iframe {
        opacity: 1 !important;
        visibility: visible !important;
    }
"#;

/// Append [`DYNAMIC_STYLES`] to `<head>` once.
pub fn inject_dynamic_styles(document: &Document) {
    if document.get_element_by_id(DYNAMIC_STYLES_ID).is_some() {
        return;
    }
    let Some(head) = document.head() else {
        log::warn!("No <head>; dynamic styles skipped");
        return;
    };

    let style = match document.create_element("style") {
        Ok(style) => style,
        Err(err) => {
            log::warn!("Could not create style element: {:?}", err);
            return;
        }
    };
    style.set_id(DYNAMIC_STYLES_ID);
    style.set_text_content(Some(DYNAMIC_STYLES));

    if let Err(err) = head.append_child(&style) {
        log::warn!("Could not inject dynamic styles: {:?}", err);
    }
}
