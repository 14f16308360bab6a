//! SRC Robotics Competition site
//!
//! Browser front end for the static competition page: loading screen, section
//! navigation (bottom nav, hamburger menu, keyboard, swipe), scroll reveal and
//! the cyber button effects. All behaviour lives in `lib-core`; this crate wires
//! it to the DOM.

use wasm_bindgen::prelude::*;

mod app;
mod bind;
mod dom;
mod styles;
mod utils;

use app::App;
use utils::ready::ReadyState;

#[wasm_bindgen(start)]
pub fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    // Initialize logger
    wasm_logger::init(wasm_logger::Config::default());
    log::info!("SRC Robotics Competition site starting...");

    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        web_sys::console::error_1(&"No document available".into());
        return;
    };

    if ReadyState::of(&document).dom_ready() {
        boot();
    } else {
        bind::listen(&document, "DOMContentLoaded", |_| boot());
    }
}

fn boot() {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };

    styles::inject_dynamic_styles(&document);
    let config = utils::config::load_page_config(&document);

    if let Err(err) = App::start(config) {
        log::error!("Failed to start site controller: {}", err);
    }
}
