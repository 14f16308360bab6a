//! SRC Robotics Competition site - controller host
//!
//! Owns the single [`PageController`] behind `Rc<RefCell<_>>`, turns its timer
//! requests into `gloo-timers` timeouts and feeds due tasks back in.

use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::future::TimeoutFuture;
use lib_core::{PageConfig, PageController, SiteError, Timer};

use crate::bind::{self, Bindings};
use crate::dom::DomSurface;
use crate::utils::ready::ReadyState;

pub type Controller = PageController<DomSurface>;

/// Cheap, clonable handle to the page controller.
#[derive(Clone)]
pub struct App {
    controller: Rc<RefCell<Controller>>,
}

impl App {
    /// Discover the page, bind every listener and initialise the controller.
    pub fn start(config: PageConfig) -> Result<Self, SiteError> {
        let window = web_sys::window().ok_or(SiteError::MissingElement("window"))?;
        let document = window
            .document()
            .ok_or(SiteError::MissingElement("document"))?;

        let mut surface = DomSurface::new(window, document.clone());
        let bindings = Bindings::collect(&mut surface);

        let controller = PageController::new(surface, config).with_entropy(js_sys::Math::random);
        let app = Self {
            controller: Rc::new(RefCell::new(controller)),
        };

        bindings.attach(&app);
        app.dispatch(|c| c.init());

        // The load event may already be behind us when the module starts late.
        if ReadyState::of(&document).loaded() {
            app.dispatch(|c| c.on_window_load());
        } else {
            bind::on_window_load(&app);
        }

        log::info!("SRC site controller started");
        Ok(app)
    }

    /// Run `f` against the controller, then schedule the timers it requested.
    ///
    /// Returns `None` when the controller is already borrowed; events are never
    /// nested on the single UI thread, so this only guards against re-entrant
    /// DOM callbacks.
    pub fn dispatch<R>(&self, f: impl FnOnce(&mut Controller) -> R) -> Option<R> {
        let (result, timers) = {
            let Ok(mut controller) = self.controller.try_borrow_mut() else {
                log::warn!("Controller busy, dropping event");
                return None;
            };
            let result = f(&mut controller);
            (result, controller.take_timers())
        };

        for timer in timers {
            self.spawn_timer(timer);
        }
        Some(result)
    }

    fn spawn_timer(&self, timer: Timer) {
        let app = self.clone();
        wasm_bindgen_futures::spawn_local(async move {
            TimeoutFuture::new(timer.delay_ms).await;
            app.dispatch(move |c| c.run(timer.task));
        });
    }
}
