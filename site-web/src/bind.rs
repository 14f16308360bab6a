//! Event binding
//!
//! Collects the elements that need listeners while the surface is still owned
//! here, then attaches closures that forward every browser event to the
//! controller through [`App::dispatch`]. Listeners live as long as the page, so
//! closures are leaked with `forget()`.

use js_sys::Array;
use lib_core::{ElementId, NavKey, Point};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    AddEventListenerOptions, Element, Event, EventTarget, HtmlElement, IntersectionObserver,
    IntersectionObserverEntry, IntersectionObserverInit, KeyboardEvent, MouseEvent, Node,
    TouchEvent,
};

use crate::app::App;
use crate::dom::{is_link_with_href, nav_section_id, DomSurface};
use crate::utils::constants::*;
use crate::utils::url::fragment_id;

type Targets = Vec<(ElementId, HtmlElement)>;

/// Elements that receive listeners, with their surface handles.
pub struct Bindings {
    window: web_sys::Window,
    document: web_sys::Document,
    bottom_nav: Targets,
    menu: Option<MenuBinding>,
    external_links: Targets,
    top_register: Targets,
    hover_buttons: Targets,
    touch_targets: Targets,
    reveal_targets: Vec<HtmlElement>,
    images: Targets,
    video_frames: Vec<HtmlElement>,
}

struct MenuBinding {
    hamburger: HtmlElement,
    menu: HtmlElement,
    items: Targets,
}

impl Bindings {
    pub fn collect(surface: &mut DomSurface) -> Self {
        let window = surface.window().clone();
        let document = surface.document().clone();

        let hamburger = document
            .get_element_by_id(HAMBURGER_ID)
            .and_then(|e| e.dyn_into::<HtmlElement>().ok());
        let menu_element = document
            .get_element_by_id(HAMBURGER_MENU_ID)
            .and_then(|e| e.dyn_into::<HtmlElement>().ok());
        let menu = match (hamburger, menu_element) {
            (Some(hamburger), Some(menu)) => {
                let items = menu
                    .query_selector_all(MENU_ITEMS)
                    .map(|list| {
                        (0..list.length())
                            .filter_map(|i| list.item(i))
                            .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
                            .map(|item| (surface.register(item.clone()), item))
                            .collect()
                    })
                    .unwrap_or_default();
                Some(MenuBinding { hamburger, menu, items })
            }
            _ => {
                log::debug!("Hamburger menu not found");
                None
            }
        };

        let external_links = surface
            .bind_targets(EXTERNAL_LINKS)
            .into_iter()
            .filter(|(_, element)| is_link_with_href(element))
            .collect();

        let bindings = Self {
            bottom_nav: surface.bind_targets(BOTTOM_NAV_ITEMS),
            menu,
            external_links,
            top_register: surface.bind_targets(TOP_REGISTER_BUTTON),
            hover_buttons: surface.bind_targets(HOVER_BUTTONS),
            touch_targets: surface.bind_targets(TOUCH_TARGETS),
            reveal_targets: surface.query(REVEAL_TARGETS),
            images: surface.bind_targets(IMAGES),
            video_frames: surface.query(BACKGROUND_VIDEO_FRAME),
            window,
            document,
        };
        log::debug!(
            "Binding {} nav items, {} external links, {} touch targets",
            bindings.bottom_nav.len(),
            bindings.external_links.len(),
            bindings.touch_targets.len()
        );
        bindings
    }

    pub fn attach(self, app: &App) {
        self.attach_navigation(app);
        self.attach_menu(app);
        self.attach_buttons(app);
        self.attach_touch(app);
        self.attach_page(app);
        self.attach_reveal(app);
    }

    fn attach_navigation(&self, app: &App) {
        for (id, item) in &self.bottom_nav {
            let (app, id, element) = (app.clone(), *id, item.clone());
            listen(item, "click", move |event| {
                event.prevent_default();
                event.stop_propagation();
                let section_id = nav_section_id(&element).unwrap_or_default();
                app.dispatch(|c| c.on_nav_item_click(id, &section_id));
            });
        }

        for (id, button) in &self.top_register {
            let (app, id) = (app.clone(), *id);
            listen(button, "click", move |event| {
                event.prevent_default();
                app.dispatch(|c| c.on_top_register_click(id));
            });
        }

        let popstate_app = app.clone();
        listen(&self.window, "popstate", move |_| {
            popstate_app.dispatch(|c| c.on_popstate());
        });

        let scroll_app = app.clone();
        listen_passive(&self.window, "scroll", move |_| {
            scroll_app.dispatch(|c| c.on_scroll());
        });

        let key_app = app.clone();
        listen(&self.document, "keydown", move |event| {
            let Some(key) = event
                .dyn_ref::<KeyboardEvent>()
                .and_then(|e| NavKey::from_key(&e.key()))
            else {
                return;
            };
            if key_app.dispatch(|c| c.on_key(key)) == Some(true) {
                event.prevent_default();
            }
        });
    }

    fn attach_menu(&self, app: &App) {
        let Some(binding) = &self.menu else {
            return;
        };

        let hamburger_app = app.clone();
        listen(&binding.hamburger, "click", move |event| {
            event.prevent_default();
            event.stop_propagation();
            hamburger_app.dispatch(|c| c.on_hamburger_click());
        });

        for (id, item) in &binding.items {
            let (app, id, element) = (app.clone(), *id, item.clone());
            listen(item, "click", move |event| {
                event.prevent_default();
                let section_id = element
                    .get_attribute("href")
                    .and_then(|href| fragment_id(&href));
                if let Some(section_id) = section_id {
                    app.dispatch(|c| c.on_menu_item_click(id, &section_id));
                }
            });
        }

        let (app, hamburger, menu) = (app.clone(), binding.hamburger.clone(), binding.menu.clone());
        listen(&self.document, "click", move |event| {
            let target = event.target().and_then(|t| t.dyn_into::<Node>().ok());
            let inside = hamburger.contains(target.as_ref()) || menu.contains(target.as_ref());
            app.dispatch(|c| c.on_document_click(inside));
        });
    }

    fn attach_buttons(&self, app: &App) {
        for (id, link) in &self.external_links {
            let (app, id) = (app.clone(), *id);
            listen(link, "click", move |event| {
                let pointer = pointer(&event);
                app.dispatch(|c| c.on_external_link_click(id, pointer));
            });
        }

        for (id, button) in &self.hover_buttons {
            let (enter_app, leave_app, click_app, id) = (app.clone(), app.clone(), app.clone(), *id);
            listen(button, "mouseenter", move |_| {
                enter_app.dispatch(|c| c.on_pointer_enter(id));
            });
            listen(button, "mouseleave", move |_| {
                leave_app.dispatch(|c| c.on_pointer_leave(id));
            });
            listen(button, "click", move |event| {
                let pointer = pointer(&event);
                click_app.dispatch(|c| c.on_button_click(id, pointer));
            });
        }
    }

    fn attach_touch(&self, app: &App) {
        for (id, element) in &self.touch_targets {
            let (start_app, end_app, id) = (app.clone(), app.clone(), *id);
            listen_passive(element, "touchstart", move |_| {
                start_app.dispatch(|c| c.on_touch_start(id));
            });
            listen_passive(element, "touchend", move |_| {
                end_app.dispatch(|c| c.on_touch_end(id));
            });
        }

        let start_app = app.clone();
        listen_passive(&self.document, "touchstart", move |event| {
            if let Some(y) = touch_y(&event, false) {
                start_app.dispatch(|c| c.on_swipe_start(y));
            }
        });

        let move_app = app.clone();
        listen_passive(&self.document, "touchmove", move |_| {
            move_app.dispatch(|c| c.on_swipe_move());
        });

        let end_app = app.clone();
        listen_passive(&self.document, "touchend", move |event| {
            if let Some(y) = touch_y(&event, true) {
                end_app.dispatch(|c| c.on_swipe_end(y));
            }
        });
    }

    fn attach_page(&self, app: &App) {
        let visibility_app = app.clone();
        let document = self.document.clone();
        listen(&self.document, "visibilitychange", move |_| {
            let hidden = document.hidden();
            visibility_app.dispatch(|c| c.on_visibility_change(hidden));
        });

        for (id, image) in &self.images {
            let (error_app, load_app, id) = (app.clone(), app.clone(), *id);
            listen(image, "error", move |_| {
                error_app.dispatch(|c| c.on_image_error(id));
            });
            listen(image, "load", move |_| {
                load_app.dispatch(|c| c.on_image_load(id));
            });
        }

        for frame in &self.video_frames {
            let app = app.clone();
            listen(frame, "load", move |_| {
                app.dispatch(|c| c.on_background_video_loaded());
            });
        }
    }

    fn attach_reveal(&self, app: &App) {
        if self.reveal_targets.is_empty() {
            return;
        }

        let app = app.clone();
        let callback = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
            move |entries: Array, _observer: IntersectionObserver| {
                for entry in entries.iter() {
                    let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                        continue;
                    };
                    if !entry.is_intersecting() {
                        continue;
                    }
                    let target: Element = entry.target();
                    app.dispatch(|c| {
                        if let Some(id) = c.surface().find(&target) {
                            c.on_intersect(id);
                        }
                    });
                }
            },
        );

        let options = IntersectionObserverInit::new();
        options.set_threshold(&JsValue::from_f64(REVEAL_THRESHOLD));
        options.set_root_margin(REVEAL_ROOT_MARGIN);

        match IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options) {
            Ok(observer) => {
                for target in &self.reveal_targets {
                    observer.observe(target);
                }
            }
            Err(err) => log::warn!("IntersectionObserver unavailable: {:?}", err),
        }
        callback.forget();
    }
}

/// Window `load`: starts the countdown to hiding the loading screen.
pub fn on_window_load(app: &App) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let app = app.clone();
    listen(&window, "load", move |_| {
        app.dispatch(|c| c.on_window_load());
    });
}

pub fn listen(target: &EventTarget, event: &str, handler: impl FnMut(Event) + 'static) {
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    if let Err(err) = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref()) {
        log::warn!("Could not listen for {}: {:?}", event, err);
    }
    closure.forget();
}

fn listen_passive(target: &EventTarget, event: &str, handler: impl FnMut(Event) + 'static) {
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    let options = AddEventListenerOptions::new();
    options.set_passive(true);
    if let Err(err) = target.add_event_listener_with_callback_and_add_event_listener_options(
        event,
        closure.as_ref().unchecked_ref(),
        &options,
    ) {
        log::warn!("Could not listen for {}: {:?}", event, err);
    }
    closure.forget();
}

fn pointer(event: &Event) -> Point {
    event
        .dyn_ref::<MouseEvent>()
        .map(|e| Point {
            x: f64::from(e.client_x()),
            y: f64::from(e.client_y()),
        })
        .unwrap_or(Point { x: 0.0, y: 0.0 })
}

/// `clientY` of the first touch (`changedTouches` on touch end).
fn touch_y(event: &Event, changed: bool) -> Option<f64> {
    let event = event.dyn_ref::<TouchEvent>()?;
    let touches = if changed {
        event.changed_touches()
    } else {
        event.touches()
    };
    touches.get(0).map(|touch| f64::from(touch.client_y()))
}
