//! DOM adapter
//!
//! [`DomSurface`] implements [`PageSurface`] over the live document. Elements of
//! the page contract are looked up once at startup and registered under an
//! [`ElementId`]; geometry is always measured live.

use std::collections::HashMap;

use lib_core::surface::{
    Filter, Group, Keyframes, NavItem, Rect, Reveal, RippleGeometry, SectionBox,
};
use lib_core::{ElementId, Landmark, PageSurface, Section, Visual};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement, ScrollBehavior, ScrollToOptions, Window};

use crate::utils::constants::*;
use crate::utils::overflow::OverflowLock;
use crate::utils::registry::Registry;
use crate::utils::url::fragment_id;

pub struct DomSurface {
    window: Window,
    document: Document,
    elements: Registry<HtmlElement>,
    landmarks: HashMap<Landmark, ElementId>,
    groups: HashMap<Group, Vec<ElementId>>,
    nav: Vec<NavItem>,
    section_targets: HashMap<Section, ElementId>,
    sections: Vec<(ElementId, String)>,
    children: HashMap<ElementId, Vec<ElementId>>,
    overflow: OverflowLock,
}

impl DomSurface {
    pub fn new(window: Window, document: Document) -> Self {
        let mut surface = Self {
            window,
            document,
            elements: Registry::default(),
            landmarks: HashMap::new(),
            groups: HashMap::new(),
            nav: Vec::new(),
            section_targets: HashMap::new(),
            sections: Vec::new(),
            children: HashMap::new(),
            overflow: OverflowLock::default(),
        };
        surface.discover();
        surface
    }

    fn discover(&mut self) {
        for (landmark, id) in [
            (Landmark::LoadingScreen, LOADING_SCREEN_ID),
            (Landmark::TypingText, TYPING_TEXT_ID),
            (Landmark::ProgressBar, PROGRESS_BAR_ID),
            (Landmark::Hamburger, HAMBURGER_ID),
            (Landmark::HamburgerMenu, HAMBURGER_MENU_ID),
        ] {
            if let Some(element) = self.by_id(id) {
                let handle = self.register(element);
                self.landmarks.insert(landmark, handle);
            }
        }
        if let Some(body) = self.document.body() {
            let handle = self.register(body);
            self.landmarks.insert(Landmark::Body, handle);
        }
        if let Some(video) = self.query(BACKGROUND_VIDEO).into_iter().next() {
            let handle = self.register(video);
            self.landmarks.insert(Landmark::BackgroundVideo, handle);
        }

        for section in Section::ALL {
            if let Some(element) = self.by_id(section.id()) {
                let handle = self.register(element);
                self.section_targets.insert(section, handle);
            }
        }

        for element in self.query(NAV_ITEMS) {
            let section = nav_section_id(&element).and_then(|id| id.parse().ok());
            let handle = self.register(element);
            self.nav.push(NavItem { element: handle, section });
        }

        let mut sections = Vec::new();
        for element in self.query(SECTIONS) {
            let id = element.id();
            let handle = self.register(element);
            sections.push(handle);
            if !id.is_empty() {
                self.sections.push((handle, id));
            }
        }
        self.groups.insert(Group::Sections, sections);

        let reveal = self.register_all(REVEAL_TARGETS);
        for parent in &reveal {
            let Some(element) = self.element(*parent).cloned() else {
                continue;
            };
            let cards: Vec<HtmlElement> = query_within(&element, REVEAL_CHILDREN);
            if !cards.is_empty() {
                let handles = cards.into_iter().map(|card| self.register(card)).collect();
                self.children.insert(*parent, handles);
            }
        }
        self.groups.insert(Group::RevealTargets, reveal);

        let links: Vec<ElementId> = self
            .query(EXTERNAL_LINKS)
            .into_iter()
            .filter(is_link_with_href)
            .map(|element| self.register(element))
            .collect();
        self.groups.insert(Group::ExternalLinks, links);

        let logos = self.register_all(LOGOS);
        self.groups.insert(Group::Logos, logos);
        let titles = self.register_all(TITLES);
        self.groups.insert(Group::Titles, titles);

        log::debug!(
            "Registered {} elements ({} nav items, {} sections)",
            self.elements.len(),
            self.nav.len(),
            self.sections.len()
        );
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn element(&self, handle: ElementId) -> Option<&HtmlElement> {
        self.elements.get(handle)
    }

    /// Handle of an already registered element.
    pub fn find(&self, element: &Element) -> Option<ElementId> {
        self.elements
            .position(|known| known.is_same_node(Some(element.as_ref())))
    }

    /// Register `element`, reusing its handle when it is already known.
    pub fn register(&mut self, element: HtmlElement) -> ElementId {
        if let Some(handle) = self.find(&element) {
            return handle;
        }
        self.elements.insert(element)
    }

    /// Register every element matching `selector`, in document order.
    pub fn register_all(&mut self, selector: &str) -> Vec<ElementId> {
        self.query(selector)
            .into_iter()
            .map(|element| self.register(element))
            .collect()
    }

    /// Like [`register_all`](Self::register_all), keeping the elements for listener binding.
    pub fn bind_targets(&mut self, selector: &str) -> Vec<(ElementId, HtmlElement)> {
        self.query(selector)
            .into_iter()
            .map(|element| (self.register(element.clone()), element))
            .collect()
    }

    pub fn query(&self, selector: &str) -> Vec<HtmlElement> {
        match self.document.query_selector_all(selector) {
            Ok(list) => (0..list.length())
                .filter_map(|i| list.item(i))
                .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
                .collect(),
            Err(err) => {
                log::warn!("Invalid selector {}: {:?}", selector, err);
                Vec::new()
            }
        }
    }

    fn by_id(&self, id: &str) -> Option<HtmlElement> {
        self.document
            .get_element_by_id(id)?
            .dyn_into::<HtmlElement>()
            .ok()
    }

    fn measure(&self, handle: ElementId, id: String) -> Option<SectionBox> {
        let element = self.element(handle)?;
        Some(SectionBox {
            element: handle,
            id,
            top: f64::from(element.offset_top()),
            height: f64::from(element.offset_height()),
        })
    }

    fn apply_to(&mut self, element: &HtmlElement, visual: Visual) {
        match visual {
            Visual::NavHighlight(on) => {
                toggle_class(element, "active", on);
                set_style(element, "background", if on { NAV_ACTIVE_TINT } else { "" });
            }
            Visual::MenuOpen(open) => toggle_class(element, "active", open),
            Visual::Text(text) => element.set_text_content(Some(&text)),
            Visual::ProgressWidth(width) => set_style(element, "width", &format!("{}%", width)),
            Visual::Hidden => toggle_class(element, "hidden", true),
            Visual::Collapsed => set_style(element, "display", "none"),
            Visual::ScrollLock(true) => {
                let locked = self.overflow.lock(|| {
                    element
                        .style()
                        .get_property_value("overflow")
                        .unwrap_or_default()
                });
                set_style(element, "overflow", locked);
            }
            Visual::ScrollLock(false) => {
                let previous = self.overflow.unlock();
                set_style(element, "overflow", &previous);
            }
            Visual::CyberEffect => {
                set_style(element, "text-shadow", CYBER_TEXT_SHADOW);
                set_style(element, "box-shadow", CYBER_BOX_SHADOW);
            }
            Visual::CyberFade { keep_shadow } => {
                set_style(element, "text-shadow", "");
                if !keep_shadow {
                    set_style(element, "box-shadow", "");
                }
            }
            Visual::Glow(on) => {
                set_style(element, "box-shadow", if on { GLOW_BOX_SHADOW } else { "" });
                set_style(element, "transform", if on { "translateY(-2px)" } else { "" });
            }
            Visual::Pressed(on) => {
                set_style(element, "transform", if on { "scale(0.95)" } else { "" });
            }
            Visual::Tint(on) => set_style(element, "background", if on { CYAN_TINT } else { "" }),
            Visual::Filter(filter) => set_style(element, "filter", &filter_css(filter)),
            Visual::Reveal(Reveal::Concealed) => {
                set_style(element, "opacity", "0");
                set_style(element, "transform", "translateY(30px)");
                set_style(element, "transition", "opacity 0.6s ease, transform 0.6s ease");
            }
            Visual::Reveal(Reveal::Shown) => {
                set_style(element, "opacity", "1");
                set_style(element, "transform", "translateY(0)");
                toggle_class(element, "animate-in", true);
            }
            Visual::Reveal(Reveal::Entered { duration_ms }) => {
                set_style(element, "opacity", "1");
                set_style(element, "transform", "translateY(0)");
                set_style(
                    element,
                    "animation",
                    &format!("fadeInUp {}s ease forwards", f64::from(duration_ms) / 1000.0),
                );
            }
            Visual::Animation(Some(Keyframes::Glitch)) => {
                set_style(element, "animation", "glitch 0.3s ease")
            }
            Visual::Animation(None) => set_style(element, "animation", ""),
            Visual::Opacity(opacity) => set_style(element, "opacity", &opacity.to_string()),
            Visual::ImageFailed => {
                set_style(element, "opacity", "0.3");
                set_attribute(element, "alt", IMAGE_FAILED_ALT);
            }
            Visual::ExternalLink => {
                set_attribute(element, "target", "_blank");
                set_attribute(element, "rel", "noopener noreferrer");
            }
            Visual::AnimationsPaused(paused) => set_style(
                element,
                "animation-play-state",
                if paused { "paused" } else { "running" },
            ),
        }
    }
}

impl PageSurface for DomSurface {
    fn landmark(&self, landmark: Landmark) -> Option<ElementId> {
        self.landmarks.get(&landmark).copied()
    }

    fn group(&self, group: Group) -> Vec<ElementId> {
        self.groups.get(&group).cloned().unwrap_or_default()
    }

    fn nav_items(&self) -> Vec<NavItem> {
        self.nav.clone()
    }

    fn reveal_children(&self, parent: ElementId) -> Vec<ElementId> {
        self.children.get(&parent).cloned().unwrap_or_default()
    }

    fn section_box(&self, section: Section) -> Option<SectionBox> {
        let handle = *self.section_targets.get(&section)?;
        self.measure(handle, section.id().to_string())
    }

    fn section_boxes(&self) -> Vec<SectionBox> {
        self.sections
            .iter()
            .filter_map(|(handle, id)| self.measure(*handle, id.clone()))
            .collect()
    }

    fn bounding_rect(&self, element: ElementId) -> Option<Rect> {
        let rect = self.element(element)?.get_bounding_client_rect();
        Some(Rect {
            left: rect.left(),
            top: rect.top(),
            width: rect.width(),
            height: rect.height(),
        })
    }

    fn is_active(&self, element: ElementId) -> bool {
        self.element(element)
            .is_some_and(|el| el.class_list().contains("active"))
    }

    fn scroll_y(&self) -> f64 {
        self.window.scroll_y().unwrap_or(0.0)
    }

    fn location_hash(&self) -> Option<String> {
        self.window
            .location()
            .hash()
            .ok()
            .filter(|hash| !hash.is_empty() && hash != "#")
    }

    fn apply(&mut self, element: ElementId, visual: Visual) {
        let Some(target) = self.element(element).cloned() else {
            log::trace!("Skipping {:?} on missing element {:?}", visual, element);
            return;
        };
        self.apply_to(&target, visual);
    }

    fn scroll_to(&mut self, top: f64) {
        let options = ScrollToOptions::new();
        options.set_top(top);
        options.set_behavior(ScrollBehavior::Smooth);
        self.window.scroll_to_with_scroll_to_options(&options);
    }

    fn replace_hash(&mut self, fragment: &str) {
        let result = self
            .window
            .history()
            .and_then(|history| history.replace_state_with_url(&JsValue::NULL, "", Some(fragment)));
        if let Err(err) = result {
            log::warn!("Could not update URL fragment: {:?}", err);
        }
    }

    fn spawn_ripple(&mut self, host: ElementId, geometry: RippleGeometry) -> Option<ElementId> {
        let host_element = self.element(host)?.clone();
        let ripple = self
            .document
            .create_element("div")
            .ok()?
            .dyn_into::<HtmlElement>()
            .ok()?;

        set_attribute(
            &ripple,
            "style",
            &format!(
                "position: absolute; border-radius: 50%; background: rgba(0, 255, 255, 0.6); \
                transform: scale(0); animation: ripple 0.6s linear; \
                left: {}px; top: {}px; width: {}px; height: {}px; \
                pointer-events: none; z-index: 1000;",
                geometry.left, geometry.top, geometry.size, geometry.size
            ),
        );
        set_style(&host_element, "position", "relative");
        set_style(&host_element, "overflow", "hidden");

        if let Err(err) = host_element.append_child(&ripple) {
            log::debug!("Could not attach ripple: {:?}", err);
            return None;
        }
        // Freshly created, so no lookup is needed.
        Some(self.elements.insert(ripple))
    }

    fn remove(&mut self, element: ElementId) {
        if let Some(el) = self.elements.remove(element) {
            el.remove();
            log::trace!(
                "Removed element {:?} ({} live, {} slots)",
                element,
                self.elements.len(),
                self.elements.capacity()
            );
        }
    }
}

/// `data-section`, falling back to the fragment of `href`.
pub fn nav_section_id(element: &Element) -> Option<String> {
    element
        .get_attribute("data-section")
        .filter(|id| !id.is_empty())
        .or_else(|| element.get_attribute("href").and_then(|href| fragment_id(&href)))
}

pub fn is_link_with_href(element: &HtmlElement) -> bool {
    element.tag_name().eq_ignore_ascii_case("a")
        && element
            .get_attribute("href")
            .is_some_and(|href| !href.is_empty())
}

fn query_within(parent: &HtmlElement, selector: &str) -> Vec<HtmlElement> {
    parent
        .query_selector_all(selector)
        .map(|list| {
            (0..list.length())
                .filter_map(|i| list.item(i))
                .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
                .collect()
        })
        .unwrap_or_default()
}

fn filter_css(filter: Filter) -> String {
    match filter {
        Filter::None => "none".to_string(),
        Filter::HueRotate(degrees) => format!("hue-rotate({}deg)", degrees),
        Filter::DropShadow(blur) => format!("drop-shadow(0 0 {}px #00ffff)", blur),
    }
}

fn set_style(element: &HtmlElement, property: &str, value: &str) {
    if let Err(err) = element.style().set_property(property, value) {
        log::debug!("Could not set {}: {:?}", property, err);
    }
}

fn set_attribute(element: &HtmlElement, name: &str, value: &str) {
    if let Err(err) = element.set_attribute(name, value) {
        log::debug!("Could not set attribute {}: {:?}", name, err);
    }
}

fn toggle_class(element: &HtmlElement, class: &str, on: bool) {
    let result = if on {
        element.class_list().add_1(class)
    } else {
        element.class_list().remove_1(class)
    };
    if let Err(err) = result {
        log::debug!("Could not toggle class {}: {:?}", class, err);
    }
}
