//! Test doubles: an in-memory page and a virtual clock.

use std::collections::{HashMap, HashSet};

use crate::config::PageConfig;
use crate::controller::PageController;
use crate::schedule::Task;
use crate::section::Section;
use crate::surface::{
    ElementId, Group, Landmark, NavItem, PageSurface, Rect, RippleGeometry, SectionBox, Visual,
};

pub(crate) const SECTION_HEIGHT: f64 = 800.0;
pub(crate) const EXTERNAL_LINK: ElementId = ElementId(40);
pub(crate) const EVENT_CARDS: [ElementId; 2] = [ElementId(31), ElementId(32)];

pub(crate) fn section_element(section: Section) -> ElementId {
    ElementId(1 + section.index() as u32)
}

pub(crate) fn nav_element(section: Section) -> ElementId {
    ElementId(11 + section.index() as u32)
}

pub(crate) fn landmark_element(landmark: Landmark) -> ElementId {
    let offset = match landmark {
        Landmark::LoadingScreen => 0,
        Landmark::TypingText => 1,
        Landmark::ProgressBar => 2,
        Landmark::Hamburger => 3,
        Landmark::HamburgerMenu => 4,
        Landmark::Body => 5,
        Landmark::BackgroundVideo => 6,
    };
    ElementId(20 + offset)
}

/// In-memory page recording every applied visual.
#[derive(Debug, Default)]
pub(crate) struct FakeSurface {
    pub landmarks: HashMap<Landmark, ElementId>,
    pub groups: HashMap<Group, Vec<ElementId>>,
    pub nav: Vec<NavItem>,
    pub sections: Vec<SectionBox>,
    pub children: HashMap<ElementId, Vec<ElementId>>,
    pub rects: HashMap<ElementId, Rect>,
    pub active: HashSet<ElementId>,
    pub scroll_y: f64,
    pub hash: Option<String>,
    pub applied: Vec<(ElementId, Visual)>,
    pub scrolls: Vec<f64>,
    pub hashes: Vec<String>,
    pub ripples: Vec<(ElementId, RippleGeometry, ElementId)>,
    pub removed: Vec<ElementId>,
    next_id: u32,
}

impl FakeSurface {
    /// A page with nothing on it.
    pub fn bare() -> Self {
        Self {
            next_id: 1000,
            ..Self::default()
        }
    }

    /// The full page contract: five stacked sections, a nav item each, every
    /// landmark, two event cards, two external links, logos and titles.
    pub fn page() -> Self {
        let mut surface = Self::bare();

        for section in Section::ALL {
            surface.sections.push(SectionBox {
                element: section_element(section),
                id: section.id().to_string(),
                top: section.index() as f64 * SECTION_HEIGHT,
                height: SECTION_HEIGHT,
            });
            surface.nav.push(NavItem {
                element: nav_element(section),
                section: Some(section),
            });
        }

        for landmark in [
            Landmark::LoadingScreen,
            Landmark::TypingText,
            Landmark::ProgressBar,
            Landmark::Hamburger,
            Landmark::HamburgerMenu,
            Landmark::Body,
            Landmark::BackgroundVideo,
        ] {
            surface.landmarks.insert(landmark, landmark_element(landmark));
        }

        let sections: Vec<ElementId> = Section::ALL.iter().map(|s| section_element(*s)).collect();
        let mut reveal = sections.clone();
        reveal.extend(EVENT_CARDS);
        surface.groups.insert(Group::Sections, sections);
        surface.groups.insert(Group::RevealTargets, reveal);
        surface
            .groups
            .insert(Group::ExternalLinks, vec![EXTERNAL_LINK, ElementId(41)]);
        surface
            .groups
            .insert(Group::Logos, vec![ElementId(50), ElementId(51)]);
        surface
            .groups
            .insert(Group::Titles, vec![ElementId(60), ElementId(61), ElementId(62)]);

        surface
            .children
            .insert(section_element(Section::Events), EVENT_CARDS.to_vec());
        surface.rects.insert(
            EXTERNAL_LINK,
            Rect { left: 0.0, top: 0.0, width: 120.0, height: 40.0 },
        );
        surface
    }

    pub fn without(mut self, landmark: Landmark) -> Self {
        self.landmarks.remove(&landmark);
        self
    }

    pub fn with_hash(mut self, hash: &str) -> Self {
        self.hash = Some(hash.to_string());
        self
    }

    pub fn visuals(&self, element: ElementId) -> Vec<&Visual> {
        self.applied
            .iter()
            .filter(|(e, _)| *e == element)
            .map(|(_, v)| v)
            .collect()
    }

    pub fn last_visual(&self, element: ElementId) -> Option<&Visual> {
        self.visuals(element).last().copied()
    }

    /// Sections whose nav item currently carries the active class.
    pub fn active_nav(&self) -> Vec<Section> {
        self.nav
            .iter()
            .filter(|item| self.active.contains(&item.element))
            .filter_map(|item| item.section)
            .collect()
    }

    /// Every text written to the typing element, in order.
    pub fn typed(&self) -> Vec<String> {
        let typing = landmark_element(Landmark::TypingText);
        self.visuals(typing)
            .into_iter()
            .filter_map(|v| match v {
                Visual::Text(text) => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn clear_log(&mut self) {
        self.applied.clear();
        self.scrolls.clear();
        self.hashes.clear();
    }
}

impl PageSurface for FakeSurface {
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
        self.sections.iter().find(|b| b.id == section.id()).cloned()
    }

    fn section_boxes(&self) -> Vec<SectionBox> {
        self.sections.clone()
    }

    fn bounding_rect(&self, element: ElementId) -> Option<Rect> {
        self.rects.get(&element).copied()
    }

    fn is_active(&self, element: ElementId) -> bool {
        self.active.contains(&element)
    }

    fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    fn location_hash(&self) -> Option<String> {
        self.hash.clone().filter(|h| !h.is_empty() && h != "#")
    }

    fn apply(&mut self, element: ElementId, visual: Visual) {
        if let Visual::NavHighlight(on) | Visual::MenuOpen(on) = &visual {
            if *on {
                self.active.insert(element);
            } else {
                self.active.remove(&element);
            }
        }
        self.applied.push((element, visual));
    }

    fn scroll_to(&mut self, top: f64) {
        self.scroll_y = top;
        self.scrolls.push(top);
    }

    fn replace_hash(&mut self, fragment: &str) {
        self.hash = Some(fragment.to_string());
        self.hashes.push(fragment.to_string());
    }

    fn spawn_ripple(&mut self, host: ElementId, geometry: RippleGeometry) -> Option<ElementId> {
        let ripple = ElementId(self.next_id);
        self.next_id += 1;
        self.ripples.push((host, geometry, ripple));
        Some(ripple)
    }

    fn remove(&mut self, element: ElementId) {
        self.removed.push(element);
    }
}

struct Pending {
    due: u64,
    seq: u64,
    task: Task,
}

/// Drives a controller on a virtual clock.
pub(crate) struct Harness {
    pub controller: PageController<FakeSurface>,
    pub now: u64,
    seq: u64,
    pending: Vec<Pending>,
}

impl Harness {
    pub fn new(surface: FakeSurface) -> Self {
        Self::with_config(surface, PageConfig::default())
    }

    /// Entropy is pinned to 0 so every jittered delay takes its base value.
    pub fn with_config(surface: FakeSurface, config: PageConfig) -> Self {
        Self {
            controller: PageController::new(surface, config).with_entropy(|| 0.0),
            now: 0,
            seq: 0,
            pending: Vec::new(),
        }
    }

    pub fn dispatch<R>(&mut self, f: impl FnOnce(&mut PageController<FakeSurface>) -> R) -> R {
        let result = f(&mut self.controller);
        self.collect();
        result
    }

    /// Run every task falling due within the next `ms` milliseconds.
    pub fn advance(&mut self, ms: u64) {
        let until = self.now + ms;
        loop {
            self.collect();
            let next = self
                .pending
                .iter()
                .enumerate()
                .filter(|(_, p)| p.due <= until)
                .min_by_key(|(_, p)| (p.due, p.seq))
                .map(|(i, _)| i);
            let Some(index) = next else {
                break;
            };
            let pending = self.pending.remove(index);
            self.now = pending.due;
            self.controller.run(pending.task);
        }
        self.now = until;
    }

    pub fn pending_tasks(&self) -> Vec<&Task> {
        self.pending.iter().map(|p| &p.task).collect()
    }

    pub fn surface(&self) -> &FakeSurface {
        self.controller.surface()
    }

    pub fn surface_mut(&mut self) -> &mut FakeSurface {
        self.controller.surface_mut()
    }

    fn collect(&mut self) {
        for timer in self.controller.take_timers() {
            self.pending.push(Pending {
                due: self.now + u64::from(timer.delay_ms),
                seq: self.seq,
                task: timer.task,
            });
            self.seq += 1;
        }
    }
}
