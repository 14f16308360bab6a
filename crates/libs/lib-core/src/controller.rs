//! # Page Controller
//!
//! Owns the transient UI state of the page (current section, loading flag,
//! typing cursor, menu state) and turns host events into [`Visual`] intents on
//! a [`PageSurface`] plus deferred [`Task`]s.
//!
//! ## Lifecycle
//!
//! 1. [`PageController::init`] on document ready: initial highlight, external
//!    links, scroll-reveal setup, loading animation, deep link.
//! 2. [`PageController::on_window_load`] schedules the end of the loading phase.
//! 3. Event handlers (`on_*`) run for the lifetime of the page.
//! 4. After every call the host drains [`PageController::take_timers`] and
//!    feeds due tasks back through [`PageController::run`].
//!
//! Every element lookup is optional; a missing element skips its behaviour.

use tracing::{debug, info, trace, warn};

use crate::animation::{ProgressAnimation, TypingAnimation, TypingStep};
use crate::config::PageConfig;
use crate::error::{Result, SiteError};
use crate::input::{NavKey, Step, SwipeTracker};
use crate::schedule::{Task, Timer, TimerQueue};
use crate::section::Section;
use crate::surface::{
    ElementId, Filter, Group, Keyframes, Landmark, PageSurface, Point, Reveal, RippleGeometry,
    Visual,
};

const CYBER_EFFECT_MS: u32 = 500;
const PRESS_RELEASE_MS: u32 = 150;
const RIPPLE_MS: u32 = 600;
const LOADING_GLITCH_FLASH_MS: u32 = 100;
const TITLE_GLITCH_MS: u32 = 300;
const SECTION_ENTRANCE_MS: u32 = 800;
const CARD_ENTRANCE_MS: u32 = 600;

/// Single view controller for the page.
pub struct PageController<S> {
    surface: S,
    config: PageConfig,
    current: Section,
    loading: bool,
    generation: u64,
    typing: TypingAnimation,
    progress: ProgressAnimation,
    menu_open: bool,
    swipe: SwipeTracker,
    video_ready: bool,
    timers: TimerQueue,
    entropy: Box<dyn FnMut() -> f64>,
}

impl<S: PageSurface> PageController<S> {
    pub fn new(surface: S, config: PageConfig) -> Self {
        let typing = TypingAnimation::new(config.typing_messages.clone());
        Self {
            surface,
            config,
            current: Section::first(),
            loading: true,
            generation: 0,
            typing,
            progress: ProgressAnimation::new(0.0),
            menu_open: false,
            swipe: SwipeTracker::default(),
            video_ready: false,
            timers: TimerQueue::new(),
            entropy: Box::new(|| 0.5),
        }
    }

    /// Source of uniform randoms in `[0, 1)` used for jitter and glitch effects.
    pub fn with_entropy(mut self, entropy: impl FnMut() -> f64 + 'static) -> Self {
        self.entropy = Box::new(entropy);
        self
    }

    pub fn current_section(&self) -> Section {
        self.current
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_menu_open(&self) -> bool {
        self.menu_open
    }

    /// `(message index, character index)` of the typing animation.
    pub fn typing_cursor(&self) -> (usize, usize) {
        self.typing.cursor()
    }

    pub fn config(&self) -> &PageConfig {
        &self.config
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Timers scheduled since the last call.
    pub fn take_timers(&mut self) -> Vec<Timer> {
        self.timers.drain()
    }

    // ========================================================================
    // STARTUP
    // ========================================================================

    pub fn init(&mut self) {
        info!("Initializing page controller");
        self.mark_external_links();
        self.start_loading_animation();
        self.conceal_reveal_targets();
        self.highlight(Section::first());
        self.schedule_deep_link();
    }

    fn mark_external_links(&mut self) {
        let links = self.surface.group(Group::ExternalLinks);
        debug!(count = links.len(), "Marking external links");
        for link in links {
            self.surface.apply(link, Visual::ExternalLink);
        }
    }

    fn conceal_reveal_targets(&mut self) {
        for element in self.surface.group(Group::RevealTargets) {
            self.surface.apply(element, Visual::Reveal(Reveal::Concealed));
        }
    }

    fn schedule_deep_link(&mut self) {
        let Some(hash) = self.surface.location_hash() else {
            return;
        };
        match Section::from_fragment(&hash) {
            Some(section) => {
                debug!(%section, "Deep link scheduled");
                self.timers
                    .schedule(self.config.deep_link_delay_ms, Task::DeepLink(section));
            }
            None => debug!(%hash, "Ignoring fragment that names no section"),
        }
    }

    /// Start (or restart) the typing, progress and glitch loops.
    ///
    /// Restarting bumps the animation generation so ticks of the previous run
    /// die out. Does nothing once loading has ended or when the typing text or
    /// progress bar is missing.
    pub fn start_loading_animation(&mut self) {
        if !self.loading {
            return;
        }
        if self.surface.landmark(Landmark::TypingText).is_none()
            || self.surface.landmark(Landmark::ProgressBar).is_none()
        {
            debug!("Loading elements not found");
            return;
        }

        info!("Starting loading animation");
        self.generation += 1;
        let generation = self.generation;

        self.typing.reset();
        let increment = 2.0 + self.random() * 3.0;
        self.progress = ProgressAnimation::new(increment);

        self.run(Task::TypeNext { generation });
        self.run(Task::ProgressStep { generation });
        self.timers.schedule(
            self.config.loading_glitch_interval_ms,
            Task::LoadingGlitch { generation },
        );
    }

    /// Window `load`: the overlay goes away after the configured delay.
    pub fn on_window_load(&mut self) {
        debug!(delay_ms = self.config.load_delay_ms, "Window loaded");
        self.timers
            .schedule(self.config.load_delay_ms, Task::FinishLoading);
    }

    // ========================================================================
    // TASKS
    // ========================================================================

    /// Execute a task whose delay has elapsed.
    pub fn run(&mut self, task: Task) {
        trace!(?task, "Running task");
        match task {
            Task::TypeNext { generation } => self.type_next(generation),
            Task::TypeAdvance { generation } => self.type_advance(generation),
            Task::ProgressStep { generation } => self.progress_step(generation),
            Task::LoadingGlitch { generation } => self.loading_glitch(generation),
            Task::ClearFilter(element) => self.surface.apply(element, Visual::Filter(Filter::None)),
            Task::FinishLoading => self.finish_loading(),
            Task::CollapseLoadingScreen => {
                if let Some(screen) = self.surface.landmark(Landmark::LoadingScreen) {
                    self.surface.apply(screen, Visual::Collapsed);
                }
            }
            Task::RevealSection(element) => self.surface.apply(
                element,
                Visual::Reveal(Reveal::Entered { duration_ms: SECTION_ENTRANCE_MS }),
            ),
            Task::RevealCard(element) => self.surface.apply(
                element,
                Visual::Reveal(Reveal::Entered { duration_ms: CARD_ENTRANCE_MS }),
            ),
            Task::LogoGlow => self.logo_glow(),
            Task::TitleGlitch => self.title_glitch(),
            Task::ClearAnimation(element) => self.surface.apply(element, Visual::Animation(None)),
            Task::FadeCyberEffect(element) => {
                let keep_shadow = self.surface.is_active(element);
                self.surface.apply(element, Visual::CyberFade { keep_shadow });
            }
            Task::ReleasePress(element) => self.release_press(element),
            Task::RemoveRipple(element) => self.surface.remove(element),
            Task::DeepLink(section) => self.navigate_or_log(section.id()),
        }
    }

    fn animation_live(&self, generation: u64) -> bool {
        self.loading && generation == self.generation
    }

    fn type_next(&mut self, generation: u64) {
        if !self.animation_live(generation) {
            return;
        }
        let Some(text) = self.surface.landmark(Landmark::TypingText) else {
            return;
        };

        match self.typing.step() {
            TypingStep::Typed(prefix) => {
                self.surface.apply(text, Visual::Text(prefix));
                let delay = self.jitter(self.config.typing_char_ms, self.config.typing_char_jitter_ms);
                self.timers.schedule(delay, Task::TypeNext { generation });
            }
            TypingStep::Finished => {
                self.timers
                    .schedule(self.config.typing_hold_ms, Task::TypeAdvance { generation });
            }
        }
    }

    fn type_advance(&mut self, generation: u64) {
        if !self.animation_live(generation) {
            return;
        }
        self.typing.advance();
        if let Some(text) = self.surface.landmark(Landmark::TypingText) {
            self.surface.apply(text, Visual::Text(String::new()));
        }
        self.timers
            .schedule(self.config.typing_pause_ms, Task::TypeNext { generation });
    }

    fn progress_step(&mut self, generation: u64) {
        if !self.animation_live(generation) {
            return;
        }
        let Some(bar) = self.surface.landmark(Landmark::ProgressBar) else {
            return;
        };
        if let Some(width) = self.progress.step() {
            self.surface.apply(bar, Visual::ProgressWidth(width));
            let delay = self.jitter(self.config.progress_step_ms, self.config.progress_jitter_ms);
            self.timers.schedule(delay, Task::ProgressStep { generation });
        }
    }

    fn loading_glitch(&mut self, generation: u64) {
        if !self.animation_live(generation) {
            return;
        }
        let Some(screen) = self.surface.landmark(Landmark::LoadingScreen) else {
            return;
        };
        let angle = self.random() * 360.0;
        self.surface.apply(screen, Visual::Filter(Filter::HueRotate(angle)));
        self.timers
            .schedule(LOADING_GLITCH_FLASH_MS, Task::ClearFilter(screen));
        self.timers.schedule(
            self.config.loading_glitch_interval_ms,
            Task::LoadingGlitch { generation },
        );
    }

    fn finish_loading(&mut self) {
        if !self.loading {
            return;
        }
        info!("Hiding loading screen");
        self.loading = false;

        if let Some(screen) = self.surface.landmark(Landmark::LoadingScreen) {
            self.surface.apply(screen, Visual::Hidden);
            self.timers
                .schedule(self.config.overlay_fade_ms, Task::CollapseLoadingScreen);
        }

        self.start_main_animations();
        self.initialize_background_video();
    }

    fn start_main_animations(&mut self) {
        info!("Starting main animations");
        let stagger = self.config.section_stagger_ms;
        for (index, section) in self.surface.group(Group::Sections).into_iter().enumerate() {
            let delay = stagger.saturating_mul(index as u32);
            self.timers.schedule(delay, Task::RevealSection(section));
        }

        self.timers
            .schedule(self.config.logo_glow_interval_ms, Task::LogoGlow);
        self.timers
            .schedule(self.config.title_glitch_interval_ms, Task::TitleGlitch);
    }

    fn logo_glow(&mut self) {
        for logo in self.surface.group(Group::Logos) {
            let blur = 10.0 + self.random() * 10.0;
            self.surface.apply(logo, Visual::Filter(Filter::DropShadow(blur)));
        }
        self.timers
            .schedule(self.config.logo_glow_interval_ms, Task::LogoGlow);
    }

    fn title_glitch(&mut self) {
        let titles = self.surface.group(Group::Titles);
        if !titles.is_empty() {
            let index = ((self.random() * titles.len() as f64) as usize).min(titles.len() - 1);
            let title = titles[index];
            self.surface
                .apply(title, Visual::Animation(Some(Keyframes::Glitch)));
            self.timers
                .schedule(TITLE_GLITCH_MS, Task::ClearAnimation(title));
        }
        self.timers
            .schedule(self.config.title_glitch_interval_ms, Task::TitleGlitch);
    }

    fn initialize_background_video(&mut self) {
        let Some(video) = self.surface.landmark(Landmark::BackgroundVideo) else {
            return;
        };
        if self.video_ready {
            self.surface.apply(video, Visual::Opacity(1.0));
        } else {
            debug!("Background video not loaded yet");
        }
    }

    /// The background video frame finished loading.
    pub fn on_background_video_loaded(&mut self) {
        info!("Background video loaded");
        self.video_ready = true;
        if !self.loading {
            self.initialize_background_video();
        }
    }

    // ========================================================================
    // NAVIGATION
    // ========================================================================

    /// Scroll to a section, highlight it, make it current and update the fragment.
    pub fn navigate_to(&mut self, section: Section) -> Result<()> {
        debug!(%section, "Navigating to section");
        let target = self
            .surface
            .section_box(section)
            .ok_or(SiteError::SectionNotRendered(section))?;

        self.surface.scroll_to(target.top - self.config.header_offset);
        self.highlight(section);
        self.current = section;
        self.surface.replace_hash(&section.fragment());
        Ok(())
    }

    /// [`navigate_to`](Self::navigate_to) by element id.
    pub fn navigate_to_id(&mut self, id: &str) -> Result<()> {
        let section: Section = id.parse()?;
        self.navigate_to(section)
    }

    fn navigate_or_log(&mut self, id: &str) {
        match self.navigate_to_id(id) {
            Err(err) if err.is_benign() => debug!(%err, "Navigation skipped"),
            Err(err) => warn!(%err, "Navigation failed"),
            Ok(()) => {}
        }
    }

    /// Mark the nav items of `section` active and clear every other one.
    pub fn highlight(&mut self, section: Section) {
        trace!(%section, "Updating active navigation");
        for item in self.surface.nav_items() {
            self.surface
                .apply(item.element, Visual::NavHighlight(item.section == Some(section)));
        }
    }

    /// Reconcile the highlight with the scroll position.
    ///
    /// Returns `true` only when the current section changed; repeated calls
    /// within one section write nothing.
    pub fn on_scroll(&mut self) -> bool {
        let position = self.surface.scroll_y() + self.config.scroll_lookahead;
        let Some(section) = self
            .surface
            .section_boxes()
            .iter()
            .filter(|b| b.contains(position))
            .find_map(|b| b.section())
        else {
            return false;
        };

        if section == self.current {
            return false;
        }
        self.highlight(section);
        self.current = section;
        true
    }

    fn step(&mut self, step: Step) -> Option<Section> {
        let target = match step {
            Step::Forward => self.current.next(),
            Step::Backward => self.current.previous(),
        }?;
        match self.navigate_to(target) {
            Ok(()) => Some(target),
            Err(err) => {
                debug!(%err, "Step navigation skipped");
                None
            }
        }
    }

    /// Keyboard navigation. Returns whether the event's default action must be prevented.
    pub fn on_key(&mut self, key: NavKey) -> bool {
        match key {
            NavKey::Next => {
                self.step(Step::Forward);
            }
            NavKey::Previous => {
                self.step(Step::Backward);
            }
            NavKey::First => self.navigate_or_log(Section::first().id()),
            NavKey::Last => self.navigate_or_log(Section::last().id()),
            NavKey::Escape => self.close_menu(),
        }
        key.prevents_default()
    }

    pub fn on_swipe_start(&mut self, y: f64) {
        self.swipe.begin(y);
    }

    pub fn on_swipe_move(&mut self) {
        self.swipe.mark_moved();
    }

    /// End of a document touch. Returns the section navigated to, if any.
    pub fn on_swipe_end(&mut self, y: f64) -> Option<Section> {
        let step = self.swipe.finish(y, self.config.swipe_threshold)?;
        self.step(step)
    }

    /// Browser back/forward: follow the fragment, `home` when it is empty.
    pub fn on_popstate(&mut self) {
        let hash = self.surface.location_hash().unwrap_or_default();
        let section = if hash.trim_start_matches('#').is_empty() {
            Section::first()
        } else {
            match Section::from_fragment(&hash) {
                Some(section) => section,
                None => {
                    debug!(%hash, "Unknown fragment on popstate");
                    return;
                }
            }
        };
        if let Err(err) = self.navigate_to(section) {
            debug!(%err, "Navigation skipped");
        }
    }

    /// Click on a bottom `.nav-item` naming `section_id`.
    pub fn on_nav_item_click(&mut self, element: ElementId, section_id: &str) {
        debug!(section_id, "Nav item clicked");
        if section_id.is_empty() {
            return;
        }
        self.navigate_or_log(section_id);
        self.cyber_effect(element);
    }

    /// Click on a `.menu-item` linking to `section_id`.
    pub fn on_menu_item_click(&mut self, element: ElementId, section_id: &str) {
        debug!(section_id, "Menu item clicked");
        if section_id.is_empty() {
            return;
        }
        self.navigate_or_log(section_id);
        self.close_menu();
        self.cyber_effect(element);
    }

    /// The top register button jumps to the events section.
    pub fn on_top_register_click(&mut self, element: ElementId) {
        self.navigate_or_log(Section::Events.id());
        self.cyber_effect(element);
    }

    // ========================================================================
    // MENU
    // ========================================================================

    fn menu_elements(&self) -> Option<(ElementId, ElementId)> {
        Some((
            self.surface.landmark(Landmark::Hamburger)?,
            self.surface.landmark(Landmark::HamburgerMenu)?,
        ))
    }

    pub fn on_hamburger_click(&mut self) {
        self.toggle_menu();
    }

    pub fn toggle_menu(&mut self) {
        let Some((hamburger, menu)) = self.menu_elements() else {
            return;
        };
        self.menu_open = !self.menu_open;
        let open = self.menu_open;
        debug!(open, "Hamburger menu toggled");

        self.surface.apply(hamburger, Visual::MenuOpen(open));
        self.surface.apply(menu, Visual::MenuOpen(open));
        self.cyber_effect(hamburger);
        if let Some(body) = self.surface.landmark(Landmark::Body) {
            self.surface.apply(body, Visual::ScrollLock(open));
        }
    }

    pub fn close_menu(&mut self) {
        let Some((hamburger, menu)) = self.menu_elements() else {
            return;
        };
        if !self.menu_open {
            return;
        }
        self.menu_open = false;
        debug!("Hamburger menu closed");

        self.surface.apply(hamburger, Visual::MenuOpen(false));
        self.surface.apply(menu, Visual::MenuOpen(false));
        if let Some(body) = self.surface.landmark(Landmark::Body) {
            self.surface.apply(body, Visual::ScrollLock(false));
        }
    }

    /// Any document click; `inside_menu` is true when it landed on the
    /// hamburger button or inside the menu.
    pub fn on_document_click(&mut self, inside_menu: bool) {
        if self.menu_open && !inside_menu {
            self.close_menu();
        }
    }

    // ========================================================================
    // EFFECTS
    // ========================================================================

    /// Transient glow, faded after a fixed delay.
    pub fn cyber_effect(&mut self, element: ElementId) {
        self.surface.apply(element, Visual::CyberEffect);
        self.timers
            .schedule(CYBER_EFFECT_MS, Task::FadeCyberEffect(element));
    }

    pub fn on_pointer_enter(&mut self, element: ElementId) {
        self.surface.apply(element, Visual::Glow(true));
    }

    pub fn on_pointer_leave(&mut self, element: ElementId) {
        if !self.surface.is_active(element) {
            self.surface.apply(element, Visual::Glow(false));
        }
    }

    /// Ripple centred on the pointer, removed once its animation ends.
    pub fn on_button_click(&mut self, element: ElementId, pointer: Point) {
        let Some(rect) = self.surface.bounding_rect(element) else {
            return;
        };
        let geometry = RippleGeometry::centred(rect, pointer);
        if let Some(ripple) = self.surface.spawn_ripple(element, geometry) {
            self.timers.schedule(RIPPLE_MS, Task::RemoveRipple(ripple));
        }
    }

    /// Registration/rulebook links open in a new tab; the click only adds feedback.
    pub fn on_external_link_click(&mut self, element: ElementId, pointer: Point) {
        self.on_button_click(element, pointer);
        self.cyber_effect(element);
        info!("Opening external link");
    }

    fn is_nav_item(&self, element: ElementId) -> bool {
        self.surface
            .nav_items()
            .iter()
            .any(|item| item.element == element)
    }

    /// Touch feedback on interactive elements.
    pub fn on_touch_start(&mut self, element: ElementId) {
        self.surface.apply(element, Visual::Pressed(true));
        if self.is_nav_item(element) {
            self.surface.apply(element, Visual::Tint(true));
        }
        self.cyber_effect(element);
    }

    pub fn on_touch_end(&mut self, element: ElementId) {
        self.timers
            .schedule(PRESS_RELEASE_MS, Task::ReleasePress(element));
    }

    fn release_press(&mut self, element: ElementId) {
        self.surface.apply(element, Visual::Pressed(false));
        if self.is_nav_item(element) && !self.surface.is_active(element) {
            self.surface.apply(element, Visual::Tint(false));
        }
    }

    /// A reveal target scrolled into view.
    pub fn on_intersect(&mut self, element: ElementId) {
        self.surface.apply(element, Visual::Reveal(Reveal::Shown));
        let stagger = self.config.card_stagger_ms;
        for (index, card) in self.surface.reveal_children(element).into_iter().enumerate() {
            self.timers
                .schedule(stagger.saturating_mul(index as u32), Task::RevealCard(card));
        }
    }

    /// Pause body animations while the document is hidden.
    pub fn on_visibility_change(&mut self, hidden: bool) {
        if let Some(body) = self.surface.landmark(Landmark::Body) {
            self.surface.apply(body, Visual::AnimationsPaused(hidden));
        }
    }

    pub fn on_image_error(&mut self, element: ElementId) {
        warn!(?element, "Failed to load image");
        self.surface.apply(element, Visual::ImageFailed);
    }

    pub fn on_image_load(&mut self, element: ElementId) {
        self.surface.apply(element, Visual::Opacity(1.0));
    }

    // ========================================================================
    // HELPERS
    // ========================================================================

    fn random(&mut self) -> f64 {
        (self.entropy)().clamp(0.0, 1.0)
    }

    fn jitter(&mut self, base_ms: u32, spread_ms: u32) -> u32 {
        base_ms.saturating_add((self.random() * spread_ms as f64) as u32)
    }
}

#[cfg(test)]
mod tests;
