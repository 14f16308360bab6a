//! # Page Surface
//!
//! The controller never touches a DOM directly. It reads geometry and element
//! handles through [`PageSurface`] and expresses every mutation as a [`Visual`]
//! intent. The web host maps intents onto classes and inline styles; tests
//! record them.

use crate::section::Section;

/// Opaque handle to an element known to the surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub u32);

/// Singleton elements of the page contract.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Landmark {
    /// `#loadingScreen`
    LoadingScreen,
    /// `#typingText`
    TypingText,
    /// `#progressBar`
    ProgressBar,
    /// `#hamburger`
    Hamburger,
    /// `#hamburgerMenu`
    HamburgerMenu,
    /// `document.body`
    Body,
    /// `.background-video`
    BackgroundVideo,
}

/// Element collections of the page contract.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Group {
    /// `.section`, in document order.
    Sections,
    /// `.section, .event-card, .timeline-day, .value-item, .contact-card`
    RevealTargets,
    /// `.btn-register, .btn-rulebook, .register-btn-top` anchors carrying an `href`.
    ExternalLinks,
    /// `.nav-logo, .sponsor-logo`
    Logos,
    /// `.main-title, .section-title`
    Titles,
}

/// A `.nav-item` and the section named by its `data-section`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NavItem {
    pub element: ElementId,
    pub section: Option<Section>,
}

/// Vertical extent of a `.section` element, measured in page coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct SectionBox {
    pub element: ElementId,
    pub id: String,
    pub top: f64,
    pub height: f64,
}

impl SectionBox {
    /// Whether `position` falls in `[top, top + height)`.
    pub fn contains(&self, position: f64) -> bool {
        position >= self.top && position < self.top + self.height
    }

    pub fn section(&self) -> Option<Section> {
        self.id.parse().ok()
    }
}

/// Viewport-relative bounding box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// Viewport-relative pointer position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Placement of a ripple inside its host element.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RippleGeometry {
    pub left: f64,
    pub top: f64,
    pub size: f64,
}

impl RippleGeometry {
    /// A square ripple covering the host, centred on the pointer.
    pub fn centred(host: Rect, pointer: Point) -> Self {
        let size = host.width.max(host.height);
        Self {
            left: pointer.x - host.left - size / 2.0,
            top: pointer.y - host.top - size / 2.0,
            size,
        }
    }
}

/// CSS filter states.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Filter {
    None,
    /// `hue-rotate(<deg>deg)`
    HueRotate(f64),
    /// Cyan `drop-shadow` with the given blur radius.
    DropShadow(f64),
}

/// Scroll-reveal stages.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Reveal {
    /// Transparent and shifted down, waiting for intersection.
    Concealed,
    /// Visible in place with the `animate-in` class.
    Shown,
    /// Visible in place, running `fadeInUp` for the given duration.
    Entered { duration_ms: u32 },
}

/// Named keyframe animations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Keyframes {
    Glitch,
}

/// Intended visual state of one element.
#[derive(Clone, Debug, PartialEq)]
pub enum Visual {
    /// Nav item `active` class plus tint.
    NavHighlight(bool),
    /// `active` class on the hamburger button or its menu.
    MenuOpen(bool),
    Text(String),
    /// Width in percent, already clamped to `0..=100`.
    ProgressWidth(f64),
    /// Adds the `hidden` class (fade-out).
    Hidden,
    /// Removes the element from layout.
    Collapsed,
    /// `true` disables page scroll; `false` restores the previous overflow.
    ScrollLock(bool),
    /// Text and box glow.
    CyberEffect,
    /// Ends the cyber effect. The box glow stays on active elements.
    CyberFade { keep_shadow: bool },
    /// Hover glow and lift.
    Glow(bool),
    /// Touch press scale.
    Pressed(bool),
    /// Touch tint used by navigation items.
    Tint(bool),
    Filter(Filter),
    Reveal(Reveal),
    Animation(Option<Keyframes>),
    Opacity(f64),
    /// Dimmed with replacement alt text.
    ImageFailed,
    /// Opens in a new tab with `rel="noopener noreferrer"`.
    ExternalLink,
    AnimationsPaused(bool),
}

/// DOM adapter used by [`PageController`](crate::PageController).
///
/// Lookups return `None` or an empty list when the page omits the element;
/// the controller then skips the behaviour.
pub trait PageSurface {
    fn landmark(&self, landmark: Landmark) -> Option<ElementId>;

    fn group(&self, group: Group) -> Vec<ElementId>;

    fn nav_items(&self) -> Vec<NavItem>;

    /// Card children animated in when `parent` scrolls into view.
    fn reveal_children(&self, parent: ElementId) -> Vec<ElementId>;

    /// The element whose id is the section's id.
    fn section_box(&self, section: Section) -> Option<SectionBox>;

    /// Every `.section` element with an id, in document order.
    fn section_boxes(&self) -> Vec<SectionBox>;

    fn bounding_rect(&self, element: ElementId) -> Option<Rect>;

    /// Whether the element carries the `active` class.
    fn is_active(&self, element: ElementId) -> bool;

    fn scroll_y(&self) -> f64;

    /// Current URL fragment including `#`, `None` when empty.
    fn location_hash(&self) -> Option<String>;

    fn apply(&mut self, element: ElementId, visual: Visual);

    /// Smooth-scroll the window to `top`.
    fn scroll_to(&mut self, top: f64);

    /// Replace the URL fragment without adding a history entry or scrolling.
    fn replace_hash(&mut self, fragment: &str);

    fn spawn_ripple(&mut self, host: ElementId, geometry: RippleGeometry) -> Option<ElementId>;

    fn remove(&mut self, element: ElementId);
}
