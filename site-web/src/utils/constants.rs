//! Page contract: element ids, selectors and observer settings

// Element ids
pub const LOADING_SCREEN_ID: &str = "loadingScreen";
pub const TYPING_TEXT_ID: &str = "typingText";
pub const PROGRESS_BAR_ID: &str = "progressBar";
pub const HAMBURGER_ID: &str = "hamburger";
pub const HAMBURGER_MENU_ID: &str = "hamburgerMenu";
pub const CONFIG_ELEMENT_ID: &str = "siteConfig";
pub const DYNAMIC_STYLES_ID: &str = "srcDynamicStyles";

// Selectors
pub const BOTTOM_NAV_ITEMS: &str = ".bottom-nav .nav-item";
pub const NAV_ITEMS: &str = ".nav-item";
pub const MENU_ITEMS: &str = ".menu-item";
pub const SECTIONS: &str = ".section";
pub const REVEAL_TARGETS: &str = ".section, .event-card, .timeline-day, .value-item, .contact-card";
pub const REVEAL_CHILDREN: &str = ".event-card, .timeline-day, .value-item, .contact-card";
pub const EXTERNAL_LINKS: &str = ".btn-register, .btn-rulebook, .register-btn-top";
pub const TOP_REGISTER_BUTTON: &str = ".register-btn-top";
pub const HOVER_BUTTONS: &str = ".btn, .register-btn-top, .hamburger";
pub const TOUCH_TARGETS: &str = ".btn, .nav-item, .menu-item, .event-card, .hamburger";
pub const LOGOS: &str = ".nav-logo, .sponsor-logo";
pub const TITLES: &str = ".main-title, .section-title";
pub const BACKGROUND_VIDEO: &str = ".background-video";
pub const BACKGROUND_VIDEO_FRAME: &str = ".background-video iframe";
pub const IMAGES: &str = "img";

// Scroll reveal observer
pub const REVEAL_THRESHOLD: f64 = 0.2;
pub const REVEAL_ROOT_MARGIN: &str = "0px 0px -50px 0px";

// Inline style values
pub const CYAN_TINT: &str = "rgba(0, 255, 255, 0.2)";
pub const NAV_ACTIVE_TINT: &str = "rgba(0, 255, 255, 0.15)";
pub const CYBER_TEXT_SHADOW: &str = "0 0 10px #00ffff, 0 0 20px #00ffff";
pub const CYBER_BOX_SHADOW: &str = "0 0 15px rgba(0, 255, 255, 0.6)";
pub const GLOW_BOX_SHADOW: &str = "0 0 25px rgba(0, 255, 255, 0.8)";
pub const IMAGE_FAILED_ALT: &str = "Image failed to load";
