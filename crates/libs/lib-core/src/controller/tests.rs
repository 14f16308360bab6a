use super::*;
use crate::surface::SectionBox;
use crate::testing::*;

fn started() -> Harness {
    let mut harness = Harness::new(FakeSurface::page());
    harness.dispatch(|c| c.init());
    harness
}

fn loaded() -> Harness {
    let mut harness = started();
    harness.dispatch(|c| c.on_window_load());
    harness.advance(2000);
    harness
}

fn loading_ticks(harness: &Harness) -> usize {
    harness
        .pending_tasks()
        .into_iter()
        .filter(|t| {
            matches!(
                t,
                Task::TypeNext { .. }
                    | Task::TypeAdvance { .. }
                    | Task::ProgressStep { .. }
                    | Task::LoadingGlitch { .. }
            )
        })
        .count()
}

// ============================================================================
// NAVIGATION
// ============================================================================

#[test]
fn test_navigate_to_events() {
    let mut harness = started();
    harness.dispatch(|c| c.navigate_to(Section::Events)).unwrap();

    let surface = harness.surface();
    assert_eq!(surface.scrolls, vec![SECTION_HEIGHT - 60.0]);
    assert_eq!(surface.active_nav(), vec![Section::Events]);
    assert_eq!(surface.hashes, vec!["#events".to_string()]);
    assert_eq!(harness.controller.current_section(), Section::Events);
}

#[test]
fn test_every_section_activates_exactly_one_nav_item() {
    let mut harness = started();
    for section in Section::ALL {
        harness.dispatch(|c| c.navigate_to(section)).unwrap();
        assert_eq!(harness.surface().active_nav(), vec![section]);
        assert_eq!(harness.surface().hash.as_deref(), Some(section.fragment().as_str()));
    }
}

#[test]
fn test_navigate_unknown_id_writes_nothing() {
    let mut harness = started();
    harness.surface_mut().clear_log();

    let err = harness.dispatch(|c| c.navigate_to_id("sponsors")).unwrap_err();
    assert!(matches!(err, SiteError::UnknownSection(_)));
    assert!(harness.surface().applied.is_empty());
    assert!(harness.surface().hashes.is_empty());
}

#[test]
fn test_navigate_to_missing_section_element() {
    let mut surface = FakeSurface::page();
    surface.sections.retain(|b| b.id != "about");
    let mut harness = Harness::new(surface);

    let err = harness.dispatch(|c| c.navigate_to(Section::About)).unwrap_err();
    assert!(matches!(err, SiteError::SectionNotRendered(Section::About)));
    assert_eq!(harness.controller.current_section(), Section::Home);
    assert!(harness.surface().scrolls.is_empty());
}

#[test]
fn test_init_highlights_home_and_prepares_page() {
    let harness = started();
    let surface = harness.surface();

    assert_eq!(surface.active_nav(), vec![Section::Home]);
    assert_eq!(surface.last_visual(EXTERNAL_LINK), Some(&Visual::ExternalLink));
    assert_eq!(
        surface.last_visual(EVENT_CARDS[0]),
        Some(&Visual::Reveal(Reveal::Concealed))
    );
    assert!(surface.hashes.is_empty());
}

#[test]
fn test_deep_link_waits_for_loading_screen() {
    let mut harness = Harness::new(FakeSurface::page().with_hash("#timeline"));
    harness.dispatch(|c| c.init());

    harness.advance(2499);
    assert_eq!(harness.controller.current_section(), Section::Home);

    harness.advance(1);
    assert_eq!(harness.controller.current_section(), Section::Timeline);
    assert_eq!(harness.surface().scrolls.last(), Some(&(2.0 * SECTION_HEIGHT - 60.0)));
}

#[test]
fn test_unknown_deep_link_is_ignored() {
    let mut harness = Harness::new(FakeSurface::page().with_hash("#sponsors"));
    harness.dispatch(|c| c.init());
    assert!(!harness
        .pending_tasks()
        .into_iter()
        .any(|t| matches!(t, Task::DeepLink(_))));
}

#[test]
fn test_popstate_follows_fragment() {
    let mut harness = started();
    harness.surface_mut().hash = Some("#about".to_string());
    harness.dispatch(|c| c.on_popstate());
    assert_eq!(harness.controller.current_section(), Section::About);

    harness.surface_mut().hash = None;
    harness.dispatch(|c| c.on_popstate());
    assert_eq!(harness.controller.current_section(), Section::Home);
}

#[test]
fn test_popstate_decodes_fragment() {
    let mut harness = started();
    harness.surface_mut().hash = Some("#%74imeline".to_string());
    harness.dispatch(|c| c.on_popstate());
    assert_eq!(harness.controller.current_section(), Section::Timeline);
    assert_eq!(harness.surface().hash.as_deref(), Some("#timeline"));
}

#[test]
fn test_popstate_ignores_unknown_fragment() {
    let mut harness = started();
    harness.dispatch(|c| c.navigate_to(Section::About)).unwrap();
    harness.surface_mut().hash = Some("#sponsors".to_string());
    harness.dispatch(|c| c.on_popstate());
    assert_eq!(harness.controller.current_section(), Section::About);
}

#[test]
fn test_top_register_button_goes_to_events() {
    let mut harness = started();
    harness.dispatch(|c| c.on_top_register_click(ElementId(42)));
    assert_eq!(harness.controller.current_section(), Section::Events);
    assert_eq!(harness.surface().last_visual(ElementId(42)), Some(&Visual::CyberEffect));
}

// ============================================================================
// SCROLL RECONCILIATION
// ============================================================================

#[test]
fn test_scroll_updates_are_idempotent() {
    let mut harness = started();
    harness.surface_mut().scroll_y = SECTION_HEIGHT + 10.0;
    harness.surface_mut().clear_log();

    assert!(harness.dispatch(|c| c.on_scroll()));
    assert_eq!(harness.controller.current_section(), Section::Events);
    let writes = harness.surface().applied.len();
    assert!(writes > 0);

    for offset in [20.0, 200.0, 500.0] {
        harness.surface_mut().scroll_y = SECTION_HEIGHT + offset;
        assert!(!harness.dispatch(|c| c.on_scroll()));
    }
    assert_eq!(harness.surface().applied.len(), writes);
}

#[test]
fn test_scroll_uses_lookahead() {
    let mut harness = started();
    // 700 + 150 lands inside events.
    harness.surface_mut().scroll_y = 700.0;
    assert!(harness.dispatch(|c| c.on_scroll()));
    assert_eq!(harness.surface().active_nav(), vec![Section::Events]);

    harness.surface_mut().scroll_y = 600.0;
    assert!(harness.dispatch(|c| c.on_scroll()));
    assert_eq!(harness.controller.current_section(), Section::Home);
}

#[test]
fn test_scroll_ignores_foreign_sections() {
    let mut surface = FakeSurface::page();
    surface.sections.push(SectionBox {
        element: ElementId(99),
        id: "sponsors".to_string(),
        top: 5.0 * SECTION_HEIGHT,
        height: SECTION_HEIGHT,
    });
    let mut harness = Harness::new(surface);
    harness.dispatch(|c| c.init());

    harness.surface_mut().scroll_y = 5.0 * SECTION_HEIGHT + 10.0;
    assert!(!harness.dispatch(|c| c.on_scroll()));
    assert_eq!(harness.controller.current_section(), Section::Home);
}

// ============================================================================
// KEYBOARD AND SWIPE
// ============================================================================

#[test]
fn test_keyboard_walks_without_wraparound() {
    let mut harness = started();

    assert!(harness.dispatch(|c| c.on_key(NavKey::Previous)));
    assert_eq!(harness.controller.current_section(), Section::Home);
    assert!(harness.surface().scrolls.is_empty());

    for expected in &Section::ALL[1..] {
        harness.dispatch(|c| c.on_key(NavKey::Next));
        assert_eq!(harness.controller.current_section(), *expected);
    }

    let scrolls = harness.surface().scrolls.len();
    harness.dispatch(|c| c.on_key(NavKey::Next));
    assert_eq!(harness.controller.current_section(), Section::Contact);
    assert_eq!(harness.surface().scrolls.len(), scrolls);
}

#[test]
fn test_home_and_end_keys() {
    let mut harness = started();
    harness.dispatch(|c| c.on_key(NavKey::Last));
    assert_eq!(harness.controller.current_section(), Section::Contact);
    harness.dispatch(|c| c.on_key(NavKey::First));
    assert_eq!(harness.controller.current_section(), Section::Home);
}

#[test]
fn test_escape_closes_menu_without_preventing_default() {
    let mut harness = started();
    harness.dispatch(|c| c.on_hamburger_click());
    assert!(harness.controller.is_menu_open());

    assert!(!harness.dispatch(|c| c.on_key(NavKey::Escape)));
    assert!(!harness.controller.is_menu_open());
}

#[test]
fn test_swipe_steps_one_section() {
    let mut harness = started();

    harness.dispatch(|c| c.on_swipe_start(500.0));
    assert_eq!(harness.dispatch(|c| c.on_swipe_end(350.0)), Some(Section::Events));

    harness.dispatch(|c| c.on_swipe_start(300.0));
    assert_eq!(harness.dispatch(|c| c.on_swipe_end(450.0)), Some(Section::Home));

    harness.dispatch(|c| c.on_swipe_start(300.0));
    assert_eq!(harness.dispatch(|c| c.on_swipe_end(450.0)), None);
    assert_eq!(harness.controller.current_section(), Section::Home);
}

#[test]
fn test_swipe_ignores_scrolls_and_short_moves() {
    let mut harness = started();

    harness.dispatch(|c| c.on_swipe_start(500.0));
    harness.dispatch(|c| c.on_swipe_move());
    assert_eq!(harness.dispatch(|c| c.on_swipe_end(100.0)), None);

    harness.dispatch(|c| c.on_swipe_start(500.0));
    assert_eq!(harness.dispatch(|c| c.on_swipe_end(420.0)), None);
    assert_eq!(harness.controller.current_section(), Section::Home);
}

#[test]
fn test_swipe_stops_at_last_section() {
    let mut harness = started();
    harness.dispatch(|c| c.navigate_to(Section::Contact)).unwrap();

    harness.dispatch(|c| c.on_swipe_start(600.0));
    assert_eq!(harness.dispatch(|c| c.on_swipe_end(100.0)), None);
    assert_eq!(harness.controller.current_section(), Section::Contact);
}

// ============================================================================
// MENU
// ============================================================================

#[test]
fn test_menu_locks_and_restores_scroll() {
    let mut harness = started();
    let body = landmark_element(Landmark::Body);
    let menu = landmark_element(Landmark::HamburgerMenu);

    harness.dispatch(|c| c.on_hamburger_click());
    assert_eq!(harness.surface().last_visual(body), Some(&Visual::ScrollLock(true)));
    assert_eq!(harness.surface().last_visual(menu), Some(&Visual::MenuOpen(true)));

    harness.dispatch(|c| c.on_hamburger_click());
    assert_eq!(harness.surface().last_visual(body), Some(&Visual::ScrollLock(false)));
    assert_eq!(harness.surface().last_visual(menu), Some(&Visual::MenuOpen(false)));
}

#[test]
fn test_click_outside_closes_menu() {
    let mut harness = started();
    harness.dispatch(|c| c.on_hamburger_click());

    harness.dispatch(|c| c.on_document_click(true));
    assert!(harness.controller.is_menu_open());

    harness.dispatch(|c| c.on_document_click(false));
    assert!(!harness.controller.is_menu_open());
}

#[test]
fn test_closing_closed_menu_writes_nothing() {
    let mut harness = started();
    harness.surface_mut().clear_log();
    harness.dispatch(|c| c.close_menu());
    harness.dispatch(|c| c.on_document_click(false));
    assert!(harness.surface().applied.is_empty());
}

#[test]
fn test_menu_item_navigates_and_closes() {
    let mut harness = started();
    harness.dispatch(|c| c.on_hamburger_click());
    harness.dispatch(|c| c.on_menu_item_click(ElementId(70), "timeline"));

    assert!(!harness.controller.is_menu_open());
    assert_eq!(harness.controller.current_section(), Section::Timeline);
    assert_eq!(
        harness.surface().last_visual(landmark_element(Landmark::Body)),
        Some(&Visual::ScrollLock(false))
    );
}

#[test]
fn test_menu_needs_both_elements() {
    let mut harness = Harness::new(FakeSurface::page().without(Landmark::HamburgerMenu));
    harness.dispatch(|c| c.on_hamburger_click());
    assert!(!harness.controller.is_menu_open());
    assert!(harness.surface().applied.is_empty());
}

// ============================================================================
// LOADING SEQUENCE
// ============================================================================

#[test]
fn test_typing_cycles_messages_in_order() {
    let mut harness = started();
    harness.advance(25_000);
    assert!(harness.controller.is_loading());

    let messages = PageConfig::default().typing_messages;
    let completed: Vec<String> = harness
        .surface()
        .typed()
        .into_iter()
        .filter(|text| messages.contains(text))
        .collect();

    assert!(completed.len() >= messages.len() * 2);
    for (i, text) in completed.iter().enumerate() {
        assert_eq!(text, &messages[i % messages.len()]);
    }
    // Each message is cleared before the next one starts.
    assert!(harness.surface().typed().contains(&String::new()));
}

#[test]
fn test_typing_halts_once_loading_ends() {
    let mut harness = started();
    harness.dispatch(|c| c.on_window_load());
    harness.advance(1999);
    assert!(harness.controller.is_loading());

    harness.advance(1);
    assert!(!harness.controller.is_loading());
    let typed = harness.surface().typed().len();
    let cursor = harness.controller.typing_cursor();

    harness.advance(30_000);
    assert_eq!(harness.surface().typed().len(), typed);
    assert_eq!(harness.controller.typing_cursor(), cursor);
    assert_eq!(loading_ticks(&harness), 0);
}

#[test]
fn test_restart_keeps_a_single_typing_loop() {
    let mut harness = started();
    harness.dispatch(|c| c.start_loading_animation());
    harness.advance(50);
    assert_eq!(harness.surface().typed(), vec!["I", "I", "IN"]);
}

#[test]
fn test_progress_bar_fills_and_stops() {
    let mut harness = started();
    let bar = landmark_element(Landmark::ProgressBar);
    harness.advance(10_000);

    assert_eq!(harness.surface().last_visual(bar), Some(&Visual::ProgressWidth(100.0)));
    let widths = harness.surface().visuals(bar).len();
    // Increment is 2 with zero entropy.
    assert_eq!(widths, 50);
    assert!(!harness
        .pending_tasks()
        .into_iter()
        .any(|t| matches!(t, Task::ProgressStep { .. })));
}

#[test]
fn test_loading_glitch_flashes_overlay() {
    let mut harness = started();
    let screen = landmark_element(Landmark::LoadingScreen);

    harness.advance(2000);
    assert_eq!(
        harness.surface().last_visual(screen),
        Some(&Visual::Filter(Filter::HueRotate(0.0)))
    );
    harness.advance(100);
    assert_eq!(harness.surface().last_visual(screen), Some(&Visual::Filter(Filter::None)));
}

#[test]
fn test_loading_sequence_order() {
    let mut harness = started();
    harness.dispatch(|c| c.on_background_video_loaded());
    harness.dispatch(|c| c.on_window_load());
    harness.advance(2000);

    let screen = landmark_element(Landmark::LoadingScreen);
    let video = landmark_element(Landmark::BackgroundVideo);
    assert_eq!(harness.surface().last_visual(screen), Some(&Visual::Hidden));
    assert_eq!(harness.surface().last_visual(video), Some(&Visual::Opacity(1.0)));

    let hidden_at = harness
        .surface()
        .applied
        .iter()
        .position(|(e, v)| *e == screen && *v == Visual::Hidden)
        .unwrap();
    let video_at = harness
        .surface()
        .applied
        .iter()
        .position(|(e, _)| *e == video)
        .unwrap();
    assert!(hidden_at < video_at);

    harness.advance(800);
    assert_eq!(harness.surface().last_visual(screen), Some(&Visual::Collapsed));

    let entered = Visual::Reveal(Reveal::Entered { duration_ms: 800 });
    for section in Section::ALL {
        assert_eq!(harness.surface().last_visual(section_element(section)), Some(&entered));
    }
}

#[test]
fn test_sections_enter_staggered() {
    let mut harness = started();
    harness.dispatch(|c| c.on_window_load());
    harness.advance(2000 + 250);

    let entered = Visual::Reveal(Reveal::Entered { duration_ms: 800 });
    let surface = harness.surface();
    assert_eq!(surface.last_visual(section_element(Section::Home)), Some(&entered));
    assert_eq!(surface.last_visual(section_element(Section::Events)), Some(&entered));
    assert_ne!(surface.last_visual(section_element(Section::Timeline)), Some(&entered));
}

#[test]
fn test_background_video_loaded_after_loading_ends() {
    let mut harness = loaded();
    let video = landmark_element(Landmark::BackgroundVideo);
    assert!(harness.surface().visuals(video).is_empty());

    harness.dispatch(|c| c.on_background_video_loaded());
    assert_eq!(harness.surface().last_visual(video), Some(&Visual::Opacity(1.0)));
}

#[test]
fn test_finish_loading_runs_once() {
    let mut harness = started();
    harness.dispatch(|c| c.on_window_load());
    harness.dispatch(|c| c.on_window_load());
    harness.advance(2000);

    let screen = landmark_element(Landmark::LoadingScreen);
    let hides = harness
        .surface()
        .visuals(screen)
        .into_iter()
        .filter(|v| **v == Visual::Hidden)
        .count();
    assert_eq!(hides, 1);
}

#[test]
fn test_continuous_animations_after_loading() {
    let mut harness = loaded();
    let first_title = ElementId(60);

    harness.advance(2000);
    assert_eq!(
        harness.surface().last_visual(ElementId(50)),
        Some(&Visual::Filter(Filter::DropShadow(10.0)))
    );

    harness.advance(6000);
    assert_eq!(
        harness.surface().last_visual(first_title),
        Some(&Visual::Animation(Some(Keyframes::Glitch)))
    );
    harness.advance(300);
    assert_eq!(harness.surface().last_visual(first_title), Some(&Visual::Animation(None)));
}

#[test]
fn test_missing_loading_elements_skip_animation() {
    let mut harness = Harness::new(FakeSurface::page().without(Landmark::TypingText));
    harness.dispatch(|c| c.init());
    assert_eq!(loading_ticks(&harness), 0);
    assert!(harness.surface().typed().is_empty());
}

#[test]
fn test_bare_page_degrades_silently() {
    let mut harness = Harness::new(FakeSurface::bare().with_hash("#events"));
    harness.dispatch(|c| c.init());
    harness.dispatch(|c| c.on_window_load());
    harness.dispatch(|c| c.on_hamburger_click());
    harness.dispatch(|c| c.on_key(NavKey::Next));
    harness.dispatch(|c| c.on_scroll());
    harness.dispatch(|c| c.on_visibility_change(true));
    harness.dispatch(|c| c.on_button_click(ElementId(7), Point { x: 1.0, y: 1.0 }));
    harness.advance(12_000);

    assert!(harness.surface().applied.is_empty());
    assert!(harness.surface().scrolls.is_empty());
    assert_eq!(harness.controller.current_section(), Section::Home);
}

// ============================================================================
// EFFECTS
// ============================================================================

#[test]
fn test_cyber_effect_keeps_shadow_on_active_item() {
    let mut harness = started();
    let events = nav_element(Section::Events);
    harness.dispatch(|c| c.on_nav_item_click(events, "events"));
    assert_eq!(harness.surface().last_visual(events), Some(&Visual::CyberEffect));

    harness.advance(500);
    assert_eq!(
        harness.surface().last_visual(events),
        Some(&Visual::CyberFade { keep_shadow: true })
    );

    let button = ElementId(80);
    harness.dispatch(|c| c.cyber_effect(button));
    harness.advance(500);
    assert_eq!(
        harness.surface().last_visual(button),
        Some(&Visual::CyberFade { keep_shadow: false })
    );
}

#[test]
fn test_hover_glow_sticks_on_active_elements() {
    let mut harness = started();
    let home = nav_element(Section::Home);
    let button = ElementId(80);

    harness.dispatch(|c| c.on_pointer_enter(home));
    harness.dispatch(|c| c.on_pointer_leave(home));
    assert_eq!(harness.surface().last_visual(home), Some(&Visual::Glow(true)));

    harness.dispatch(|c| c.on_pointer_enter(button));
    harness.dispatch(|c| c.on_pointer_leave(button));
    assert_eq!(harness.surface().last_visual(button), Some(&Visual::Glow(false)));
}

#[test]
fn test_external_link_click_ripples() {
    let mut harness = started();
    harness.dispatch(|c| c.on_external_link_click(EXTERNAL_LINK, Point { x: 60.0, y: 20.0 }));

    let (host, geometry, ripple) = harness.surface().ripples[0];
    assert_eq!(host, EXTERNAL_LINK);
    assert_eq!(geometry, RippleGeometry { left: 0.0, top: -40.0, size: 120.0 });

    harness.advance(599);
    assert!(harness.surface().removed.is_empty());
    harness.advance(1);
    assert_eq!(harness.surface().removed, vec![ripple]);
}

#[test]
fn test_touch_feedback_on_nav_items() {
    let mut harness = started();
    let events = nav_element(Section::Events);
    let home = nav_element(Section::Home);

    harness.dispatch(|c| c.on_touch_start(events));
    assert!(harness.surface().visuals(events).contains(&&Visual::Tint(true)));
    harness.dispatch(|c| c.on_touch_end(events));
    harness.advance(150);
    assert_eq!(harness.surface().last_visual(events), Some(&Visual::Tint(false)));

    harness.dispatch(|c| c.on_touch_start(home));
    harness.dispatch(|c| c.on_touch_end(home));
    harness.advance(150);
    assert_eq!(harness.surface().last_visual(home), Some(&Visual::Pressed(false)));
}

#[test]
fn test_intersection_staggers_cards() {
    let mut harness = started();
    let events = section_element(Section::Events);
    harness.dispatch(|c| c.on_intersect(events));
    assert_eq!(harness.surface().last_visual(events), Some(&Visual::Reveal(Reveal::Shown)));

    let entered = Visual::Reveal(Reveal::Entered { duration_ms: 600 });
    harness.advance(0);
    assert_eq!(harness.surface().last_visual(EVENT_CARDS[0]), Some(&entered));
    assert_ne!(harness.surface().last_visual(EVENT_CARDS[1]), Some(&entered));
    harness.advance(100);
    assert_eq!(harness.surface().last_visual(EVENT_CARDS[1]), Some(&entered));
}

#[test]
fn test_visibility_and_images() {
    let mut harness = started();
    let body = landmark_element(Landmark::Body);
    let image = ElementId(90);

    harness.dispatch(|c| c.on_visibility_change(true));
    assert_eq!(harness.surface().last_visual(body), Some(&Visual::AnimationsPaused(true)));
    harness.dispatch(|c| c.on_visibility_change(false));
    assert_eq!(harness.surface().last_visual(body), Some(&Visual::AnimationsPaused(false)));

    harness.dispatch(|c| c.on_image_error(image));
    assert_eq!(harness.surface().last_visual(image), Some(&Visual::ImageFailed));
    harness.dispatch(|c| c.on_image_load(image));
    assert_eq!(harness.surface().last_visual(image), Some(&Visual::Opacity(1.0)));
}
