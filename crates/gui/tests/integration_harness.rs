//! Integration tests for TestHarness.
//!
//! Drives the chat panel, glass effect, search and map through the headless
//! harness with a manual clock.

use std::time::Duration;

use floatchat_gui_lib::harness::TestHarness;
use floatchat_gui_lib::state::map::FLIGHT_DURATION;
use shared::{ChatRole, LatLng, PanelBox, PanelState, FOCUS_ZOOM, OCEAN_FLOATS};

const fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

#[test]
fn test_chat_session_end_to_end() {
    let mut h = TestHarness::new();
    h.set_panel_box(300.0, 200.0);

    h.open_chat();
    assert!(h.panel_displayed());
    assert!(!h.panel_active());

    h.advance(ms(10));
    assert!(h.panel_active());
    assert_eq!(h.panel_state(), PanelState::Active);
    let map = h.displacement_map().unwrap();
    assert_eq!(map.panel, PanelBox::new(300.0, 200.0));
    assert!(map.uri.starts_with("data:image/svg+xml,"));

    assert!(h.send_chat("hello"));
    assert_eq!(h.chat_input(), "");
    let messages = h.messages();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].role, ChatRole::User);
    assert_eq!(messages[0].text, "hello");
    assert_eq!(messages[1].role, ChatRole::Bot);
    assert_eq!(messages[1].text, "I received: \"hello\"");

    h.close_chat();
    assert!(!h.panel_active());
    assert!(h.panel_displayed());
    h.advance(ms(499));
    assert!(h.panel_displayed());
    h.advance(ms(1));
    assert!(!h.panel_displayed());
    assert_eq!(h.panel_state(), PanelState::Hidden);
}

#[test]
fn test_whitespace_message_is_ignored() {
    let mut h = TestHarness::new();
    h.open_chat();
    h.advance(ms(10));

    assert!(!h.send_chat("   "));
    assert!(h.messages().is_empty());
}

#[test]
fn test_reopen_while_closing_cancels_hide() {
    let mut h = TestHarness::new();
    h.open_chat();
    h.advance(ms(10));

    h.close_chat();
    h.advance(ms(200));
    h.open_chat();
    assert_eq!(h.panel_state(), PanelState::Opening);

    h.advance(ms(400));
    assert!(h.panel_displayed());
    assert!(h.panel_active());
    assert_eq!(h.panel_state(), PanelState::Active);
}

#[test]
fn test_toggle_twice_ends_hidden() {
    let mut h = TestHarness::new();
    h.toggle_chat();
    h.toggle_chat();
    h.advance(ms(600));
    assert!(!h.panel_displayed());
    assert!(!h.panel_active());
}

#[test]
fn test_resize_burst_regenerates_map_once() {
    let mut h = TestHarness::new();
    h.open_chat();
    h.advance(ms(10));
    let before = h.refresh_count();

    h.set_panel_box(320.0, 240.0);
    h.set_panel_box(330.0, 240.0);
    h.set_panel_box(340.0, 250.0);
    h.advance(ms(16));

    assert_eq!(h.refresh_count(), before + 1);
    assert_eq!(h.panel_box(), PanelBox::new(340.0, 250.0));
    assert_eq!(
        h.displacement_map().unwrap().panel,
        PanelBox::new(340.0, 250.0)
    );
}

#[test]
fn test_search_selects_and_focuses_map() {
    let mut h = TestHarness::new();
    h.type_search("konkan");
    assert_eq!(h.suggestions(), vec!["Konkan Coast Float"]);
    assert!(h.suggestions_visible());

    assert!(h.click_suggestion(0));
    assert_eq!(h.search_text(), "Konkan Coast Float");
    assert!(!h.suggestions_visible());

    h.advance(FLIGHT_DURATION);
    assert_eq!(h.map_center(), LatLng::new(16.5, 71.5));
    assert_eq!(h.map_zoom(), FOCUS_ZOOM);

    let pin = h.search_pin().unwrap();
    assert_eq!(pin.point.name, "Konkan Coast Float");
    assert!(pin.popup_open);
}

#[test]
fn test_second_selection_replaces_marker() {
    let mut h = TestHarness::new();
    h.type_search("konkan");
    h.click_suggestion(0);
    let first = h.search_pin().unwrap().id;

    h.type_search("andaman");
    h.click_suggestion(0);
    let pin = h.search_pin().unwrap();
    assert_ne!(pin.id, first);
    assert_eq!(pin.point.name, "Andaman Sea Float");

    h.advance(FLIGHT_DURATION);
    assert_eq!(h.map_center(), LatLng::new(12.0, 94.0));
}

#[test]
fn test_search_matching_is_case_insensitive() {
    let mut h = TestHarness::new();
    h.type_search("COAST");
    assert_eq!(h.suggestions().len(), 4);

    h.type_search("");
    assert!(h.suggestions().is_empty());
    assert!(!h.suggestions_visible());

    h.type_search("atlantic");
    assert!(h.suggestions().is_empty());
    assert!(!h.suggestions_visible());
}

#[test]
fn test_outside_click_dismisses_suggestions() {
    let mut h = TestHarness::new();
    h.type_search("sea");
    assert!(h.suggestions_visible());

    h.click_outside();
    assert!(!h.suggestions_visible());
    assert_eq!(h.suggestions(), vec!["Andaman Sea Float"]);
    assert!(h.search_pin().is_none());
}

#[test]
fn test_out_of_range_suggestion_is_ignored() {
    let mut h = TestHarness::new();
    h.type_search("malabar");
    assert!(!h.click_suggestion(3));
    assert!(h.search_pin().is_none());
    assert_eq!(h.map_center(), LatLng::new(15.0, 80.0));
}

#[test]
fn test_float_click_opens_popup_and_flies() {
    let mut h = TestHarness::new();
    h.click_float(&OCEAN_FLOATS[2]);
    assert_eq!(h.open_popup(), Some("Malabar Coast Float"));

    h.advance(FLIGHT_DURATION);
    assert_eq!(h.map_center(), LatLng::new(9.0, 74.5));
    assert_eq!(h.map_zoom(), FOCUS_ZOOM);
}
