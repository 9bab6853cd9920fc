//! Headless test harness driving the widgets the way user input would.
//!
//! Time is a manual clock: nothing happens until [`TestHarness::advance`]
//! moves it forward, so transition delays can be checked exactly.

use std::time::Duration;

use shared::{ChatMessage, LatLng, PanelBox, PanelState, PointOfInterest};

use crate::state::{AppSettings, AppState, DisplacementRecord, SearchPin};

/// Headless test harness: application state plus a manual clock
pub struct TestHarness {
    pub state: AppState,
    now: Duration,
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

impl TestHarness {
    /// Create a harness with default settings; the settings file is not read.
    pub fn new() -> Self {
        Self::with_settings(AppSettings::default())
    }

    pub fn with_settings(settings: AppSettings) -> Self {
        Self {
            state: AppState::with_settings(settings),
            now: Duration::ZERO,
        }
    }

    /// Current time on the manual clock
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Move the clock forward and run everything that became due
    pub fn advance(&mut self, by: Duration) {
        self.now += by;
        self.state.tick(self.now);
    }

    // ── Chat panel ────────────────────────────────────────────

    pub fn open_chat(&mut self) {
        self.state.panel.open(self.now);
    }

    pub fn close_chat(&mut self) {
        self.state.panel.close(self.now);
    }

    pub fn toggle_chat(&mut self) {
        self.state.panel.toggle(self.now);
    }

    pub fn panel_state(&self) -> PanelState {
        self.state.panel.state()
    }

    pub fn panel_displayed(&self) -> bool {
        self.state.panel.is_displayed()
    }

    pub fn panel_active(&self) -> bool {
        self.state.panel.is_active()
    }

    /// Type `text` into the chat input and press send
    pub fn send_chat(&mut self, text: &str) -> bool {
        self.state.chat.input = text.to_string();
        self.state.chat.send_message()
    }

    pub fn chat_input(&self) -> &str {
        &self.state.chat.input
    }

    pub fn messages(&self) -> &[ChatMessage] {
        self.state.chat.log.messages()
    }

    // ── Glass effect ──────────────────────────────────────────

    /// Report a new rendered size for the chat panel
    pub fn set_panel_box(&mut self, width: f32, height: f32) {
        self.state.observe_panel_size(width, height);
    }

    pub fn panel_box(&self) -> PanelBox {
        self.state.glass.panel()
    }

    pub fn displacement_map(&self) -> Option<&DisplacementRecord> {
        self.state.glass.last_map()
    }

    pub fn refresh_count(&self) -> usize {
        self.state.glass.refresh_count()
    }

    // ── Search + map ──────────────────────────────────────────

    pub fn type_search(&mut self, text: &str) {
        self.state.search.input = text.to_string();
        self.state.search.input_changed();
    }

    pub fn search_text(&self) -> &str {
        &self.state.search.input
    }

    /// Names of the suggestions currently computed
    pub fn suggestions(&self) -> Vec<&'static str> {
        self.state
            .search
            .autocomplete
            .suggestions()
            .iter()
            .map(|p| p.name)
            .collect()
    }

    pub fn suggestions_visible(&self) -> bool {
        self.state.search.autocomplete.is_visible()
    }

    pub fn click_suggestion(&mut self, index: usize) -> bool {
        self.state.search.select(index, &mut self.state.map)
    }

    /// Click somewhere outside the search input and the suggestion list
    pub fn click_outside(&mut self) {
        self.state.search.autocomplete.document_clicked(false, false);
    }

    /// Click a float marker on the map
    pub fn click_float(&mut self, point: &'static PointOfInterest) {
        self.state.map.focus_float(point);
    }

    pub fn map_center(&self) -> LatLng {
        self.state.map.center()
    }

    pub fn map_zoom(&self) -> f64 {
        self.state.map.zoom()
    }

    pub fn search_pin(&self) -> Option<&SearchPin> {
        self.state.map.search_pin()
    }

    pub fn open_popup(&self) -> Option<&'static str> {
        self.state.map.open_popup()
    }
}
