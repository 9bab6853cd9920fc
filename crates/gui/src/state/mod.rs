pub mod chat;
pub mod glass;
pub mod map;
pub mod panel;
pub mod settings;

use std::time::Duration;

use shared::{ocean_floats, Autocomplete, GlassEffect, PanelBox};

use chat::ChatState;
pub use glass::{DisplacementRecord, GlassState, NativeProbe};
pub use map::{MapViewState, SearchMarkerId, SearchPin};
pub use panel::PanelDriver;
pub use settings::{AppSettings, UiSettings};

/// Search box text plus the autocomplete over the ocean floats
pub struct SearchState {
    /// Buffer bound to the text field
    pub input: String,
    pub autocomplete: Autocomplete<SearchMarkerId>,
}

impl Default for SearchState {
    fn default() -> Self {
        Self {
            input: String::new(),
            autocomplete: Autocomplete::new(ocean_floats()),
        }
    }
}

impl SearchState {
    /// Feed the text field buffer to the autocomplete
    pub fn input_changed(&mut self) {
        self.autocomplete.input_changed(&self.input);
    }

    /// Select the suggestion at `index` and focus the map on it
    pub fn select(&mut self, index: usize, map: &mut MapViewState) -> bool {
        match self.autocomplete.select(index, map) {
            Some(point) => {
                self.input = point.name.to_string();
                true
            }
            None => false,
        }
    }
}

/// Combined application state
pub struct AppState {
    pub chat: ChatState,
    pub panel: PanelDriver,
    pub glass: GlassState,
    pub search: SearchState,
    pub map: MapViewState,
    pub settings: AppSettings,
}

impl Default for AppState {
    fn default() -> Self {
        Self::with_settings(AppSettings::load())
    }
}

impl AppState {
    pub fn with_settings(settings: AppSettings) -> Self {
        let glass = GlassState::new(GlassEffect::new(settings.effect.clone()), &NativeProbe);
        Self {
            chat: ChatState::default(),
            panel: PanelDriver::default(),
            glass,
            search: SearchState::default(),
            map: MapViewState::default(),
            settings,
        }
    }

    /// Advance timers and animations to `now` (time since start)
    pub fn tick(&mut self, now: Duration) {
        self.panel.poll(now);
        if self.panel.take_refresh_request() {
            self.glass.refresh();
        }
        self.glass.flush_resize();
        self.map.tick(now);
    }

    /// Record the chat panel's laid-out size
    pub fn observe_panel_size(&mut self, width: f32, height: f32) {
        self.glass
            .observe_size(PanelBox::new(f64::from(width), f64::from(height)));
    }

    /// Earliest time at which `tick` has work to do, if any
    pub fn next_wakeup(&self) -> Option<Duration> {
        self.panel.next_deadline()
    }

    /// Animations in progress that need continuous repaints
    pub fn is_animating(&self) -> bool {
        self.map.is_flying()
    }
}
