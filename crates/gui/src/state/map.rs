//! Native map view: camera, flight animation and the search pin.

use std::time::Duration;

use shared::{LatLng, MapBackend, MapViewConfig, PointOfInterest, FOCUS_ZOOM};

use crate::mercator;

/// Length of a `fly_to` animation
pub const FLIGHT_DURATION: Duration = Duration::from_millis(1500);
pub const MIN_ZOOM: f64 = 2.0;

/// Handle of the search pin placed through [`MapBackend::add_search_marker`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchMarkerId(u64);

#[derive(Debug, Clone, PartialEq)]
pub struct SearchPin {
    pub id: SearchMarkerId,
    pub point: &'static PointOfInterest,
    pub popup_open: bool,
}

#[derive(Debug, Clone, Copy)]
struct Flight {
    from_center: LatLng,
    from_zoom: f64,
    to_center: LatLng,
    to_zoom: f64,
    started: Duration,
}

pub struct MapViewState {
    config: MapViewConfig,
    center: LatLng,
    zoom: f64,
    now: Duration,
    flight: Option<Flight>,
    search_pin: Option<SearchPin>,
    /// Name of the float whose popup is open
    open_popup: Option<&'static str>,
    next_marker: u64,
}

impl Default for MapViewState {
    fn default() -> Self {
        Self::new(MapViewConfig::default())
    }
}

impl MapViewState {
    pub fn new(config: MapViewConfig) -> Self {
        Self {
            center: config.center,
            zoom: config.zoom,
            config,
            now: Duration::ZERO,
            flight: None,
            search_pin: None,
            open_popup: None,
            next_marker: 0,
        }
    }

    pub fn config(&self) -> &MapViewConfig {
        &self.config
    }

    pub fn center(&self) -> LatLng {
        self.center
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn is_flying(&self) -> bool {
        self.flight.is_some()
    }

    pub fn search_pin(&self) -> Option<&SearchPin> {
        self.search_pin.as_ref()
    }

    pub fn open_popup(&self) -> Option<&'static str> {
        self.open_popup
    }

    /// Advance the flight animation to `now`
    pub fn tick(&mut self, now: Duration) {
        self.now = now;
        let Some(flight) = self.flight else {
            return;
        };

        let elapsed = now.saturating_sub(flight.started).as_secs_f64();
        let t = (elapsed / FLIGHT_DURATION.as_secs_f64()).min(1.0);
        if t >= 1.0 {
            self.center = flight.to_center;
            self.zoom = flight.to_zoom;
            self.flight = None;
            return;
        }

        // Ease-out cubic
        let k = 1.0 - (1.0 - t).powi(3);
        self.center = LatLng::new(
            lerp(flight.from_center.lat, flight.to_center.lat, k),
            lerp(flight.from_center.lng, flight.to_center.lng, k),
        );
        self.zoom = lerp(flight.from_zoom, flight.to_zoom, k);
    }

    /// Move the view by a screen delta in pixels (drag)
    pub fn pan_pixels(&mut self, dx: f64, dy: f64) {
        self.flight = None;
        let [x, y] = mercator::project(self.center, self.zoom);
        self.center = mercator::unproject([x - dx, y - dy], self.zoom);
    }

    /// Change zoom by `delta` levels, clamped to the allowed range
    pub fn zoom_by(&mut self, delta: f64) {
        self.flight = None;
        self.zoom = (self.zoom + delta).clamp(MIN_ZOOM, self.config.max_zoom);
    }

    /// A float marker was clicked: open its popup and fly to it
    pub fn focus_float(&mut self, point: &'static PointOfInterest) {
        self.show_popup(point.name);
        self.fly_to(point.coords, FOCUS_ZOOM);
    }

    /// Open the popup of a float marker; other popups close
    pub fn show_popup(&mut self, name: &'static str) {
        self.open_popup = Some(name);
        if let Some(pin) = &mut self.search_pin {
            pin.popup_open = false;
        }
    }

    /// Reopen the popup of the search pin, if there is one
    pub fn show_search_popup(&mut self) {
        if let Some(pin) = &mut self.search_pin {
            self.open_popup = None;
            pin.popup_open = true;
        }
    }

    pub fn close_popups(&mut self) {
        self.open_popup = None;
        if let Some(pin) = &mut self.search_pin {
            pin.popup_open = false;
        }
    }
}

impl MapBackend for MapViewState {
    type Marker = SearchMarkerId;

    fn fly_to(&mut self, target: LatLng, zoom: f64) {
        self.flight = Some(Flight {
            from_center: self.center,
            from_zoom: self.zoom,
            to_center: target,
            to_zoom: zoom.clamp(MIN_ZOOM, self.config.max_zoom),
            started: self.now,
        });
    }

    fn add_search_marker(&mut self, point: &'static PointOfInterest) -> SearchMarkerId {
        self.next_marker += 1;
        let id = SearchMarkerId(self.next_marker);
        self.open_popup = None;
        self.search_pin = Some(SearchPin {
            id,
            point,
            popup_open: true,
        });
        id
    }

    fn remove_search_marker(&mut self, marker: SearchMarkerId) {
        if self.search_pin.as_ref().is_some_and(|pin| pin.id == marker) {
            self.search_pin = None;
        }
    }
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}
