//! Map view configuration and the map collaborator interface.

use crate::poi::{LatLng, PointOfInterest};

/// Zoom level used when focusing a single point
pub const FOCUS_ZOOM: f64 = 7.0;

pub const OSM_TILE_URL: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";
pub const OSM_COPYRIGHT_URL: &str = "https://www.openstreetmap.org/copyright";
pub const OSM_ATTRIBUTION: &str =
    r#"&copy; <a href="https://www.openstreetmap.org/copyright">OpenStreetMap</a> contributors"#;

/// Initial view and tile source
#[derive(Debug, Clone, PartialEq)]
pub struct MapViewConfig {
    pub center: LatLng,
    pub zoom: f64,
    pub tile_url: &'static str,
    pub attribution: &'static str,
    pub max_zoom: f64,
}

impl Default for MapViewConfig {
    fn default() -> Self {
        Self {
            center: LatLng::new(15.0, 80.0),
            zoom: 5.0,
            tile_url: OSM_TILE_URL,
            attribution: OSM_ATTRIBUTION,
            max_zoom: 18.0,
        }
    }
}

/// Path style shared by the area circle and the float marker.
///
/// `radius` is in meters for [`AREA_CIRCLE`] and in pixels for
/// [`FLOAT_MARKER`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleStyle {
    pub radius: f64,
    pub color: &'static str,
    pub fill_color: &'static str,
    pub fill_opacity: f64,
    pub weight: f64,
}

/// Translucent coverage circle drawn around each float
pub const AREA_CIRCLE: CircleStyle = CircleStyle {
    radius: 200_000.0,
    color: "#3498db",
    fill_color: "#3498db",
    fill_opacity: 0.15,
    weight: 1.0,
};

/// Solid clickable marker at each float
pub const FLOAT_MARKER: CircleStyle = CircleStyle {
    radius: 10.0,
    color: "#ffffff",
    fill_color: "#2980b9",
    fill_opacity: 1.0,
    weight: 2.0,
};

/// Popup content bound to a float marker
pub fn float_popup_html(point: &PointOfInterest) -> String {
    format!("<b>{}</b>", point.name)
}

/// The mapping library, as seen by the widgets.
///
/// Implementations own the actual layers; the widgets only hold the opaque
/// [`MapBackend::Marker`] handles they are given back.
pub trait MapBackend {
    type Marker;

    /// Animate the view to `target` at `zoom`
    fn fly_to(&mut self, target: LatLng, zoom: f64);

    /// Place a marker at `point` with its popup (the point name) open
    fn add_search_marker(&mut self, point: &'static PointOfInterest) -> Self::Marker;

    fn remove_search_marker(&mut self, marker: Self::Marker);
}
