//! Fixed points of interest shown on the map and offered by the search box.

use serde::{Deserialize, Serialize};

/// Geographic coordinate in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// `[lat, lng]` pair, the shape mapping libraries expect
    pub fn to_array(self) -> [f64; 2] {
        [self.lat, self.lng]
    }
}

/// A named point on the map. Names are unique across the set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointOfInterest {
    pub name: &'static str,
    pub coords: LatLng,
}

/// The ocean floats plotted at startup, in display order.
pub const OCEAN_FLOATS: [PointOfInterest; 5] = [
    PointOfInterest {
        name: "Gujarat Coast Float",
        coords: LatLng::new(21.0, 67.5),
    },
    PointOfInterest {
        name: "Konkan Coast Float",
        coords: LatLng::new(16.5, 71.5),
    },
    PointOfInterest {
        name: "Malabar Coast Float",
        coords: LatLng::new(9.0, 74.5),
    },
    PointOfInterest {
        name: "Coromandel Coast Float",
        coords: LatLng::new(15.0, 83.5),
    },
    PointOfInterest {
        name: "Andaman Sea Float",
        coords: LatLng::new(12.0, 94.0),
    },
];

pub fn ocean_floats() -> &'static [PointOfInterest] {
    &OCEAN_FLOATS
}

/// Look up a point by its exact name
pub fn find_by_name(name: &str) -> Option<&'static PointOfInterest> {
    OCEAN_FLOATS.iter().find(|p| p.name == name)
}

/// Points whose name contains `query` case-insensitively, in source order.
///
/// An empty query matches nothing: the search box treats it as "no search".
pub fn matching<'a>(points: &'a [PointOfInterest], query: &str) -> Vec<&'a PointOfInterest> {
    let needle = query.to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }
    points
        .iter()
        .filter(|p| p.name.to_lowercase().contains(&needle))
        .collect()
}
