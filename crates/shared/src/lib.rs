//! Platform-independent core of the FloatChat widget bundle.
//!
//! Everything here is plain data and pure logic. The browser crate and the
//! native egui crate both drive these types and only differ in how they
//! paint, measure and schedule.

pub mod autocomplete;
pub mod capability;
pub mod chat;
pub mod effect;
pub mod error;
pub mod map;
pub mod panel;
pub mod poi;

pub use autocomplete::Autocomplete;
pub use capability::{detect_glass_style, CapabilityProbe, GlassStyle};
pub use chat::{ChatLog, ChatMessage, ChatRole};
pub use effect::{EffectSettings, FilterSettings, GlassEffect, PanelBox, RefreshDebounce};
pub use error::SetupError;
pub use map::{MapBackend, MapViewConfig, FOCUS_ZOOM};
pub use panel::{PanelController, PanelEffect, PanelState, PanelTimings, TimerToken};
pub use poi::{ocean_floats, LatLng, PointOfInterest, OCEAN_FLOATS};
