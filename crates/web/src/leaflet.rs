//! Leaflet bindings and the browser map backend.

use serde::Serialize;
use shared::map::{self, CircleStyle, MapBackend, MapViewConfig, AREA_CIRCLE, FLOAT_MARKER};
use shared::{LatLng, PointOfInterest, SetupError, FOCUS_ZOOM};
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    /// `L.Map`
    #[wasm_bindgen(js_namespace = L, js_name = Map)]
    #[derive(Clone, Debug)]
    pub type Map;

    #[wasm_bindgen(js_namespace = L, js_name = map)]
    fn create_map(container_id: &str) -> Map;

    #[wasm_bindgen(method, js_name = setView)]
    fn set_view(this: &Map, center: &JsValue, zoom: f64);

    #[wasm_bindgen(method, js_name = flyTo)]
    fn fly_to(this: &Map, center: &JsValue, zoom: f64);

    #[wasm_bindgen(method, js_name = removeLayer)]
    fn remove_layer(this: &Map, layer: &Layer);

    /// Any `L.Layer`: tile layers, circles, markers
    #[wasm_bindgen(js_namespace = L, js_name = Layer)]
    #[derive(Clone, Debug)]
    pub type Layer;

    #[wasm_bindgen(method, js_name = addTo)]
    fn add_to(this: &Layer, map: &Map) -> Layer;

    #[wasm_bindgen(method, js_name = bindPopup)]
    fn bind_popup(this: &Layer, content: &str) -> Layer;

    #[wasm_bindgen(method, js_name = openPopup)]
    fn open_popup(this: &Layer) -> Layer;

    #[wasm_bindgen(method)]
    fn on(this: &Layer, event: &str, handler: &js_sys::Function) -> Layer;

    #[wasm_bindgen(js_namespace = L, js_name = tileLayer)]
    fn tile_layer(url_template: &str, options: &JsValue) -> Layer;

    #[wasm_bindgen(js_namespace = L, js_name = circle)]
    fn circle(latlng: &JsValue, options: &JsValue) -> Layer;

    #[wasm_bindgen(js_namespace = L, js_name = circleMarker)]
    fn circle_marker(latlng: &JsValue, options: &JsValue) -> Layer;

    #[wasm_bindgen(js_namespace = L, js_name = marker)]
    fn marker(latlng: &JsValue) -> Layer;
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TileOptions {
    attribution: &'static str,
    max_zoom: f64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PathOptions {
    radius: f64,
    color: &'static str,
    fill_color: &'static str,
    fill_opacity: f64,
    weight: f64,
}

impl From<&CircleStyle> for PathOptions {
    fn from(style: &CircleStyle) -> Self {
        Self {
            radius: style.radius,
            color: style.color,
            fill_color: style.fill_color,
            fill_opacity: style.fill_opacity,
            weight: style.weight,
        }
    }
}

fn lat_lng(coords: LatLng) -> JsValue {
    js_sys::Array::of2(&JsValue::from_f64(coords.lat), &JsValue::from_f64(coords.lng)).into()
}

/// Fail early when the Leaflet script tag is missing
pub fn ensure_loaded() -> Result<(), SetupError> {
    let loaded = js_sys::Reflect::has(&js_sys::global(), &JsValue::from_str("L")).unwrap_or(false);
    if loaded {
        Ok(())
    } else {
        Err(SetupError::MissingLibrary("L"))
    }
}

/// Marker placed by the search box
pub struct SearchMarker(Layer);

pub struct LeafletMap {
    map: Map,
}

impl LeafletMap {
    /// Create the map in the element `container_id`, with the tile layer attached.
    pub fn create(container_id: &str, config: &MapViewConfig) -> Result<Self, JsValue> {
        let map = create_map(container_id);
        map.set_view(&lat_lng(config.center), config.zoom);

        let tile_options = serde_wasm_bindgen::to_value(&TileOptions {
            attribution: config.attribution,
            max_zoom: config.max_zoom,
        })?;
        tile_layer(config.tile_url, &tile_options).add_to(&map);

        Ok(Self { map })
    }

    /// Draw the coverage circle and the clickable marker of every point.
    pub fn plot_points(&self, points: &'static [PointOfInterest]) -> Result<(), JsValue> {
        let area_options = serde_wasm_bindgen::to_value(&PathOptions::from(&AREA_CIRCLE))?;
        let marker_options = serde_wasm_bindgen::to_value(&PathOptions::from(&FLOAT_MARKER))?;

        for point in points {
            let center = lat_lng(point.coords);
            circle(&center, &area_options).add_to(&self.map);

            let inner = circle_marker(&center, &marker_options)
                .add_to(&self.map)
                .bind_popup(&map::float_popup_html(point));

            let map = self.map.clone();
            let on_click = Closure::<dyn FnMut()>::new(move || map.fly_to(&center, FOCUS_ZOOM));
            inner.on("click", on_click.as_ref().unchecked_ref());
            // Markers live as long as the page
            on_click.forget();
        }
        tracing::debug!(count = points.len(), "float markers plotted");
        Ok(())
    }
}

impl MapBackend for LeafletMap {
    type Marker = SearchMarker;

    fn fly_to(&mut self, target: LatLng, zoom: f64) {
        self.map.fly_to(&lat_lng(target), zoom);
    }

    fn add_search_marker(&mut self, point: &'static PointOfInterest) -> SearchMarker {
        let layer = marker(&lat_lng(point.coords))
            .add_to(&self.map)
            .bind_popup(point.name)
            .open_popup();
        SearchMarker(layer)
    }

    fn remove_search_marker(&mut self, marker: SearchMarker) {
        self.map.remove_layer(&marker.0);
    }
}
