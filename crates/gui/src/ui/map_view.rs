//! Painted slippy map: graticule base, float circles and markers, the search
//! pin and popups.

use egui::{Color32, FontId, Pos2, Rect, Sense, Stroke, Ui, Vec2};
use shared::map::{CircleStyle, AREA_CIRCLE, FLOAT_MARKER, OSM_COPYRIGHT_URL};
use shared::{ocean_floats, LatLng};

use crate::mercator;
use crate::state::AppState;

const OCEAN: Color32 = Color32::from_rgb(170, 211, 223);
const GRID: Color32 = Color32::from_rgba_premultiplied(60, 90, 110, 70);
const PIN: Color32 = Color32::from_rgb(42, 129, 203);
const GRID_STEP_DEG: f64 = 5.0;
/// Scroll distance for one zoom level
const SCROLL_PER_ZOOM: f32 = 120.0;

/// Screen placement of the current view
struct View {
    rect: Rect,
    center_px: [f64; 2],
    zoom: f64,
}

impl View {
    fn to_screen(&self, coords: LatLng) -> Pos2 {
        let [x, y] = mercator::project(coords, self.zoom);
        self.rect.center()
            + Vec2::new(
                (x - self.center_px[0]) as f32,
                (y - self.center_px[1]) as f32,
            )
    }

    fn to_coords(&self, pos: Pos2) -> LatLng {
        let offset = pos - self.rect.center();
        mercator::unproject(
            [
                self.center_px[0] + f64::from(offset.x),
                self.center_px[1] + f64::from(offset.y),
            ],
            self.zoom,
        )
    }
}

pub fn show(ui: &mut Ui, state: &mut AppState) {
    let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());

    if response.dragged() {
        let delta = response.drag_delta();
        state
            .map
            .pan_pixels(f64::from(delta.x), f64::from(delta.y));
    }
    if response.hovered() {
        let scroll = ui.input(|i| i.smooth_scroll_delta.y);
        if scroll != 0.0 {
            state.map.zoom_by(f64::from(scroll / SCROLL_PER_ZOOM));
        }
    }

    let view = View {
        rect,
        center_px: mercator::project(state.map.center(), state.map.zoom()),
        zoom: state.map.zoom(),
    };

    if response.clicked() {
        if let Some(pos) = response.interact_pointer_pos() {
            handle_click(state, &view, pos);
        }
    }

    let painter = ui.painter_at(rect);
    painter.rect_filled(rect, 0.0, OCEAN);
    paint_graticule(&painter, &view);

    for point in ocean_floats() {
        let center = view.to_screen(point.coords);
        let radius = AREA_CIRCLE.radius / mercator::meters_per_pixel(point.coords.lat, view.zoom);
        paint_circle(&painter, center, radius as f32, &AREA_CIRCLE);
    }
    for point in ocean_floats() {
        paint_circle(
            &painter,
            view.to_screen(point.coords),
            FLOAT_MARKER.radius as f32,
            &FLOAT_MARKER,
        );
    }

    if let Some(pin) = state.map.search_pin() {
        let tip = view.to_screen(pin.point.coords);
        paint_pin(&painter, tip);
        if pin.popup_open {
            paint_popup(&painter, tip - Vec2::new(0.0, 30.0), pin.point.name);
        }
    }
    if let Some(name) = state.map.open_popup() {
        if let Some(point) = ocean_floats().iter().find(|p| p.name == name) {
            let anchor = view.to_screen(point.coords) - Vec2::new(0.0, FLOAT_MARKER.radius as f32);
            paint_popup(&painter, anchor, point.name);
        }
    }

    paint_attribution(ui, rect);
}

/// Marker clicks open that marker's popup; clicks on bare map close popups
fn handle_click(state: &mut AppState, view: &View, pos: Pos2) {
    let hit_radius = (FLOAT_MARKER.radius + FLOAT_MARKER.weight) as f32;
    let float_hit = ocean_floats()
        .iter()
        .find(|p| view.to_screen(p.coords).distance(pos) <= hit_radius);
    if let Some(point) = float_hit {
        state.map.focus_float(point);
        return;
    }

    let pin_hit = state
        .map
        .search_pin()
        .is_some_and(|pin| pin_head(view.to_screen(pin.point.coords)).distance(pos) <= 10.0);
    if pin_hit {
        state.map.show_search_popup();
    } else {
        state.map.close_popups();
    }
}

fn paint_graticule(painter: &egui::Painter, view: &View) {
    let top_left = view.to_coords(view.rect.left_top());
    let bottom_right = view.to_coords(view.rect.right_bottom());
    let stroke = Stroke::new(1.0, GRID);

    let mut lng = (top_left.lng / GRID_STEP_DEG).floor() * GRID_STEP_DEG;
    while lng <= bottom_right.lng {
        let x = view.to_screen(LatLng::new(0.0, lng)).x;
        painter.vline(x, view.rect.y_range(), stroke);
        lng += GRID_STEP_DEG;
    }

    let max_lat = top_left.lat.min(mercator::MAX_LATITUDE);
    let mut lat = (bottom_right.lat.max(-mercator::MAX_LATITUDE) / GRID_STEP_DEG).floor()
        * GRID_STEP_DEG;
    while lat <= max_lat {
        let y = view.to_screen(LatLng::new(lat, 0.0)).y;
        painter.hline(view.rect.x_range(), y, stroke);
        lat += GRID_STEP_DEG;
    }
}

fn paint_circle(painter: &egui::Painter, center: Pos2, radius: f32, style: &CircleStyle) {
    let stroke = hex_color(style.color);
    let fill = hex_color(style.fill_color).gamma_multiply(style.fill_opacity as f32);
    painter.circle(center, radius, fill, Stroke::new(style.weight as f32, stroke));
}

fn pin_head(tip: Pos2) -> Pos2 {
    tip - Vec2::new(0.0, 18.0)
}

fn paint_pin(painter: &egui::Painter, tip: Pos2) {
    let head = pin_head(tip);
    let outline = Stroke::new(1.0, Color32::from_rgb(30, 90, 150));
    painter.add(egui::Shape::convex_polygon(
        vec![tip, head + Vec2::new(7.0, 3.0), head + Vec2::new(-7.0, 3.0)],
        PIN,
        Stroke::NONE,
    ));
    painter.circle(head, 8.0, PIN, outline);
    painter.circle_filled(head, 3.0, Color32::WHITE);
}

fn paint_popup(painter: &egui::Painter, anchor: Pos2, text: &str) {
    let galley = painter.layout_no_wrap(
        text.to_string(),
        FontId::proportional(14.0),
        Color32::from_rgb(20, 20, 20),
    );
    let padding = Vec2::new(10.0, 6.0);
    let size = galley.size() + padding * 2.0;
    let bubble = Rect::from_min_size(
        anchor - Vec2::new(size.x / 2.0, size.y + 8.0),
        size,
    );

    painter.rect_filled(bubble, 6.0, Color32::WHITE);
    painter.add(egui::Shape::convex_polygon(
        vec![
            anchor,
            Pos2::new(anchor.x + 6.0, bubble.bottom()),
            Pos2::new(anchor.x - 6.0, bubble.bottom()),
        ],
        Color32::WHITE,
        Stroke::NONE,
    ));
    painter.galley(bubble.min + padding, galley, Color32::BLACK);
}

fn paint_attribution(ui: &mut Ui, rect: Rect) {
    let size = Vec2::new(190.0, 18.0);
    let area = Rect::from_min_size(rect.right_bottom() - size, size);
    ui.painter()
        .rect_filled(area, 0.0, Color32::from_rgba_unmultiplied(255, 255, 255, 180));
    ui.put(
        area,
        egui::Hyperlink::from_label_and_url(
            egui::RichText::new("© OpenStreetMap contributors").small(),
            OSM_COPYRIGHT_URL,
        ),
    );
}

/// `#rrggbb` to a color; unparsable input paints gray
fn hex_color(hex: &str) -> Color32 {
    Color32::from_hex(hex).unwrap_or(Color32::GRAY)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_color() {
        assert_eq!(hex_color("#3498db"), Color32::from_rgb(0x34, 0x98, 0xdb));
        assert_eq!(hex_color("nonsense"), Color32::GRAY);
    }

    #[test]
    fn test_view_center_maps_to_rect_center() {
        let rect = Rect::from_min_size(Pos2::ZERO, Vec2::new(800.0, 600.0));
        let center = LatLng::new(15.0, 80.0);
        let view = View {
            rect,
            center_px: mercator::project(center, 5.0),
            zoom: 5.0,
        };
        let pos = view.to_screen(center);
        assert!((pos - rect.center()).length() < 1e-3);

        let back = view.to_coords(Pos2::new(400.0, 300.0));
        assert!((back.lat - 15.0).abs() < 1e-6);
        assert!((back.lng - 80.0).abs() < 1e-6);
    }
}
