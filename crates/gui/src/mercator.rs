//! Spherical Web Mercator projection, the one slippy-map tiles use.

use std::f64::consts::PI;

use shared::LatLng;

/// Edge length of one tile in pixels
pub const TILE_SIZE: f64 = 256.0;
/// WGS84 equatorial radius in meters
pub const EARTH_RADIUS_M: f64 = 6_378_137.0;
/// Latitude at which the projected world becomes square
pub const MAX_LATITUDE: f64 = 85.051_128_779_806_59;

/// Width and height of the whole world in pixels at `zoom`
pub fn world_size(zoom: f64) -> f64 {
    TILE_SIZE * 2f64.powf(zoom)
}

/// World pixel coordinates of `coords` at `zoom`; origin at the top-left
/// (180°W, `MAX_LATITUDE`N)
pub fn project(coords: LatLng, zoom: f64) -> [f64; 2] {
    let size = world_size(zoom);
    let lat = coords.lat.clamp(-MAX_LATITUDE, MAX_LATITUDE).to_radians();
    let x = (coords.lng + 180.0) / 360.0 * size;
    let y = (1.0 - (lat.tan() + 1.0 / lat.cos()).ln() / PI) / 2.0 * size;
    [x, y]
}

pub fn unproject(point: [f64; 2], zoom: f64) -> LatLng {
    let size = world_size(zoom);
    let lng = point[0] / size * 360.0 - 180.0;
    let n = PI - 2.0 * PI * point[1] / size;
    let lat = n.sinh().atan().to_degrees();
    LatLng::new(lat, lng)
}

/// Ground distance covered by one pixel at latitude `lat` and `zoom`
pub fn meters_per_pixel(lat: f64, zoom: f64) -> f64 {
    2.0 * PI * EARTH_RADIUS_M * lat.to_radians().cos() / world_size(zoom)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: f64, b: f64, eps: f64) {
        assert!((a - b).abs() < eps, "{a} != {b}");
    }

    #[test]
    fn test_origin_is_world_center() {
        let [x, y] = project(LatLng::new(0.0, 0.0), 0.0);
        assert_close(x, 128.0, 1e-9);
        assert_close(y, 128.0, 1e-9);
    }

    #[test]
    fn test_world_doubles_per_zoom() {
        assert_eq!(world_size(0.0), 256.0);
        assert_eq!(world_size(5.0), 8192.0);
    }

    #[test]
    fn test_project_unproject_roundtrip() {
        for p in shared::ocean_floats() {
            for zoom in [0.0, 5.0, 7.0, 12.5] {
                let back = unproject(project(p.coords, zoom), zoom);
                assert_close(back.lat, p.coords.lat, 1e-9);
                assert_close(back.lng, p.coords.lng, 1e-9);
            }
        }
    }

    #[test]
    fn test_north_is_up() {
        let [_, y_north] = project(LatLng::new(21.0, 67.5), 5.0);
        let [_, y_south] = project(LatLng::new(9.0, 74.5), 5.0);
        assert!(y_north < y_south);
    }

    #[test]
    fn test_meters_per_pixel_at_equator() {
        // Well-known value: ~156 km per pixel at zoom 0
        assert_close(meters_per_pixel(0.0, 0.0), 156_543.034, 0.01);
        assert_close(meters_per_pixel(0.0, 1.0), 156_543.034 / 2.0, 0.01);
        assert!(meters_per_pixel(60.0, 0.0) < meters_per_pixel(0.0, 0.0));
    }
}
