use crate::constants::{MAX_ZOOM, TILE_SIZE};
use crate::core::geo::{LatLng, LatLngBounds, Point};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Manages the current view of the map: center, zoom, and container size
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// The center of the map view in geographical coordinates
    pub center: LatLng,
    /// The current zoom level
    pub zoom: f64,
    /// The size of the container in pixels
    pub size: Point,
    pub min_zoom: f64,
    pub max_zoom: f64,
}

impl Viewport {
    /// Creates a new viewport
    pub fn new(center: LatLng, zoom: f64, size: Point) -> Self {
        Self {
            center,
            zoom: zoom.clamp(0.0, MAX_ZOOM),
            size,
            min_zoom: 0.0,
            max_zoom: MAX_ZOOM,
        }
    }

    pub fn set_center(&mut self, center: LatLng) {
        self.center = center;
    }

    /// Sets the zoom level, clamping to valid range
    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom = zoom.clamp(self.min_zoom, self.max_zoom);
    }

    pub fn set_size(&mut self, size: Point) {
        self.size = size;
    }

    /// Sets the zoom limits
    pub fn set_zoom_limits(&mut self, min_zoom: f64, max_zoom: f64) {
        self.min_zoom = min_zoom;
        self.max_zoom = max_zoom;
        self.zoom = self.zoom.clamp(min_zoom, max_zoom);
    }

    /// Side length of the whole world in pixels at the given zoom
    pub fn world_size(zoom: f64) -> f64 {
        TILE_SIZE as f64 * 2_f64.powf(zoom)
    }

    /// Projects a LatLng to world pixel coordinates (EPSG:3857) at the current zoom
    pub fn project(&self, lat_lng: &LatLng) -> Point {
        Self::project_at(lat_lng, self.zoom)
    }

    pub fn project_at(lat_lng: &LatLng, zoom: f64) -> Point {
        let world = Self::world_size(zoom);
        let lat_rad = LatLng::clamp_lat(lat_lng.lat).to_radians();

        let x = (lat_lng.lng + 180.0) / 360.0 * world;
        let y = (1.0 - (PI / 4.0 + lat_rad / 2.0).tan().ln() / PI) / 2.0 * world;

        Point::new(x, y)
    }

    /// Unprojects world pixel coordinates back to LatLng at the current zoom
    pub fn unproject(&self, pixel: &Point) -> LatLng {
        let world = Self::world_size(self.zoom);
        let lng = pixel.x / world * 360.0 - 180.0;
        let n = PI * (1.0 - 2.0 * pixel.y / world);
        let lat = n.sinh().atan().to_degrees();

        LatLng::new(lat, lng)
    }

    /// World pixel position of the container's top-left corner
    pub fn pixel_origin(&self) -> Point {
        let center = self.project(&self.center);
        center.subtract(&self.size.multiply(0.5))
    }

    /// Converts a geographical coordinate to container pixel coordinates
    pub fn lat_lng_to_container_point(&self, lat_lng: &LatLng) -> Point {
        self.project(lat_lng).subtract(&self.pixel_origin())
    }

    /// Converts container pixel coordinates back to geographical coordinates
    pub fn container_point_to_lat_lng(&self, point: &Point) -> LatLng {
        self.unproject(&point.add(&self.pixel_origin()))
    }

    /// Geographic bounds covered by the container
    pub fn bounds(&self) -> LatLngBounds {
        let north_west = self.container_point_to_lat_lng(&Point::new(0.0, 0.0));
        let south_east = self.container_point_to_lat_lng(&self.size);
        LatLngBounds::new(
            LatLng::new(south_east.lat, north_west.lng),
            LatLng::new(north_west.lat, south_east.lng),
        )
    }

    /// Integer zoom used to pick tiles for the current (possibly fractional) zoom
    pub fn tile_zoom(&self, min_zoom: u8, max_zoom: u8) -> u8 {
        (self.zoom.round() as u8).clamp(min_zoom, max_zoom)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        let (lat, lng) = crate::constants::DEFAULT_CENTER;
        let (width, height) = crate::constants::DEFAULT_SIZE;
        Self::new(
            LatLng::new(lat, lng),
            crate::constants::DEFAULT_ZOOM,
            Point::new(width, height),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_maps_to_container_middle() {
        let viewport = Viewport::new(LatLng::new(19.07, 72.88), 3.0, Point::new(1200.0, 800.0));
        let p = viewport.lat_lng_to_container_point(&viewport.center);
        assert!((p.x - 600.0).abs() < 1e-9);
        assert!((p.y - 400.0).abs() < 1e-9);
    }

    #[test]
    fn test_project_origin_and_roundtrip() {
        let viewport = Viewport::new(LatLng::new(0.0, 0.0), 1.0, Point::new(512.0, 512.0));
        let origin = viewport.project(&LatLng::new(0.0, 0.0));
        assert!((origin.x - 256.0).abs() < 1e-9);
        assert!((origin.y - 256.0).abs() < 1e-9);

        let coord = LatLng::new(35.0, 139.0);
        let back = viewport.container_point_to_lat_lng(&viewport.lat_lng_to_container_point(&coord));
        assert!((back.lat - coord.lat).abs() < 1e-9);
        assert!((back.lng - coord.lng).abs() < 1e-9);
    }

    #[test]
    fn test_bounds_span_container() {
        let viewport = Viewport::default();
        let bounds = viewport.bounds();
        assert!(bounds.contains(&viewport.center));
        // 1200px at zoom 3 covers 1200 / 2048 of the world's longitude
        let span = bounds.north_east.lng - bounds.south_west.lng;
        assert!((span - 1200.0 / 2048.0 * 360.0).abs() < 1e-6);
    }

    #[test]
    fn test_zoom_is_clamped() {
        let mut viewport = Viewport::new(LatLng::default(), 25.0, Point::new(100.0, 100.0));
        assert_eq!(viewport.zoom, MAX_ZOOM);
        viewport.set_zoom_limits(2.0, 10.0);
        assert_eq!(viewport.zoom, 10.0);
        viewport.set_zoom(1.0);
        assert_eq!(viewport.zoom, 2.0);
    }
}
