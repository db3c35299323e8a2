//! Map builder for fluent API configuration
//!
//! `MapBuilder` assembles a [`Map`] from a viewport, an optional default
//! base layer and the standard controls.

use crate::{
    constants::MAX_MAP_SIZE,
    core::{
        config::RendererConfig,
        geo::{LatLng, Point},
        map::{Map, MapOptions},
        viewport::Viewport,
    },
    layers::tile::TileLayer,
    ui::controls::AttributionControl,
    MapError, Result,
};

/// Builder for creating and configuring Map instances
pub struct MapBuilder {
    container_id: String,
    center: LatLng,
    zoom: f64,
    size: Point,
    map_options: MapOptions,
    base_layer: Option<TileLayer>,
}

impl MapBuilder {
    /// Create a new MapBuilder with default settings
    pub fn new() -> Self {
        let viewport = Viewport::default();
        Self {
            container_id: crate::constants::DEFAULT_CONTAINER_ID.to_string(),
            center: viewport.center,
            zoom: viewport.zoom,
            size: viewport.size,
            map_options: MapOptions::default(),
            base_layer: None,
        }
    }

    /// Container id, view and size taken from a renderer configuration
    pub fn from_config(config: &RendererConfig) -> Self {
        Self::new()
            .with_container_id(config.container_id.clone())
            .with_center_and_zoom(config.center, config.zoom, Point::new(config.width, config.height))
    }

    pub fn with_container_id(mut self, container_id: impl Into<String>) -> Self {
        self.container_id = container_id.into();
        self
    }

    /// Set the initial center and zoom level
    pub fn with_center_and_zoom(mut self, center: LatLng, zoom: f64, size: Point) -> Self {
        self.center = center;
        self.zoom = zoom;
        self.size = size;
        self
    }

    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.size = Point::new(width, height);
        self
    }

    /// Set zoom constraints
    pub fn with_zoom_limits(mut self, min_zoom: f64, max_zoom: f64) -> Self {
        self.map_options.min_zoom = Some(min_zoom);
        self.map_options.max_zoom = Some(max_zoom);
        self
    }

    /// Adds this tile layer as the first base layer on build
    pub fn with_base_layer(mut self, layer: TileLayer) -> Self {
        self.base_layer = Some(layer);
        self
    }

    pub fn with_attribution_control(mut self, enabled: bool) -> Self {
        self.map_options.attribution_control = enabled;
        self
    }

    /// Build the map
    pub fn build(self) -> Result<Map> {
        if self.container_id.trim().is_empty() {
            return Err(MapError::Config("container id must not be empty".into()));
        }
        if !self.center.is_valid() {
            return Err(MapError::InvalidCoordinates(format!(
                "center ({}, {})",
                self.center.lat, self.center.lng
            )));
        }
        let in_range = |v: f64| v > 0.0 && v <= MAX_MAP_SIZE;
        if !(in_range(self.size.x) && in_range(self.size.y)) {
            return Err(MapError::Config(format!(
                "map size must be within 0..={MAX_MAP_SIZE} px, got {}x{}",
                self.size.x, self.size.y
            )));
        }

        if let (Some(min), Some(max)) = (self.map_options.min_zoom, self.map_options.max_zoom) {
            if !(min <= max) {
                return Err(MapError::Config(format!("zoom limits {min}..{max} are inverted")));
            }
        }

        let viewport = Viewport::new(self.center, self.zoom, self.size);
        let attribution = self.map_options.attribution_control;
        let mut map = Map::with_options(self.container_id, viewport, self.map_options);

        if let Some(layer) = self.base_layer {
            map.add_base_layer(Box::new(layer))?;
        }
        if attribution {
            map.add_control(Box::new(AttributionControl::new()));
        }
        Ok(map)
    }
}

impl Default for MapBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::controls::ControlKind;

    #[test]
    fn test_defaults() {
        let map = MapBuilder::new().build().unwrap();
        assert_eq!(map.container_id(), "map");
        assert_eq!(map.viewport.zoom, 3.0);
        assert!((map.viewport.center.lat - 19.07283).abs() < 1e-9);
        assert!(map.has_control(ControlKind::Attribution));
    }

    #[test]
    fn test_from_config_and_base_layer() {
        let config = RendererConfig {
            container_id: "quakes".into(),
            width: 640.0,
            height: 480.0,
            ..RendererConfig::default()
        };
        let map = MapBuilder::from_config(&config)
            .with_base_layer(TileLayer::openstreetmap("street".into(), "Street".into()))
            .with_attribution_control(false)
            .build()
            .unwrap();

        assert_eq!(map.container_id(), "quakes");
        assert_eq!(map.viewport.size, Point::new(640.0, 480.0));
        assert_eq!(map.active_base_layer(), Some("street"));
        assert!(!map.has_control(ControlKind::Attribution));
    }

    #[test]
    fn test_invalid_setup_is_rejected() {
        assert!(MapBuilder::new().with_container_id("  ").build().is_err());
        assert!(MapBuilder::new().with_size(0.0, 10.0).build().is_err());
        assert!(MapBuilder::new().with_size(f64::INFINITY, 10.0).build().is_err());
        assert!(MapBuilder::new()
            .with_center_and_zoom(LatLng::new(120.0, 0.0), 3.0, Point::new(10.0, 10.0))
            .build()
            .is_err());
    }

    #[test]
    fn test_zoom_limits_apply() {
        let map = MapBuilder::new().with_zoom_limits(2.0, 5.0).build().unwrap();
        assert_eq!(map.viewport.min_zoom, 2.0);
        assert_eq!(map.viewport.max_zoom, 5.0);
    }
}
