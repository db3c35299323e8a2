//! Renderer configuration
//!
//! `RendererConfig` carries everything the renderer would otherwise read
//! from globals: the view, the container id, feed URLs, tile providers and
//! the depth scale. Variants resolve to presets the same way a profile
//! resolves to concrete options; a JSON file can override any field.

use crate::{
    constants::{
        DEFAULT_CENTER, DEFAULT_CONTAINER_ID, DEFAULT_SIZE, DEFAULT_SUBDOMAINS, DEFAULT_ZOOM,
        DEPTH_PALETTE, DEPTH_THRESHOLDS, EARTHQUAKE_FEED_URL, MAX_MAP_SIZE, MAX_ZOOM,
        STREET_ATTRIBUTION, STREET_TILE_URL, TECTONIC_FEED_URL, TOPO_ATTRIBUTION, TOPO_MAX_ZOOM,
        TOPO_TILE_URL,
    },
    core::geo::LatLng,
    style::{
        color::Color,
        scale::{ColorScale, DepthBanding},
    },
    MapError, Result,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Which flavor of the map to build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MapVariant {
    /// One street base layer, earthquake markers and the legend
    Basic,
    /// Street/Topography base layers, earthquake and tectonic overlays,
    /// legend and layer switcher
    #[default]
    LayerControl,
}

impl MapVariant {
    pub fn resolve(&self) -> RendererConfig {
        RendererConfig {
            variant: *self,
            ..RendererConfig::default()
        }
    }

    pub fn wants_tectonic(&self) -> bool {
        matches!(self, MapVariant::LayerControl)
    }
}

/// What happens to the layer switcher when the tectonic feed fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayerControlPolicy {
    /// Always attach the switcher with whatever layers loaded
    Degrade,
    /// Attach the switcher only once the tectonic overlay exists
    #[default]
    RequireTectonic,
}

/// Time zone used for popup dates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeZoneMode {
    #[default]
    Utc,
    Local,
}

/// A slippy-map tile provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileProviderConfig {
    /// URL template with `{s}`, `{z}`, `{x}` and `{y}` placeholders
    pub url_template: String,
    #[serde(default)]
    pub subdomains: Vec<String>,
    /// Trusted HTML shown in the attribution control
    #[serde(default)]
    pub attribution: String,
    #[serde(default)]
    pub min_zoom: u8,
    #[serde(default = "default_max_zoom")]
    pub max_zoom: u8,
}

fn default_max_zoom() -> u8 {
    MAX_ZOOM as u8
}

impl TileProviderConfig {
    pub fn street() -> Self {
        Self {
            url_template: STREET_TILE_URL.to_string(),
            subdomains: DEFAULT_SUBDOMAINS.iter().map(|s| s.to_string()).collect(),
            attribution: STREET_ATTRIBUTION.to_string(),
            min_zoom: 0,
            max_zoom: default_max_zoom(),
        }
    }

    pub fn topography() -> Self {
        Self {
            url_template: TOPO_TILE_URL.to_string(),
            subdomains: DEFAULT_SUBDOMAINS.iter().map(|s| s.to_string()).collect(),
            attribution: TOPO_ATTRIBUTION.to_string(),
            min_zoom: 0,
            max_zoom: TOPO_MAX_ZOOM,
        }
    }
}

/// Remote data sources
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    pub earthquake_url: String,
    pub tectonic_url: String,
    /// Per-request timeout. `None` waits indefinitely.
    pub timeout_secs: Option<u64>,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            earthquake_url: EARTHQUAKE_FEED_URL.to_string(),
            tectonic_url: TECTONIC_FEED_URL.to_string(),
            timeout_secs: None,
        }
    }
}

/// Palette and thresholds for depth coloring
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DepthScaleConfig {
    pub palette: Vec<Color>,
    pub thresholds: Vec<f64>,
    pub banding: DepthBanding,
}

impl Default for DepthScaleConfig {
    fn default() -> Self {
        Self {
            palette: DEPTH_PALETTE.to_vec(),
            thresholds: DEPTH_THRESHOLDS.to_vec(),
            banding: DepthBanding::default(),
        }
    }
}

impl DepthScaleConfig {
    pub fn build(&self) -> Result<ColorScale> {
        ColorScale::new(self.palette.clone(), self.thresholds.clone(), self.banding)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RendererConfig {
    /// Id of the DOM element the map is drawn into
    pub container_id: String,
    pub center: LatLng,
    pub zoom: f64,
    pub width: f64,
    pub height: f64,
    pub variant: MapVariant,
    pub control_policy: LayerControlPolicy,
    pub time_zone: TimeZoneMode,
    pub feeds: FeedConfig,
    pub street: TileProviderConfig,
    pub topography: TileProviderConfig,
    pub depth_scale: DepthScaleConfig,
}

impl Default for RendererConfig {
    fn default() -> Self {
        let (lat, lng) = DEFAULT_CENTER;
        let (width, height) = DEFAULT_SIZE;
        Self {
            container_id: DEFAULT_CONTAINER_ID.to_string(),
            center: LatLng::new(lat, lng),
            zoom: DEFAULT_ZOOM,
            width,
            height,
            variant: MapVariant::default(),
            control_policy: LayerControlPolicy::default(),
            time_zone: TimeZoneMode::default(),
            feeds: FeedConfig::default(),
            street: TileProviderConfig::street(),
            topography: TileProviderConfig::topography(),
            depth_scale: DepthScaleConfig::default(),
        }
    }
}

impl RendererConfig {
    pub fn from_json_str(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn validate(&self) -> Result<()> {
        if self.container_id.trim().is_empty() {
            return Err(MapError::Config("container_id must not be empty".into()));
        }
        let in_range = |v: f64| v > 0.0 && v <= MAX_MAP_SIZE;
        if !(in_range(self.width) && in_range(self.height)) {
            return Err(MapError::Config(format!(
                "map size must be within 0..={MAX_MAP_SIZE} px, got {}x{}",
                self.width, self.height
            )));
        }
        if !self.zoom.is_finite() || !(0.0..=MAX_ZOOM).contains(&self.zoom) {
            return Err(MapError::Config(format!(
                "zoom must be within 0..={MAX_ZOOM}, got {}",
                self.zoom
            )));
        }
        if !self.center.is_valid() {
            return Err(MapError::Config(format!(
                "center {:?} is outside valid coordinates",
                self.center
            )));
        }
        for provider in [&self.street, &self.topography] {
            if provider.url_template.is_empty() {
                return Err(MapError::Config("tile url_template must not be empty".into()));
            }
            if provider.min_zoom > provider.max_zoom {
                return Err(MapError::Config(format!(
                    "tile provider {} has min_zoom above max_zoom",
                    provider.url_template
                )));
            }
        }
        self.depth_scale.build()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RendererConfig::default();
        assert_eq!(config.container_id, "map");
        assert_eq!(config.center, LatLng::new(19.07283, 72.88261));
        assert_eq!(config.zoom, 3.0);
        assert_eq!(config.variant, MapVariant::LayerControl);
        assert_eq!(config.control_policy, LayerControlPolicy::RequireTectonic);
        assert_eq!(config.depth_scale.banding, DepthBanding::Stepped);
        assert!(config.feeds.earthquake_url.ends_with("all_week.geojson"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_variant_presets() {
        assert_eq!(MapVariant::Basic.resolve().variant, MapVariant::Basic);
        assert!(!MapVariant::Basic.wants_tectonic());
        assert!(MapVariant::LayerControl.wants_tectonic());
    }

    #[test]
    fn test_partial_json_overrides() {
        let config = RendererConfig::from_json_str(
            r#"{
                "variant": "basic",
                "zoom": 5,
                "feeds": {"timeout_secs": 30},
                "depth_scale": {"banding": "thresholds"}
            }"#,
        )
        .unwrap();
        assert_eq!(config.variant, MapVariant::Basic);
        assert_eq!(config.zoom, 5.0);
        assert_eq!(config.feeds.timeout_secs, Some(30));
        assert_eq!(config.feeds.tectonic_url, TECTONIC_FEED_URL);
        assert_eq!(config.depth_scale.banding, DepthBanding::Thresholds);
        assert_eq!(config.depth_scale.palette.len(), 6);
    }

    #[test]
    fn test_custom_palette_from_json() {
        let config = RendererConfig::from_json_str(
            r##"{"depth_scale": {"palette": ["#000", "orange"], "thresholds": [0, 50]}}"##,
        )
        .unwrap();
        let scale = config.depth_scale.build().unwrap();
        assert_eq!(scale.color_for_depth(60.0), Some(&Color::ORANGE));
    }

    #[test]
    fn test_validation_failures() {
        let mut config = RendererConfig::default();
        config.width = 0.0;
        assert!(config.validate().is_err());

        let mut config = RendererConfig::default();
        config.container_id = "  ".to_string();
        assert!(config.validate().is_err());

        let mut config = RendererConfig::default();
        config.depth_scale.thresholds.pop();
        assert!(config.validate().is_err());

        assert!(RendererConfig::from_json_str(r#"{"zoom": 40}"#).is_err());
        assert!(RendererConfig::from_json_str(r#"{"variant": "fancy"}"#).is_err());
    }

    #[test]
    fn test_unbounded_size_is_rejected() {
        for (width, height) in [
            (f64::INFINITY, 800.0),
            (1200.0, f64::INFINITY),
            (f64::NAN, 800.0),
            (MAX_MAP_SIZE + 1.0, 800.0),
        ] {
            let config = RendererConfig {
                width,
                height,
                ..RendererConfig::default()
            };
            assert!(config.validate().is_err(), "{width}x{height}");
        }

        let largest = RendererConfig {
            width: MAX_MAP_SIZE,
            height: MAX_MAP_SIZE,
            ..RendererConfig::default()
        };
        assert!(largest.validate().is_ok());
    }
}
