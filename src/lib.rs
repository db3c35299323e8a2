//! # quakemap
//!
//! Renders a map of recent earthquakes from the USGS GeoJSON feed.
//!
//! Each earthquake becomes a circle marker sized by magnitude and colored by
//! depth, with a popup describing the event. A depth legend is always
//! attached; the layer-control variant adds a tectonic plate overlay and a
//! switcher between a street and a topographic base layer.
//!
//! The map core (viewport, layers, controls, draw queue) follows a small
//! Leaflet-style architecture. Finished scenes are presented to a
//! [`Surface`]; [`HtmlSurface`] writes a self-contained HTML document whose
//! `#map` container holds tiles, SVG overlays, popups and controls.

pub mod core;
pub mod data;
pub mod fetch;
pub mod layers;
pub mod prelude;
pub mod renderer;
pub mod rendering;
pub mod style;
pub mod traits;
pub mod ui;
pub use crate::core::constants;

// Re-export public API
pub use crate::core::{
    builder::MapBuilder,
    config::{LayerControlPolicy, MapVariant, RendererConfig, TimeZoneMode},
    geo::{LatLng, LatLngBounds, Point, TileCoord},
    map::Map,
    viewport::Viewport,
};

pub use data::{
    earthquake::Earthquake,
    geojson::{GeoJson, GeoJsonFeature, GeoJsonGeometry},
};

pub use fetch::{
    client::{FeedClient, ReqwestFeedClient},
    feeds::{FeedOutcome, FeedSet},
};

pub use layers::{
    base::LayerTrait, group::FeatureGroup, marker::CircleMarker, tile::TileLayer,
    vector::VectorLayer,
};

pub use renderer::{EarthquakeMapRenderer, FeedStatus, RenderReport};

pub use rendering::{
    context::RenderContext,
    html::HtmlSurface,
    surface::{MemorySurface, Scene, Surface},
};

pub use style::{
    color::Color,
    marker::{marker_radius, LineStyle, MarkerStyle},
    scale::{ColorScale, DepthBanding},
};

pub use ui::{controls::LayersControl, legend::Legend, popup::Popup};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, MapError>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("HTTP {status} from {url}")]
    Http { url: String, status: u16 },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Render error: {0}")]
    Render(String),

    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("Layer error: {0}")]
    Layer(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Error type alias for convenience
pub type Error = MapError;

/// Installs `env_logger` with an `info` default filter.
///
/// Safe to call more than once; later calls are ignored.
#[cfg(feature = "debug")]
pub fn init_logging() {
    let env = env_logger::Env::default().default_filter_or("info");
    let _ = env_logger::Builder::from_env(env).try_init();
}
