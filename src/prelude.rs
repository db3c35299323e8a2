//! Prelude module for common quakemap types and traits
//!
//! This module re-exports the most commonly used types, traits, and functions
//! for easy importing with `use quakemap::prelude::*;`

pub use crate::core::{
    builder::MapBuilder,
    config::{
        DepthScaleConfig, FeedConfig, LayerControlPolicy, MapVariant, RendererConfig,
        TileProviderConfig, TimeZoneMode,
    },
    geo::{LatLng, LatLngBounds, Point, TileCoord},
    map::{Map, MapOptions},
    viewport::Viewport,
};

pub use crate::layers::{
    base::LayerTrait, group::FeatureGroup, manager::LayerManager, marker::CircleMarker,
    tile::TileLayer, vector::VectorLayer,
};

pub use crate::data::{
    earthquake::Earthquake,
    geojson::{GeoJson, GeoJsonFeature, GeoJsonGeometry},
};

pub use crate::fetch::{FeedClient, FeedOutcome, FeedSet, ReqwestFeedClient};

pub use crate::rendering::{
    context::RenderContext,
    html::HtmlSurface,
    surface::{MemorySurface, Scene, Surface},
};

pub use crate::style::{Color, ColorScale, DepthBanding, LineStyle, MarkerStyle};

pub use crate::ui::{Control, ControlKind, ControlPosition, LayersControl, Legend, Popup};

pub use crate::renderer::{EarthquakeMapRenderer, FeedStatus, RenderReport};

pub use crate::{Error as MapError, Result};

pub use fxhash::{FxHashMap as HashMap, FxHashSet as HashSet};
