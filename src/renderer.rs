//! The earthquake map renderer
//!
//! One `render()` call bootstraps the map, fetches the feeds concurrently,
//! builds the marker and plate layers, attaches the legend and (for the
//! layer-control variant) the switcher, and presents the scene.

use crate::{
    constants::{
        EARTHQUAKE_LAYER_ID, EARTHQUAKE_LAYER_LABEL, STREET_LAYER_ID, STREET_LAYER_LABEL,
        TECTONIC_LAYER_ID, TECTONIC_LAYER_LABEL, TOPO_LAYER_ID, TOPO_LAYER_LABEL,
    },
    core::{
        builder::MapBuilder,
        config::{LayerControlPolicy, MapVariant, RendererConfig},
        map::Map,
    },
    data::{earthquake::Earthquake, geojson::GeoJson},
    fetch::{
        client::FeedClient,
        feeds::{fetch_feeds, FeedOutcome, FeedSet},
    },
    layers::{group::FeatureGroup, marker::CircleMarker, tile::TileLayer, vector::VectorLayer},
    rendering::surface::Surface,
    style::{
        marker::{LineStyle, MarkerStyle},
        scale::ColorScale,
    },
    ui::{controls::LayersControl, legend::Legend, popup::Popup},
    Result,
};
use std::fmt;

/// How a feed ended up, without the error value itself
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedStatus {
    Loaded,
    Failed(String),
    Skipped,
}

impl<T> From<&FeedOutcome<T>> for FeedStatus {
    fn from(outcome: &FeedOutcome<T>) -> Self {
        match outcome {
            FeedOutcome::Loaded(_) => FeedStatus::Loaded,
            FeedOutcome::Failed(err) => FeedStatus::Failed(err.to_string()),
            FeedOutcome::Skipped => FeedStatus::Skipped,
        }
    }
}

impl fmt::Display for FeedStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedStatus::Loaded => write!(f, "loaded"),
            FeedStatus::Failed(reason) => write!(f, "failed ({})", reason),
            FeedStatus::Skipped => write!(f, "skipped"),
        }
    }
}

/// What one render produced
#[derive(Debug, Clone, PartialEq)]
pub struct RenderReport {
    pub variant: MapVariant,
    pub markers: usize,
    /// Features without a usable point geometry
    pub skipped_features: usize,
    /// Markers whose radius is zero, negative or not a number
    pub degenerate_markers: usize,
    pub earthquakes: FeedStatus,
    pub tectonic: FeedStatus,
    pub tectonic_paths: usize,
    pub layer_control: bool,
    pub legend: bool,
}

impl fmt::Display for RenderReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} markers ({} skipped, {} degenerate); earthquakes {}; tectonic {} ({} paths); layer control {}",
            self.markers,
            self.skipped_features,
            self.degenerate_markers,
            self.earthquakes,
            self.tectonic,
            self.tectonic_paths,
            if self.layer_control { "on" } else { "off" },
        )
    }
}

/// Builds and presents the earthquake map
pub struct EarthquakeMapRenderer<C: FeedClient, S: Surface> {
    config: RendererConfig,
    scale: ColorScale,
    client: C,
    surface: S,
}

impl<C: FeedClient, S: Surface> EarthquakeMapRenderer<C, S> {
    /// Validates the configuration up front
    pub fn new(config: RendererConfig, client: C, surface: S) -> Result<Self> {
        config.validate()?;
        let scale = config.depth_scale.build()?;
        Ok(Self {
            config,
            scale,
            client,
            surface,
        })
    }

    pub fn config(&self) -> &RendererConfig {
        &self.config
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    /// Fetches the feeds, composes the map and presents it.
    ///
    /// Feed failures degrade the map and show up in the report; only
    /// surface and layer errors are returned.
    pub async fn render(&mut self) -> Result<RenderReport> {
        let feeds = fetch_feeds(
            &self.client,
            &self.config.feeds,
            self.config.variant.wants_tectonic(),
        )
        .await;

        let (map, report) = self.compose(feeds)?;
        let scene = map.scene()?;
        self.surface.present(&scene)?;

        #[cfg(feature = "debug")]
        log::info!("rendered {:?} map: {}", report.variant, report);

        Ok(report)
    }

    /// Assembles the map from already fetched feeds
    pub fn compose(&self, feeds: FeedSet) -> Result<(Map, RenderReport)> {
        let variant = self.config.variant;
        let mut map = MapBuilder::from_config(&self.config).build()?;

        map.add_base_layer(Box::new(TileLayer::from_provider(
            STREET_LAYER_ID.to_string(),
            STREET_LAYER_LABEL.to_string(),
            &self.config.street,
        )))?;
        if variant == MapVariant::LayerControl {
            map.add_base_layer(Box::new(TileLayer::from_provider(
                TOPO_LAYER_ID.to_string(),
                TOPO_LAYER_LABEL.to_string(),
                &self.config.topography,
            )))?;
        }

        let mut report = RenderReport {
            variant,
            markers: 0,
            skipped_features: 0,
            degenerate_markers: 0,
            earthquakes: FeedStatus::from(&feeds.earthquakes),
            tectonic: FeedStatus::from(&feeds.tectonic),
            tectonic_paths: 0,
            layer_control: false,
            legend: false,
        };

        if let FeedOutcome::Loaded(geojson) = &feeds.earthquakes {
            let group = self.earthquake_layer(geojson);
            report.markers = group.len();
            report.skipped_features = group.skipped();
            report.degenerate_markers = group
                .markers()
                .iter()
                .filter(|m| m.style().is_degenerate())
                .count();
            map.add_overlay(Box::new(group))?;
        }

        if let FeedOutcome::Loaded(geojson) = &feeds.tectonic {
            let layer = VectorLayer::from_geojson(
                TECTONIC_LAYER_ID.to_string(),
                TECTONIC_LAYER_LABEL.to_string(),
                geojson,
                LineStyle::tectonic(),
            );
            report.tectonic_paths = layer.paths().len();
            map.add_overlay(Box::new(layer))?;
        }

        map.add_control(Box::new(Legend::from_scale(&self.scale)));
        report.legend = true;

        if variant == MapVariant::LayerControl {
            let attach = match self.config.control_policy {
                LayerControlPolicy::Degrade => true,
                LayerControlPolicy::RequireTectonic => feeds.tectonic.is_loaded(),
            };
            if attach {
                map.add_control(Box::new(
                    LayersControl::new()
                        .add_base_layer(STREET_LAYER_LABEL, STREET_LAYER_ID)
                        .add_base_layer(TOPO_LAYER_LABEL, TOPO_LAYER_ID)
                        .add_overlay(EARTHQUAKE_LAYER_LABEL, EARTHQUAKE_LAYER_ID)
                        .add_overlay(TECTONIC_LAYER_LABEL, TECTONIC_LAYER_ID),
                ));
                report.layer_control = true;
            } else {
                #[cfg(feature = "debug")]
                log::warn!("tectonic feed unavailable, layer switcher not attached");
            }
        }

        Ok((map, report))
    }

    fn earthquake_layer(&self, geojson: &GeoJson) -> FeatureGroup {
        let time_zone = self.config.time_zone;
        FeatureGroup::from_geojson(
            EARTHQUAKE_LAYER_ID.to_string(),
            EARTHQUAKE_LAYER_LABEL.to_string(),
            geojson,
            |feature, index| {
                let quake = Earthquake::from_feature(feature)?;
                let style = MarkerStyle::for_earthquake(&quake, &self.scale);
                Some(
                    CircleMarker::new(format!("quake-{index}"), quake.position, style)
                        .with_popup(Popup::for_earthquake(&quake, time_zone)),
                )
            },
        )
    }
}
