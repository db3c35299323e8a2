//! Engine-wide defaults: the initial view, feed endpoints, tile providers and
//! the styling constants used for earthquake markers and plate boundaries.

use crate::style::color::Color;

/// Default square tile size in pixels.
pub const TILE_SIZE: u32 = 256;

/// Highest zoom any bundled tile provider serves.
pub const MAX_ZOOM: f64 = 18.0;

/// Initial map center (lat, lng), over India.
pub const DEFAULT_CENTER: (f64, f64) = (19.07283, 72.88261);

pub const DEFAULT_ZOOM: f64 = 3.0;

/// Container size in CSS pixels (width, height).
pub const DEFAULT_SIZE: (f64, f64) = (1200.0, 800.0);

/// Largest accepted container edge in CSS pixels.
pub const MAX_MAP_SIZE: f64 = 16384.0;

/// Identifier of the DOM element the map is drawn into.
pub const DEFAULT_CONTAINER_ID: &str = "map";

/// All earthquakes reported by USGS over the past seven days.
pub const EARTHQUAKE_FEED_URL: &str =
    "https://earthquake.usgs.gov/earthquakes/feed/v1.0/summary/all_week.geojson";

/// PB2002 plate boundaries.
pub const TECTONIC_FEED_URL: &str =
    "https://raw.githubusercontent.com/fraxen/tectonicplates/master/GeoJSON/PB2002_boundaries.json";

pub const STREET_TILE_URL: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";

pub const STREET_ATTRIBUTION: &str = "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors";

pub const TOPO_TILE_URL: &str = "https://{s}.tile.opentopomap.org/{z}/{x}/{y}.png";

pub const TOPO_ATTRIBUTION: &str = "Map data: &copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors, <a href=\"http://viewfinderpanoramas.org\">SRTM</a> | Map style: &copy; <a href=\"https://opentopomap.org\">OpenTopoMap</a> (<a href=\"https://creativecommons.org/licenses/by-sa/3.0/\">CC-BY-SA</a>)";

/// OpenTopoMap stops serving tiles past this zoom.
pub const TOPO_MAX_ZOOM: u8 = 17;

pub const DEFAULT_SUBDOMAINS: [&str; 3] = ["a", "b", "c"];

/// Sequential yellow-to-red palette, shallow to deep.
pub const DEPTH_PALETTE: [Color; 6] = [
    Color::rgb(0xff, 0xff, 0xb2),
    Color::rgb(0xfe, 0xd9, 0x76),
    Color::rgb(0xfe, 0xb2, 0x4c),
    Color::rgb(0xfd, 0x8d, 0x3c),
    Color::rgb(0xfc, 0x4e, 0x2a),
    Color::rgb(0xb1, 0x00, 0x26),
];

/// Lower bound (km) of each depth band. The last band is open-ended.
pub const DEPTH_THRESHOLDS: [f64; 6] = [-10.0, 10.0, 30.0, 50.0, 70.0, 90.0];

/// Depth range spread over the palette when banding by fixed steps.
pub const DEPTH_SPAN_KM: f64 = 100.0;

/// Circle radius in pixels per unit of magnitude.
pub const MAGNITUDE_RADIUS_FACTOR: f64 = 4.0;

pub const MARKER_STROKE_COLOR: Color = Color::GREY;
pub const MARKER_STROKE_WEIGHT: f64 = 1.0;
pub const MARKER_STROKE_OPACITY: f64 = 1.0;
pub const MARKER_FILL_OPACITY: f64 = 0.75;

pub const TECTONIC_STROKE_COLOR: Color = Color::ORANGE;
pub const TECTONIC_STROKE_WEIGHT: f64 = 2.0;

pub const LEGEND_TITLE: &str = "Earthquake Depth (kms)";

/// Layer ids and switcher labels.
pub const STREET_LAYER_ID: &str = "street";
pub const STREET_LAYER_LABEL: &str = "Street";
pub const TOPO_LAYER_ID: &str = "topography";
pub const TOPO_LAYER_LABEL: &str = "Topography";
pub const EARTHQUAKE_LAYER_ID: &str = "earthquakes";
pub const EARTHQUAKE_LAYER_LABEL: &str = "Earthquakes";
pub const TECTONIC_LAYER_ID: &str = "tectonic";
pub const TECTONIC_LAYER_LABEL: &str = "Tectonic";
