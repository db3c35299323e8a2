//! GeoJSON model
//!
//! Positions are kept as `Vec<f64>` so that the optional third element
//! (elevation, or depth in the USGS feeds) survives parsing.

use crate::core::geo::{LatLng, LatLngBounds};
use crate::{MapError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map as JsonMap, Value};

/// A GeoJSON position: `[lng, lat]` or `[lng, lat, z]`
pub type Position = Vec<f64>;

/// GeoJSON geometry types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GeoJsonGeometry {
    Point {
        coordinates: Position,
    },
    MultiPoint {
        coordinates: Vec<Position>,
    },
    LineString {
        coordinates: Vec<Position>,
    },
    MultiLineString {
        coordinates: Vec<Vec<Position>>,
    },
    Polygon {
        coordinates: Vec<Vec<Position>>,
    },
    MultiPolygon {
        coordinates: Vec<Vec<Vec<Position>>>,
    },
    GeometryCollection {
        geometries: Vec<GeoJsonGeometry>,
    },
}

/// GeoJSON feature with geometry and properties
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GeoJsonFeature {
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub geometry: Option<GeoJsonGeometry>,
    #[serde(default)]
    pub properties: Option<JsonMap<String, Value>>,
}

/// Root GeoJSON object
#[derive(Debug, Clone, PartialEq)]
pub enum GeoJson {
    FeatureCollection(Vec<GeoJsonFeature>),
    Feature(GeoJsonFeature),
    Geometry(GeoJsonGeometry),
}

impl GeoJson {
    /// Parses a GeoJSON document from text
    pub fn parse(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text)
            .map_err(|e| MapError::ParseError(format!("Invalid GeoJSON: {}", e)))?;
        Self::from_value(value)
    }

    /// Interprets an already decoded JSON value, dispatching on its `type` member
    pub fn from_value(mut value: Value) -> Result<Self> {
        let kind = value
            .get("type")
            .and_then(Value::as_str)
            .ok_or_else(|| MapError::ParseError("GeoJSON object has no \"type\"".into()))?
            .to_string();

        match kind.as_str() {
            "FeatureCollection" => {
                let features = value
                    .get_mut("features")
                    .map(Value::take)
                    .ok_or_else(|| {
                        MapError::ParseError("FeatureCollection has no \"features\"".into())
                    })?;
                let Value::Array(features) = features else {
                    return Err(MapError::ParseError(
                        "FeatureCollection \"features\" is not an array".into(),
                    ));
                };
                Ok(GeoJson::FeatureCollection(
                    features.into_iter().map(GeoJsonFeature::lenient).collect(),
                ))
            }
            "Feature" => serde_json::from_value(value)
                .map(GeoJson::Feature)
                .map_err(|e| MapError::ParseError(format!("Invalid feature: {}", e))),
            _ => serde_json::from_value(value)
                .map(GeoJson::Geometry)
                .map_err(|e| MapError::ParseError(format!("Invalid geometry: {}", e))),
        }
    }

    /// All features, in document order. A bare geometry has none.
    pub fn features(&self) -> Vec<&GeoJsonFeature> {
        match self {
            GeoJson::FeatureCollection(features) => features.iter().collect(),
            GeoJson::Feature(feature) => vec![feature],
            GeoJson::Geometry(_) => Vec::new(),
        }
    }

    /// Every geometry in the document, including a bare root geometry
    pub fn geometries(&self) -> Vec<&GeoJsonGeometry> {
        match self {
            GeoJson::Geometry(geometry) => vec![geometry],
            _ => self
                .features()
                .into_iter()
                .filter_map(|f| f.geometry.as_ref())
                .collect(),
        }
    }

    /// Every line in the document as lat/lng paths (polygon rings included)
    pub fn line_paths(&self) -> Vec<Vec<LatLng>> {
        self.geometries()
            .into_iter()
            .flat_map(GeoJsonGeometry::line_paths)
            .collect()
    }

    /// Gets the bounding box of all geometries
    pub fn bounds(&self) -> Option<LatLngBounds> {
        self.geometries()
            .into_iter()
            .filter_map(GeoJsonGeometry::bounds)
            .reduce(|a, b| a.union(&b))
    }
}

impl TryFrom<Value> for GeoJson {
    type Error = MapError;

    fn try_from(value: Value) -> Result<Self> {
        Self::from_value(value)
    }
}

impl GeoJsonFeature {
    /// Decodes one collection member. A member whose geometry cannot be read
    /// keeps its id and properties but loses the geometry, so it still holds
    /// its position in the collection and is skipped downstream.
    fn lenient(value: Value) -> Self {
        match serde_json::from_value::<GeoJsonFeature>(value.clone()) {
            Ok(feature) => feature,
            Err(_err) => {
                #[cfg(feature = "debug")]
                log::warn!("dropping unreadable geometry: {}", _err);

                GeoJsonFeature {
                    id: value.get("id").cloned(),
                    geometry: None,
                    properties: value
                        .get("properties")
                        .and_then(Value::as_object)
                        .cloned(),
                }
            }
        }
    }

    pub fn property(&self, key: &str) -> Option<&Value> {
        self.properties.as_ref().and_then(|p| p.get(key))
    }

    pub fn property_f64(&self, key: &str) -> Option<f64> {
        self.property(key).and_then(Value::as_f64)
    }

    pub fn property_i64(&self, key: &str) -> Option<i64> {
        let value = self.property(key)?;
        value
            .as_i64()
            .or_else(|| value.as_f64().filter(|v| v.is_finite()).map(|v| v as i64))
    }

    pub fn property_str(&self, key: &str) -> Option<&str> {
        self.property(key).and_then(Value::as_str)
    }

    /// Feature id as text, whether the document stores it as string or number
    pub fn id_string(&self) -> Option<String> {
        match self.id.as_ref()? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }
}

impl GeoJsonGeometry {
    /// The position of a `Point` geometry
    pub fn point(&self) -> Option<&[f64]> {
        match self {
            GeoJsonGeometry::Point { coordinates } => Some(coordinates),
            _ => None,
        }
    }

    /// Converts all coordinates to LatLng points, skipping malformed positions
    pub fn to_lat_lng_points(&self) -> Vec<LatLng> {
        match self {
            GeoJsonGeometry::Point { coordinates } => {
                LatLng::from_position(coordinates).into_iter().collect()
            }
            GeoJsonGeometry::MultiPoint { coordinates }
            | GeoJsonGeometry::LineString { coordinates } => to_path(coordinates),
            GeoJsonGeometry::MultiLineString { coordinates }
            | GeoJsonGeometry::Polygon { coordinates } => {
                coordinates.iter().flat_map(|line| to_path(line)).collect()
            }
            GeoJsonGeometry::MultiPolygon { coordinates } => coordinates
                .iter()
                .flatten()
                .flat_map(|ring| to_path(ring))
                .collect(),
            GeoJsonGeometry::GeometryCollection { geometries } => geometries
                .iter()
                .flat_map(GeoJsonGeometry::to_lat_lng_points)
                .collect(),
        }
    }

    /// Line-like parts as separate paths; points contribute nothing
    pub fn line_paths(&self) -> Vec<Vec<LatLng>> {
        let paths: Vec<Vec<LatLng>> = match self {
            GeoJsonGeometry::Point { .. } | GeoJsonGeometry::MultiPoint { .. } => Vec::new(),
            GeoJsonGeometry::LineString { coordinates } => vec![to_path(coordinates)],
            GeoJsonGeometry::MultiLineString { coordinates }
            | GeoJsonGeometry::Polygon { coordinates } => {
                coordinates.iter().map(|line| to_path(line)).collect()
            }
            GeoJsonGeometry::MultiPolygon { coordinates } => coordinates
                .iter()
                .flatten()
                .map(|ring| to_path(ring))
                .collect(),
            GeoJsonGeometry::GeometryCollection { geometries } => geometries
                .iter()
                .flat_map(GeoJsonGeometry::line_paths)
                .collect(),
        };

        paths.into_iter().filter(|path| path.len() >= 2).collect()
    }

    pub fn bounds(&self) -> Option<LatLngBounds> {
        LatLngBounds::from_points(&self.to_lat_lng_points())
    }
}

fn to_path(positions: &[Position]) -> Vec<LatLng> {
    positions
        .iter()
        .filter_map(|p| LatLng::from_position(p))
        .collect()
}
