use crate::core::{config::TimeZoneMode, geo::LatLng};
use crate::data::geojson::GeoJsonFeature;
use chrono::{DateTime, Local, TimeZone, Utc};

/// One earthquake record read from a USGS feature.
///
/// Missing or non-numeric magnitude and depth are kept as NaN rather than
/// rejected; styling decides what a NaN looks like.
#[derive(Debug, Clone, PartialEq)]
pub struct Earthquake {
    pub id: Option<String>,
    pub place: Option<String>,
    pub magnitude: f64,
    /// Third element of the coordinate triple
    pub depth_km: f64,
    /// Epoch milliseconds
    pub time_ms: Option<i64>,
    pub position: LatLng,
}

impl Earthquake {
    /// Reads a feature with a `Point` geometry; anything else yields `None`.
    pub fn from_feature(feature: &GeoJsonFeature) -> Option<Self> {
        let coordinates = feature.geometry.as_ref()?.point()?;
        let position = LatLng::from_position(coordinates)?;

        Some(Self {
            id: feature.id_string(),
            place: feature.property_str("place").map(str::to_string),
            magnitude: feature.property_f64("mag").unwrap_or(f64::NAN),
            depth_km: coordinates.get(2).copied().unwrap_or(f64::NAN),
            time_ms: feature.property_i64("time"),
            position,
        })
    }

    pub fn occurred_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_millis_opt(self.time_ms?).single()
    }

    /// Human readable date, e.g. `Tue Nov 14 2023 22:13:20 GMT+0000`.
    ///
    /// Returns `Invalid Date` when the timestamp is missing or out of range.
    pub fn formatted_time(&self, time_zone: TimeZoneMode) -> String {
        const FORMAT: &str = "%a %b %d %Y %H:%M:%S GMT%z";

        match (self.occurred_at(), time_zone) {
            (Some(at), TimeZoneMode::Utc) => at.format(FORMAT).to_string(),
            (Some(at), TimeZoneMode::Local) => at.with_timezone(&Local).format(FORMAT).to_string(),
            (None, _) => "Invalid Date".to_string(),
        }
    }
}
