use crate::{
    constants::{
        MAGNITUDE_RADIUS_FACTOR, MARKER_FILL_OPACITY, MARKER_STROKE_COLOR, MARKER_STROKE_OPACITY,
        MARKER_STROKE_WEIGHT, TECTONIC_STROKE_COLOR, TECTONIC_STROKE_WEIGHT,
    },
    data::earthquake::Earthquake,
    style::{color::Color, scale::ColorScale},
};
use serde::{Deserialize, Serialize};

/// Circle radius in pixels for a magnitude.
///
/// Not clamped: zero, negative and NaN magnitudes produce degenerate radii.
pub fn marker_radius(magnitude: f64) -> f64 {
    magnitude * MAGNITUDE_RADIUS_FACTOR
}

/// Style for circle markers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerStyle {
    pub radius: f64,
    /// `None` when no color could be derived, e.g. for a NaN depth
    pub fill_color: Option<Color>,
    pub stroke_color: Color,
    pub stroke_weight: f64,
    pub stroke_opacity: f64,
    pub fill_opacity: f64,
}

impl MarkerStyle {
    /// Radius from magnitude, fill from depth, fixed grey outline
    pub fn for_earthquake(quake: &Earthquake, scale: &ColorScale) -> Self {
        Self {
            radius: marker_radius(quake.magnitude),
            fill_color: scale.color_for_depth(quake.depth_km).copied(),
            stroke_color: MARKER_STROKE_COLOR,
            stroke_weight: MARKER_STROKE_WEIGHT,
            stroke_opacity: MARKER_STROKE_OPACITY,
            fill_opacity: MARKER_FILL_OPACITY,
        }
    }

    /// True when the circle cannot be drawn meaningfully
    pub fn is_degenerate(&self) -> bool {
        !(self.radius.is_finite() && self.radius > 0.0)
    }
}

impl Default for MarkerStyle {
    fn default() -> Self {
        Self {
            radius: 10.0,
            fill_color: Some(Color::LEAFLET_BLUE),
            stroke_color: Color::LEAFLET_BLUE,
            stroke_weight: 3.0,
            stroke_opacity: 1.0,
            fill_opacity: 0.2,
        }
    }
}

/// Style for line features
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineStyle {
    pub color: Color,
    pub weight: f64,
    pub opacity: f64,
}

impl LineStyle {
    /// Plate boundary stroke
    pub fn tectonic() -> Self {
        Self {
            color: TECTONIC_STROKE_COLOR,
            weight: TECTONIC_STROKE_WEIGHT,
            opacity: 1.0,
        }
    }
}

impl Default for LineStyle {
    fn default() -> Self {
        Self {
            color: Color::LEAFLET_BLUE,
            weight: 3.0,
            opacity: 1.0,
        }
    }
}
