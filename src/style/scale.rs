//! Depth color scale
//!
//! Maps an earthquake depth in km onto one of a fixed number of palette
//! colors. The thresholds label the legend rows; under the default stepped
//! banding a band starts every `100 / (bands - 1)` km.

use crate::{
    constants::{DEPTH_PALETTE, DEPTH_SPAN_KM, DEPTH_THRESHOLDS},
    style::color::Color,
    MapError, Result,
};
use serde::{Deserialize, Serialize};

/// How a depth is assigned to a band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DepthBanding {
    /// Band `i` covers `[thresholds[i], thresholds[i + 1])`, the last band is
    /// open-ended and anything below the first threshold falls into band 0.
    Thresholds,
    /// Band is `floor(depth / step)` with `step = 100 / (bands - 1)`,
    /// negative results fall into band 0 and large ones into the last band.
    #[default]
    Stepped,
}

/// One row of the scale: a depth range and its color
#[derive(Debug, Clone, PartialEq)]
pub struct DepthBand {
    pub index: usize,
    pub lower: f64,
    /// `None` for the open-ended last band
    pub upper: Option<f64>,
    pub color: Color,
}

/// Ordered palette keyed by ascending depth thresholds
#[derive(Debug, Clone, PartialEq)]
pub struct ColorScale {
    palette: Vec<Color>,
    thresholds: Vec<f64>,
    banding: DepthBanding,
}

impl ColorScale {
    pub fn new(palette: Vec<Color>, thresholds: Vec<f64>, banding: DepthBanding) -> Result<Self> {
        if palette.is_empty() {
            return Err(MapError::Config("color scale needs at least one color".into()));
        }
        if palette.len() != thresholds.len() {
            return Err(MapError::Config(format!(
                "color scale has {} colors but {} thresholds",
                palette.len(),
                thresholds.len()
            )));
        }
        if thresholds.iter().any(|t| !t.is_finite()) {
            return Err(MapError::Config("depth thresholds must be finite".into()));
        }
        if thresholds.windows(2).any(|w| w[0] >= w[1]) {
            return Err(MapError::Config(
                "depth thresholds must be strictly ascending".into(),
            ));
        }

        Ok(Self {
            palette,
            thresholds,
            banding,
        })
    }

    /// The six-band yellow-to-red depth scale
    pub fn depth(banding: DepthBanding) -> Self {
        Self {
            palette: DEPTH_PALETTE.to_vec(),
            thresholds: DEPTH_THRESHOLDS.to_vec(),
            banding,
        }
    }

    pub fn palette(&self) -> &[Color] {
        &self.palette
    }

    pub fn thresholds(&self) -> &[f64] {
        &self.thresholds
    }

    pub fn banding(&self) -> DepthBanding {
        self.banding
    }

    pub fn len(&self) -> usize {
        self.palette.len()
    }

    pub fn is_empty(&self) -> bool {
        self.palette.is_empty()
    }

    /// Width of one band under [`DepthBanding::Stepped`]
    pub fn step_size(&self) -> f64 {
        if self.palette.len() < 2 {
            DEPTH_SPAN_KM
        } else {
            DEPTH_SPAN_KM / (self.palette.len() - 1) as f64
        }
    }

    /// Band index for a depth; `None` only when the depth is NaN
    pub fn band_index(&self, depth: f64) -> Option<usize> {
        if depth.is_nan() {
            return None;
        }
        let last = self.palette.len() - 1;

        let index = match self.banding {
            DepthBanding::Thresholds => self
                .thresholds
                .iter()
                .rposition(|threshold| depth >= *threshold)
                .unwrap_or(0),
            DepthBanding::Stepped => {
                let raw = (depth / self.step_size()).floor();
                if raw <= 0.0 {
                    0
                } else if raw >= last as f64 {
                    last
                } else {
                    raw as usize
                }
            }
        };

        Some(index.min(last))
    }

    pub fn color_for_depth(&self, depth: f64) -> Option<&Color> {
        self.band_index(depth).map(|index| &self.palette[index])
    }

    pub fn bands(&self) -> Vec<DepthBand> {
        self.palette
            .iter()
            .enumerate()
            .map(|(index, color)| DepthBand {
                index,
                lower: self.thresholds[index],
                upper: self.thresholds.get(index + 1).copied(),
                color: *color,
            })
            .collect()
    }
}

impl Default for ColorScale {
    fn default() -> Self {
        Self::depth(DepthBanding::default())
    }
}
