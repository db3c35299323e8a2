//! Styling policy: colors, the depth color scale and per-feature marker styles.

pub mod color;
pub mod marker;
pub mod scale;

pub use color::Color;
pub use marker::{marker_radius, LineStyle, MarkerStyle};
pub use scale::{ColorScale, DepthBand, DepthBanding};
