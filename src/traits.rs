//! Shared trait abstractions
//!
//! Layers and controls are stored as trait objects by the map; the traits
//! below are the seams the renderer works through.

use crate::{
    core::{geo::LatLngBounds, viewport::Viewport},
    layers::{base::LayerType, manager::LayerManager},
    rendering::context::RenderContext,
    ui::controls::{ControlKind, ControlPosition},
    Result,
};

/// Trait for layer-like objects
pub trait LayerOperations: Send + Sync {
    /// Get layer ID
    fn id(&self) -> &str;

    /// Get layer name
    fn name(&self) -> &str;

    /// Get layer type
    fn layer_type(&self) -> LayerType;

    /// Check if layer is visible
    fn is_visible(&self) -> bool;

    /// Set layer visibility
    fn set_visible(&mut self, visible: bool);

    /// Get layer opacity (0.0 to 1.0)
    fn opacity(&self) -> f32;

    /// Set layer opacity
    fn set_opacity(&mut self, opacity: f32);

    /// Get layer z-index for ordering
    fn z_index(&self) -> i32;

    /// Set layer z-index
    fn set_z_index(&mut self, z_index: i32);

    /// Queue the layer's primitives for the current viewport
    fn render(&self, context: &mut RenderContext, viewport: &Viewport) -> Result<()>;

    /// Get layer bounds if applicable
    fn bounds(&self) -> Option<LatLngBounds> {
        None
    }

    /// Attribution HTML shown while the layer is visible
    fn attribution(&self) -> Option<&str> {
        None
    }

    /// Check if layer intersects with given bounds
    fn intersects_bounds(&self, bounds: &LatLngBounds) -> bool {
        if let Some(layer_bounds) = self.bounds() {
            layer_bounds.intersects(bounds)
        } else {
            true
        }
    }

    /// Dynamic casting support
    fn as_any(&self) -> &dyn std::any::Any;
    fn as_any_mut(&mut self) -> &mut dyn std::any::Any;
}

/// Trait for map controls: panels pinned to a corner of the container
pub trait MapControl: Send + Sync {
    fn kind(&self) -> ControlKind;

    fn position(&self) -> ControlPosition;

    /// Resolve the control against the current layers and queue it
    fn render(&self, context: &mut RenderContext, layers: &LayerManager) -> Result<()>;
}
