use crate::{core::viewport::Viewport, layers::base::LayerTrait, MapError, Result};

use crate::rendering::context::RenderContext;

use crate::prelude::HashMap;

/// Manages layers for the map, handling ordering and rendering
pub struct LayerManager {
    /// All layers indexed by ID
    layers: HashMap<String, Box<dyn LayerTrait>>,
    /// Ordered list of layer IDs for rendering (sorted by z-index)
    render_order: Vec<String>,
}

impl LayerManager {
    pub fn new() -> Self {
        Self {
            layers: HashMap::default(),
            render_order: Vec::new(),
        }
    }

    /// Adds a layer; ids must be unique
    pub fn add_layer(&mut self, layer: Box<dyn LayerTrait>) -> Result<()> {
        let layer_id = layer.id().to_string();
        if self.layers.contains_key(&layer_id) {
            return Err(MapError::Layer(format!("duplicate layer id: {}", layer_id)));
        }
        let z_index = layer.z_index();

        self.layers.insert(layer_id.clone(), layer);

        // Insert in sorted order by z-index; equal z-indices keep insertion order
        let insert_pos = self
            .render_order
            .iter()
            .position(|id| {
                self.layers
                    .get(id)
                    .map(|l| l.z_index() > z_index)
                    .unwrap_or(false)
            })
            .unwrap_or(self.render_order.len());

        self.render_order.insert(insert_pos, layer_id);
        Ok(())
    }

    /// Removes a layer from the manager
    pub fn remove_layer(&mut self, layer_id: &str) -> Option<Box<dyn LayerTrait>> {
        self.render_order.retain(|id| id != layer_id);
        self.layers.remove(layer_id)
    }

    /// Gets a reference to a layer by ID
    pub fn get_layer(&self, layer_id: &str) -> Option<&dyn LayerTrait> {
        self.layers.get(layer_id).map(|l| l.as_ref())
    }

    /// Applies a function to a specific layer mutably
    pub fn with_layer_mut<F, R>(&mut self, layer_id: &str, f: F) -> Option<R>
    where
        F: FnOnce(&mut dyn LayerTrait) -> R,
    {
        self.layers.get_mut(layer_id).map(|layer| f(layer.as_mut()))
    }

    pub fn contains(&self, layer_id: &str) -> bool {
        self.layers.contains_key(layer_id)
    }

    /// Layer IDs in render order
    pub fn list_layers(&self) -> Vec<String> {
        self.render_order.clone()
    }

    /// Gets all layers in render order
    pub fn layers(&self) -> Vec<&dyn LayerTrait> {
        self.render_order
            .iter()
            .filter_map(|id| self.layers.get(id).map(|l| l.as_ref()))
            .collect()
    }

    /// Renders every layer that intersects the viewport, in z-order.
    ///
    /// Hidden layers are still rendered into their own pass marked hidden,
    /// so a surface can offer to switch them on.
    pub fn render(&self, context: &mut RenderContext, viewport: &Viewport) -> Result<()> {
        let viewport_bounds = viewport.bounds();

        for layer in self.layers() {
            if !layer.intersects_bounds(&viewport_bounds) {
                #[cfg(feature = "debug")]
                log::debug!("layer {} is outside the viewport, skipping", layer.id());
                continue;
            }
            context.begin_layer(layer);
            layer.render(context, viewport)?;
        }
        Ok(())
    }

    /// Gets the number of layers
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Checks if the manager is empty
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

impl Default for LayerManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layers::{tile::TileLayer, vector::VectorLayer};
    use crate::style::marker::LineStyle;

    #[test]
    fn test_render_order_follows_z_index() {
        let mut manager = LayerManager::new();
        manager
            .add_layer(Box::new(VectorLayer::new(
                "lines".to_string(),
                "Lines".to_string(),
                LineStyle::default(),
            )))
            .unwrap();
        manager
            .add_layer(Box::new(TileLayer::openstreetmap(
                "street".to_string(),
                "Street".to_string(),
            )))
            .unwrap();

        assert_eq!(manager.list_layers(), vec!["street", "lines"]);
        assert_eq!(manager.len(), 2);
    }

    #[test]
    fn test_duplicate_ids_are_rejected() {
        let mut manager = LayerManager::new();
        let make = || Box::new(TileLayer::openstreetmap("osm".to_string(), "OSM".to_string()));
        manager.add_layer(make()).unwrap();
        assert!(manager.add_layer(make()).is_err());
        assert!(manager.remove_layer("osm").is_some());
        assert!(manager.is_empty());
    }

    #[test]
    fn test_with_layer_mut_toggles_visibility() {
        let mut manager = LayerManager::new();
        manager
            .add_layer(Box::new(TileLayer::openstreetmap(
                "osm".to_string(),
                "OSM".to_string(),
            )))
            .unwrap();
        manager.with_layer_mut("osm", |layer| layer.set_visible(false));
        assert!(!manager.get_layer("osm").unwrap().is_visible());
        assert!(manager.with_layer_mut("missing", |_| ()).is_none());
    }
}
