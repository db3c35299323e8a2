use crate::{
    layers::manager::LayerManager,
    rendering::context::{ControlPanel, LayerToggle, RenderContext},
    Result,
};

// Control is the shared MapControl trait
pub use crate::traits::MapControl as Control;

/// Corner of the map container a control is pinned to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ControlPosition {
    TopLeft,
    #[default]
    TopRight,
    BottomLeft,
    BottomRight,
}

impl ControlPosition {
    pub fn css_class(&self) -> &'static str {
        match self {
            ControlPosition::TopLeft => "qm-top-left",
            ControlPosition::TopRight => "qm-top-right",
            ControlPosition::BottomLeft => "qm-bottom-left",
            ControlPosition::BottomRight => "qm-bottom-right",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlKind {
    Legend,
    Layers,
    Attribution,
}

impl ControlKind {
    pub fn of(panel: &ControlPanel) -> Self {
        match panel {
            ControlPanel::Legend { .. } => ControlKind::Legend,
            ControlPanel::Layers { .. } => ControlKind::Layers,
            ControlPanel::Attribution { .. } => ControlKind::Attribution,
        }
    }
}

/// Layer switcher: base layers are mutually exclusive, overlays independent
#[derive(Debug, Clone, Default)]
pub struct LayersControl {
    position: ControlPosition,
    base_layers: Vec<(String, String)>,
    overlays: Vec<(String, String)>,
}

impl LayersControl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_position(mut self, position: ControlPosition) -> Self {
        self.position = position;
        self
    }

    /// Registers a base layer by its label and layer id
    pub fn add_base_layer(mut self, label: impl Into<String>, layer_id: impl Into<String>) -> Self {
        self.base_layers.push((label.into(), layer_id.into()));
        self
    }

    pub fn add_overlay(mut self, label: impl Into<String>, layer_id: impl Into<String>) -> Self {
        self.overlays.push((label.into(), layer_id.into()));
        self
    }

    pub fn base_layer_labels(&self) -> Vec<&str> {
        self.base_layers.iter().map(|(label, _)| label.as_str()).collect()
    }

    pub fn overlay_labels(&self) -> Vec<&str> {
        self.overlays.iter().map(|(label, _)| label.as_str()).collect()
    }

    /// Entries whose layer is missing from the map are dropped
    fn toggles(entries: &[(String, String)], layers: &LayerManager) -> Vec<LayerToggle> {
        entries
            .iter()
            .filter_map(|(label, layer_id)| {
                let layer = layers.get_layer(layer_id)?;
                Some(LayerToggle {
                    layer_id: layer_id.clone(),
                    label: label.clone(),
                    checked: layer.is_visible(),
                })
            })
            .collect()
    }
}

impl Control for LayersControl {
    fn kind(&self) -> ControlKind {
        ControlKind::Layers
    }

    fn position(&self) -> ControlPosition {
        self.position
    }

    fn render(&self, context: &mut RenderContext, layers: &LayerManager) -> Result<()> {
        let base_layers = Self::toggles(&self.base_layers, layers);
        let overlays = Self::toggles(&self.overlays, layers);

        #[cfg(feature = "debug")]
        if base_layers.len() + overlays.len() < self.base_layers.len() + self.overlays.len() {
            log::debug!("layer switcher lists only layers present on the map");
        }

        context.add_control(ControlPanel::Layers {
            position: self.position,
            base_layers,
            overlays,
        });
        Ok(())
    }
}

/// Credits for the tile providers on the map
#[derive(Debug, Clone)]
pub struct AttributionControl {
    position: ControlPosition,
    prefix: Option<String>,
}

impl AttributionControl {
    pub fn new() -> Self {
        Self {
            position: ControlPosition::BottomRight,
            prefix: None,
        }
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }
}

impl Default for AttributionControl {
    fn default() -> Self {
        Self::new()
    }
}

impl Control for AttributionControl {
    fn kind(&self) -> ControlKind {
        ControlKind::Attribution
    }

    fn position(&self) -> ControlPosition {
        self.position
    }

    fn render(&self, context: &mut RenderContext, layers: &LayerManager) -> Result<()> {
        let mut entries: Vec<String> = self.prefix.iter().cloned().collect();
        for layer in layers.layers() {
            if let Some(attribution) = layer.attribution() {
                if !entries.iter().any(|e| e == attribution) {
                    entries.push(attribution.to_string());
                }
            }
        }
        context.add_control(ControlPanel::Attribution {
            position: self.position,
            entries,
        });
        Ok(())
    }
}

/// Control manager that keeps the map's controls in attachment order
#[derive(Default)]
pub struct ControlManager {
    controls: Vec<Box<dyn Control>>,
}

impl ControlManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, control: Box<dyn Control>) {
        self.controls.push(control);
    }

    pub fn contains(&self, kind: ControlKind) -> bool {
        self.controls.iter().any(|c| c.kind() == kind)
    }

    pub fn len(&self) -> usize {
        self.controls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.controls.is_empty()
    }

    /// Render all controls
    pub fn render(&self, context: &mut RenderContext, layers: &LayerManager) -> Result<()> {
        for control in &self.controls {
            control.render(context, layers)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layers::{base::LayerTrait, tile::TileLayer, vector::VectorLayer};
    use crate::style::marker::LineStyle;

    fn layers() -> LayerManager {
        let mut layers = LayerManager::new();
        layers
            .add_layer(Box::new(TileLayer::openstreetmap("street".into(), "Street".into())))
            .unwrap();
        let mut topo = TileLayer::opentopomap("topography".into(), "Topography".into());
        topo.set_visible(false);
        layers.add_layer(Box::new(topo)).unwrap();
        layers
            .add_layer(Box::new(VectorLayer::new(
                "tectonic".into(),
                "Tectonic".into(),
                LineStyle::tectonic(),
            )))
            .unwrap();
        layers
    }

    #[test]
    fn test_layers_control_reflects_visibility() {
        let control = LayersControl::new()
            .add_base_layer("Street", "street")
            .add_base_layer("Topography", "topography")
            .add_overlay("Earthquakes", "earthquakes")
            .add_overlay("Tectonic", "tectonic");
        let mut context = RenderContext::new("map", 10.0, 10.0);
        control.render(&mut context, &layers()).unwrap();

        match &context.controls()[0] {
            ControlPanel::Layers {
                position,
                base_layers,
                overlays,
            } => {
                assert_eq!(*position, ControlPosition::TopRight);
                assert_eq!(base_layers.len(), 2);
                assert!(base_layers[0].checked);
                assert!(!base_layers[1].checked);
                // earthquakes is not on the map
                assert_eq!(overlays.len(), 1);
                assert_eq!(overlays[0].label, "Tectonic");
            }
            other => panic!("unexpected panel {:?}", other),
        }
    }

    #[test]
    fn test_attribution_collects_unique_entries() {
        let mut context = RenderContext::new("map", 10.0, 10.0);
        AttributionControl::new()
            .render(&mut context, &layers())
            .unwrap();

        match &context.controls()[0] {
            ControlPanel::Attribution { entries, .. } => {
                assert_eq!(entries.len(), 2);
                assert!(entries[1].contains("OpenTopoMap"));
            }
            other => panic!("unexpected panel {:?}", other),
        }
    }

    #[test]
    fn test_control_manager() {
        let mut manager = ControlManager::new();
        assert!(manager.is_empty());
        manager.add(Box::new(LayersControl::new()));
        assert!(manager.contains(ControlKind::Layers));
        assert!(!manager.contains(ControlKind::Legend));

        let mut context = RenderContext::new("map", 10.0, 10.0);
        manager.render(&mut context, &LayerManager::new()).unwrap();
        assert_eq!(context.controls().len(), 1);
    }
}
