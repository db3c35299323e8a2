use crate::{
    core::{geo::LatLng, viewport::Viewport},
    layers::{base::LayerTrait, manager::LayerManager},
    rendering::{context::RenderContext, surface::Scene},
    ui::controls::{Control, ControlKind, ControlManager},
    MapError, Result,
};

#[derive(Debug, Clone)]
pub struct MapOptions {
    pub attribution_control: bool,
    pub min_zoom: Option<f64>,
    pub max_zoom: Option<f64>,
}

impl Default for MapOptions {
    fn default() -> Self {
        Self {
            attribution_control: true,
            min_zoom: None,
            max_zoom: None,
        }
    }
}

/// A map bound to one container: viewport, layers and controls.
///
/// Base layers are mutually exclusive; exactly one of them is visible
/// once any has been added. Overlays toggle independently.
pub struct Map {
    container_id: String,
    pub viewport: Viewport,
    pub options: MapOptions,
    layers: LayerManager,
    base_layer_ids: Vec<String>,
    overlay_ids: Vec<String>,
    controls: ControlManager,
}

impl Map {
    pub fn new(container_id: impl Into<String>, viewport: Viewport) -> Self {
        Self::with_options(container_id, viewport, MapOptions::default())
    }

    pub fn with_options(container_id: impl Into<String>, mut viewport: Viewport, options: MapOptions) -> Self {
        if options.min_zoom.is_some() || options.max_zoom.is_some() {
            viewport.set_zoom_limits(
                options.min_zoom.unwrap_or(viewport.min_zoom),
                options.max_zoom.unwrap_or(viewport.max_zoom),
            );
        }
        Self {
            container_id: container_id.into(),
            viewport,
            options,
            layers: LayerManager::new(),
            base_layer_ids: Vec::new(),
            overlay_ids: Vec::new(),
            controls: ControlManager::new(),
        }
    }

    pub fn container_id(&self) -> &str {
        &self.container_id
    }

    /// Adds a layer that is neither a base layer nor an overlay
    pub fn add_layer(&mut self, layer: Box<dyn LayerTrait>) -> Result<()> {
        #[cfg(feature = "debug")]
        log::debug!("adding layer {} ({})", layer.id(), layer.layer_type());

        self.layers.add_layer(layer)
    }

    /// Adds a base layer; only the first one starts visible
    pub fn add_base_layer(&mut self, mut layer: Box<dyn LayerTrait>) -> Result<()> {
        let id = layer.id().to_string();
        layer.set_visible(self.base_layer_ids.is_empty());
        self.add_layer(layer)?;
        self.base_layer_ids.push(id);
        Ok(())
    }

    pub fn add_overlay(&mut self, layer: Box<dyn LayerTrait>) -> Result<()> {
        let id = layer.id().to_string();
        self.add_layer(layer)?;
        self.overlay_ids.push(id);
        Ok(())
    }

    /// Shows one base layer and hides the others
    pub fn set_base_layer(&mut self, layer_id: &str) -> Result<()> {
        if !self.base_layer_ids.iter().any(|id| id == layer_id) {
            return Err(MapError::Layer(format!("{} is not a base layer", layer_id)));
        }
        for id in &self.base_layer_ids {
            let visible = id == layer_id;
            self.layers.with_layer_mut(id, |layer| layer.set_visible(visible));
        }
        Ok(())
    }

    pub fn set_overlay_visible(&mut self, layer_id: &str, visible: bool) -> Result<()> {
        if !self.overlay_ids.iter().any(|id| id == layer_id) {
            return Err(MapError::Layer(format!("{} is not an overlay", layer_id)));
        }
        self.layers.with_layer_mut(layer_id, |layer| layer.set_visible(visible));
        Ok(())
    }

    pub fn add_control(&mut self, control: Box<dyn Control>) {
        self.controls.add(control);
    }

    pub fn has_control(&self, kind: ControlKind) -> bool {
        self.controls.contains(kind)
    }

    pub fn layers(&self) -> &LayerManager {
        &self.layers
    }

    pub fn list_layers(&self) -> Vec<String> {
        self.layers.list_layers()
    }

    pub fn base_layer_ids(&self) -> &[String] {
        &self.base_layer_ids
    }

    pub fn overlay_ids(&self) -> &[String] {
        &self.overlay_ids
    }

    /// The base layer currently shown
    pub fn active_base_layer(&self) -> Option<&str> {
        self.base_layer_ids
            .iter()
            .find(|id| self.layers.get_layer(id).is_some_and(|l| l.is_visible()))
            .map(String::as_str)
    }

    pub fn set_view(&mut self, center: LatLng, zoom: f64) {
        self.viewport.set_center(center);
        self.viewport.set_zoom(zoom);
    }

    /// Queues all layers, then all controls
    pub fn render(&self, context: &mut RenderContext) -> Result<()> {
        context.begin_frame();
        self.layers.render(context, &self.viewport)?;
        self.controls.render(context, &self.layers)
    }

    /// Renders a complete frame sized to the viewport
    pub fn scene(&self) -> Result<Scene> {
        let mut context = RenderContext::new(
            &self.container_id,
            self.viewport.size.x,
            self.viewport.size.y,
        );
        self.render(&mut context)?;
        Ok(context.into_scene())
    }
}
