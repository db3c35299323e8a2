use crate::{
    rendering::context::{ControlPanel, DrawCommand, LayerPass},
    ui::controls::ControlKind,
    Result,
};

/// A finished frame: layer passes in z-order plus resolved controls
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub container_id: String,
    pub width: f64,
    pub height: f64,
    pub layers: Vec<LayerPass>,
    pub controls: Vec<ControlPanel>,
}

impl Scene {
    pub fn layer(&self, id: &str) -> Option<&LayerPass> {
        self.layers.iter().find(|pass| pass.id == id)
    }

    pub fn has_control(&self, kind: ControlKind) -> bool {
        self.controls.iter().any(|c| ControlKind::of(c) == kind)
    }

    pub fn control(&self, kind: ControlKind) -> Option<&ControlPanel> {
        self.controls.iter().find(|c| ControlKind::of(c) == kind)
    }

    /// Circles across all layers, hidden ones included
    pub fn circle_count(&self) -> usize {
        self.layers
            .iter()
            .flat_map(|pass| &pass.commands)
            .filter(|cmd| matches!(cmd, DrawCommand::Circle { .. }))
            .count()
    }

    pub fn visible_layer_ids(&self) -> Vec<&str> {
        self.layers
            .iter()
            .filter(|pass| pass.visible)
            .map(|pass| pass.id.as_str())
            .collect()
    }
}

/// Where scenes end up
pub trait Surface: Send {
    fn present(&mut self, scene: &Scene) -> Result<()>;
}

/// Keeps the last presented scene in memory
#[derive(Debug, Default)]
pub struct MemorySurface {
    last: Option<Scene>,
    frames: usize,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_scene(&self) -> Option<&Scene> {
        self.last.as_ref()
    }

    /// Number of scenes presented so far
    pub fn frames(&self) -> usize {
        self.frames
    }
}

impl Surface for MemorySurface {
    fn present(&mut self, scene: &Scene) -> Result<()> {
        self.last = Some(scene.clone());
        self.frames += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        core::geo::Point,
        layers::base::LayerType,
        rendering::context::{CircleRenderStyle, LayerPass},
        style::color::Color,
        ui::controls::ControlPosition,
    };

    fn scene() -> Scene {
        let circle = DrawCommand::Circle {
            id: "quake-0".into(),
            center: Point::new(1.0, 2.0),
            style: CircleRenderStyle {
                radius: 4.0,
                fill_color: Some(Color::ORANGE),
                stroke_color: Color::GREY,
                stroke_width: 1.0,
                stroke_opacity: 1.0,
                fill_opacity: 0.75,
            },
            popup: None,
        };
        Scene {
            container_id: "map".into(),
            width: 10.0,
            height: 10.0,
            layers: vec![
                LayerPass {
                    id: "earthquakes".into(),
                    name: "Earthquakes".into(),
                    layer_type: LayerType::Group,
                    visible: true,
                    z_index: 400,
                    attribution: None,
                    commands: vec![circle.clone(), circle],
                },
                LayerPass {
                    id: "topography".into(),
                    name: "Topography".into(),
                    layer_type: LayerType::Tile,
                    visible: false,
                    z_index: 0,
                    attribution: None,
                    commands: vec![],
                },
            ],
            controls: vec![ControlPanel::Legend {
                position: ControlPosition::BottomRight,
                title: "t".into(),
                rows: vec![],
            }],
        }
    }

    #[test]
    fn test_scene_queries() {
        let scene = scene();
        assert_eq!(scene.circle_count(), 2);
        assert!(scene.layer("topography").is_some());
        assert_eq!(scene.visible_layer_ids(), vec!["earthquakes"]);
        assert!(scene.has_control(ControlKind::Legend));
        assert!(!scene.has_control(ControlKind::Layers));
    }

    #[test]
    fn test_memory_surface_keeps_last_scene() {
        let mut surface = MemorySurface::new();
        assert!(surface.last_scene().is_none());
        surface.present(&scene()).unwrap();
        surface.present(&scene()).unwrap();
        assert_eq!(surface.frames(), 2);
        assert_eq!(surface.last_scene().unwrap().container_id, "map");
    }
}
