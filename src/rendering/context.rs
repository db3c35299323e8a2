use crate::{
    core::geo::Point,
    layers::base::{LayerTrait, LayerType},
    rendering::surface::Scene,
    style::{
        color::Color,
        marker::{LineStyle, MarkerStyle},
    },
    ui::{controls::ControlPosition, legend::LegendRow},
    MapError, Result,
};

/// Style conversion from layer styles into the resolved form a surface draws
pub trait StyleConversion<T> {
    fn to_render_style(&self, opacity_multiplier: f32) -> T;
}

/// Circle style with layer opacity already applied
#[derive(Debug, Clone, PartialEq)]
pub struct CircleRenderStyle {
    pub radius: f64,
    pub fill_color: Option<Color>,
    pub stroke_color: Color,
    pub stroke_width: f64,
    pub stroke_opacity: f64,
    pub fill_opacity: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LineRenderStyle {
    pub color: Color,
    pub width: f64,
    pub opacity: f64,
}

impl StyleConversion<CircleRenderStyle> for MarkerStyle {
    fn to_render_style(&self, opacity_multiplier: f32) -> CircleRenderStyle {
        let multiplier = opacity_multiplier as f64;
        CircleRenderStyle {
            radius: self.radius,
            fill_color: self.fill_color,
            stroke_color: self.stroke_color,
            stroke_width: self.stroke_weight,
            stroke_opacity: self.stroke_opacity * multiplier,
            fill_opacity: self.fill_opacity * multiplier,
        }
    }
}

impl StyleConversion<LineRenderStyle> for LineStyle {
    fn to_render_style(&self, opacity_multiplier: f32) -> LineRenderStyle {
        LineRenderStyle {
            color: self.color,
            width: self.weight,
            opacity: self.opacity * opacity_multiplier as f64,
        }
    }
}

/// Commands that can be issued to the render context
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Tile {
        url: String,
        bounds: (Point, Point), // min, max container coordinates
        opacity: f32,
    },
    Circle {
        id: String,
        center: Point,
        style: CircleRenderStyle,
        /// Popup HTML opened by clicking the circle
        popup: Option<String>,
    },
    Polyline {
        points: Vec<Point>,
        style: LineRenderStyle,
    },
}

/// Everything one layer drew, kept together so a surface can toggle it
#[derive(Debug, Clone, PartialEq)]
pub struct LayerPass {
    pub id: String,
    pub name: String,
    pub layer_type: LayerType,
    pub visible: bool,
    pub z_index: i32,
    pub attribution: Option<String>,
    pub commands: Vec<DrawCommand>,
}

/// One entry of the layer switcher
#[derive(Debug, Clone, PartialEq)]
pub struct LayerToggle {
    pub layer_id: String,
    pub label: String,
    pub checked: bool,
}

/// Controls resolved against the layers they refer to
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanel {
    Legend {
        position: ControlPosition,
        title: String,
        rows: Vec<LegendRow>,
    },
    Layers {
        position: ControlPosition,
        base_layers: Vec<LayerToggle>,
        overlays: Vec<LayerToggle>,
    },
    Attribution {
        position: ControlPosition,
        entries: Vec<String>,
    },
}

/// Collects draw commands per layer and the controls of one frame
#[derive(Debug, Clone)]
pub struct RenderContext {
    pub container_id: String,
    pub width: f64,
    pub height: f64,
    passes: Vec<LayerPass>,
    controls: Vec<ControlPanel>,
}

impl RenderContext {
    pub fn new(container_id: &str, width: f64, height: f64) -> Self {
        Self {
            container_id: container_id.to_string(),
            width,
            height,
            passes: Vec::new(),
            controls: Vec::new(),
        }
    }

    /// Begin a frame
    pub fn begin_frame(&mut self) {
        self.passes.clear();
        self.controls.clear();
    }

    /// Opens the pass that following draw calls are recorded into
    pub fn begin_layer(&mut self, layer: &dyn LayerTrait) {
        self.passes.push(LayerPass {
            id: layer.id().to_string(),
            name: layer.name().to_string(),
            layer_type: layer.layer_type(),
            visible: layer.is_visible(),
            z_index: layer.z_index(),
            attribution: layer.attribution().map(str::to_string),
            commands: Vec::new(),
        });
    }

    fn current_pass(&mut self) -> Result<&mut LayerPass> {
        self.passes
            .last_mut()
            .ok_or_else(|| MapError::Render("draw call outside of a layer pass".into()))
    }

    pub fn render_tile(&mut self, url: &str, bounds: (Point, Point), opacity: f32) -> Result<()> {
        let (min, max) = bounds;
        if ![min.x, min.y, max.x, max.y].iter().all(|v| v.is_finite()) {
            return Err(MapError::Render(format!("tile {url} has non-finite bounds")));
        }
        if !(0.0..=1.0).contains(&opacity) {
            return Err(MapError::Render(format!("tile opacity {opacity} out of range")));
        }
        self.current_pass()?.commands.push(DrawCommand::Tile {
            url: url.to_string(),
            bounds,
            opacity,
        });
        Ok(())
    }

    /// Queues a circle; degenerate radii are drawn as given
    pub fn render_circle(
        &mut self,
        id: &str,
        center: Point,
        style: &MarkerStyle,
        opacity: f32,
        popup: Option<String>,
    ) -> Result<()> {
        if style.is_degenerate() {
            #[cfg(feature = "debug")]
            log::warn!("circle {} has degenerate radius {}", id, style.radius);
        }
        self.current_pass()?.commands.push(DrawCommand::Circle {
            id: id.to_string(),
            center,
            style: style.to_render_style(opacity),
            popup,
        });
        Ok(())
    }

    pub fn render_polyline(&mut self, points: Vec<Point>, style: &LineStyle, opacity: f32) -> Result<()> {
        if points.len() < 2 {
            return Ok(());
        }
        self.current_pass()?.commands.push(DrawCommand::Polyline {
            points,
            style: style.to_render_style(opacity),
        });
        Ok(())
    }

    pub fn add_control(&mut self, control: ControlPanel) {
        self.controls.push(control);
    }

    pub fn passes(&self) -> &[LayerPass] {
        &self.passes
    }

    pub fn controls(&self) -> &[ControlPanel] {
        &self.controls
    }

    pub fn into_scene(self) -> Scene {
        Scene {
            container_id: self.container_id,
            width: self.width,
            height: self.height,
            layers: self.passes,
            controls: self.controls,
        }
    }
}
