use crate::{
    constants::LEGEND_TITLE,
    layers::manager::LayerManager,
    rendering::context::{ControlPanel, RenderContext},
    style::{color::Color, scale::ColorScale},
    ui::controls::{Control, ControlKind, ControlPosition},
    Result,
};

/// One swatch and its depth range
#[derive(Debug, Clone, PartialEq)]
pub struct LegendRow {
    pub color: Color,
    pub label: String,
}

/// Depth legend keyed to the marker color scale
#[derive(Debug, Clone, PartialEq)]
pub struct Legend {
    title: String,
    position: ControlPosition,
    rows: Vec<LegendRow>,
}

impl Legend {
    /// One row per band: `lower–upper`, and `lower+` for the open last band
    pub fn from_scale(scale: &ColorScale) -> Self {
        let rows = scale
            .bands()
            .into_iter()
            .map(|band| {
                let label = match band.upper {
                    Some(upper) => format!("{}–{}", band.lower, upper),
                    None => format!("{}+", band.lower),
                };
                LegendRow {
                    color: band.color,
                    label,
                }
            })
            .collect();

        Self {
            title: LEGEND_TITLE.to_string(),
            position: ControlPosition::BottomRight,
            rows,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_position(mut self, position: ControlPosition) -> Self {
        self.position = position;
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn rows(&self) -> &[LegendRow] {
        &self.rows
    }
}

impl Control for Legend {
    fn kind(&self) -> ControlKind {
        ControlKind::Legend
    }

    fn position(&self) -> ControlPosition {
        self.position
    }

    fn render(&self, context: &mut RenderContext, _layers: &LayerManager) -> Result<()> {
        context.add_control(ControlPanel::Legend {
            position: self.position,
            title: self.title.clone(),
            rows: self.rows.clone(),
        });
        Ok(())
    }
}
