use crate::{
    core::{
        geo::{LatLng, LatLngBounds},
        viewport::Viewport,
    },
    layers::base::{LayerProperties, LayerTrait, LayerType},
    rendering::context::RenderContext,
    style::marker::MarkerStyle,
    ui::popup::Popup,
    Result,
};

/// A fixed-pixel-radius circle at a geographic position
pub struct CircleMarker {
    properties: LayerProperties,
    position: LatLng,
    style: MarkerStyle,
    popup: Option<Popup>,
}

impl CircleMarker {
    pub fn new(id: String, position: LatLng, style: MarkerStyle) -> Self {
        let properties = LayerProperties::new(id.clone(), id, LayerType::Marker);
        Self {
            properties,
            position,
            style,
            popup: None,
        }
    }

    /// Binds a popup opened when the circle is clicked
    pub fn with_popup(mut self, popup: Popup) -> Self {
        self.popup = Some(popup);
        self
    }

    pub fn position(&self) -> LatLng {
        self.position
    }

    pub fn style(&self) -> &MarkerStyle {
        &self.style
    }

    pub fn popup(&self) -> Option<&Popup> {
        self.popup.as_ref()
    }

    pub fn radius(&self) -> f64 {
        self.style.radius
    }
}

impl LayerTrait for CircleMarker {
    crate::impl_layer_trait!(CircleMarker, properties);

    fn render(&self, context: &mut RenderContext, viewport: &Viewport) -> Result<()> {
        let center = viewport.lat_lng_to_container_point(&self.position);
        context.render_circle(
            &self.properties.id,
            center,
            &self.style,
            self.properties.opacity,
            self.popup.as_ref().map(|p| p.content().to_string()),
        )
    }

    fn bounds(&self) -> Option<LatLngBounds> {
        Some(LatLngBounds::new(self.position, self.position))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rendering::context::DrawCommand;

    #[test]
    fn test_marker_renders_at_container_point() {
        let viewport = Viewport::new(
            LatLng::new(0.0, 0.0),
            2.0,
            crate::core::geo::Point::new(400.0, 300.0),
        );
        let marker = CircleMarker::new(
            "quake-0".to_string(),
            LatLng::new(0.0, 0.0),
            MarkerStyle::default(),
        )
        .with_popup(Popup::new("<h3>hello</h3>"));

        let mut context = RenderContext::new("map", 400.0, 300.0);
        context.begin_layer(&marker);
        marker.render(&mut context, &viewport).unwrap();

        match &context.passes()[0].commands[0] {
            DrawCommand::Circle { id, center, popup, .. } => {
                assert_eq!(id, "quake-0");
                assert!((center.x - 200.0).abs() < 1e-9);
                assert!((center.y - 150.0).abs() < 1e-9);
                assert_eq!(popup.as_deref(), Some("<h3>hello</h3>"));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_marker_bounds_is_its_position() {
        let marker = CircleMarker::new(
            "m".to_string(),
            LatLng::new(10.0, 20.0),
            MarkerStyle::default(),
        );
        let bounds = marker.bounds().unwrap();
        assert!(bounds.contains(&LatLng::new(10.0, 20.0)));
        assert_eq!(marker.radius(), 10.0);
        assert!(marker.popup().is_none());
    }
}
