use crate::{
    core::{
        geo::{LatLng, LatLngBounds},
        viewport::Viewport,
    },
    data::geojson::GeoJson,
    layers::base::{LayerProperties, LayerTrait, LayerType},
    rendering::context::RenderContext,
    style::marker::LineStyle,
    Result,
};

/// Polylines drawn with a single stroke style
pub struct VectorLayer {
    properties: LayerProperties,
    paths: Vec<Vec<LatLng>>,
    style: LineStyle,
}

impl VectorLayer {
    pub fn new(id: String, name: String, style: LineStyle) -> Self {
        Self {
            properties: LayerProperties::new(id, name, LayerType::Vector),
            paths: Vec::new(),
            style,
        }
    }

    /// Lines and polygon rings become paths; points are ignored
    pub fn from_geojson(id: String, name: String, geojson: &GeoJson, style: LineStyle) -> Self {
        let mut layer = Self::new(id, name, style);
        layer.paths = geojson.line_paths();

        #[cfg(feature = "debug")]
        log::debug!("vector layer {}: {} paths", layer.properties.id, layer.paths.len());

        layer
    }

    /// Adds a path; paths shorter than two points are ignored
    pub fn add_path(&mut self, path: Vec<LatLng>) {
        if path.len() >= 2 {
            self.paths.push(path);
        }
    }

    pub fn paths(&self) -> &[Vec<LatLng>] {
        &self.paths
    }

    pub fn style(&self) -> &LineStyle {
        &self.style
    }
}

impl LayerTrait for VectorLayer {
    crate::impl_layer_trait!(VectorLayer, properties);

    fn render(&self, context: &mut RenderContext, viewport: &Viewport) -> Result<()> {
        for path in &self.paths {
            let points = path
                .iter()
                .map(|p| viewport.lat_lng_to_container_point(p))
                .collect();
            context.render_polyline(points, &self.style, self.properties.opacity)?;
        }
        Ok(())
    }

    fn bounds(&self) -> Option<LatLngBounds> {
        let points: Vec<LatLng> = self.paths.iter().flatten().copied().collect();
        LatLngBounds::from_points(&points)
    }
}
