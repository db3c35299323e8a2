use crate::{
    core::{geo::LatLngBounds, viewport::Viewport},
    data::geojson::{GeoJson, GeoJsonFeature},
    layers::{
        base::{LayerProperties, LayerTrait, LayerType},
        marker::CircleMarker,
    },
    rendering::context::RenderContext,
    Result,
};

/// A toggleable collection of circle markers drawn as one layer
pub struct FeatureGroup {
    properties: LayerProperties,
    markers: Vec<CircleMarker>,
    skipped: usize,
}

impl FeatureGroup {
    pub fn new(id: String, name: String) -> Self {
        Self {
            properties: LayerProperties::new(id, name, LayerType::Group),
            markers: Vec::new(),
            skipped: 0,
        }
    }

    /// Builds a group from GeoJSON, one marker per feature.
    ///
    /// `point_to_layer` receives each feature with its index in the
    /// collection; features it rejects are counted in [`FeatureGroup::skipped`].
    pub fn from_geojson<F>(id: String, name: String, geojson: &GeoJson, mut point_to_layer: F) -> Self
    where
        F: FnMut(&GeoJsonFeature, usize) -> Option<CircleMarker>,
    {
        let mut group = Self::new(id, name);
        for (index, feature) in geojson.features().into_iter().enumerate() {
            match point_to_layer(feature, index) {
                Some(marker) => group.add_marker(marker),
                None => group.skipped += 1,
            }
        }

        #[cfg(feature = "debug")]
        if group.skipped > 0 {
            log::warn!(
                "group {}: skipped {} features without a usable point",
                group.properties.id,
                group.skipped
            );
        }

        group
    }

    pub fn add_marker(&mut self, marker: CircleMarker) {
        self.markers.push(marker);
    }

    pub fn markers(&self) -> &[CircleMarker] {
        &self.markers
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    /// Features that produced no marker
    pub fn skipped(&self) -> usize {
        self.skipped
    }
}

impl LayerTrait for FeatureGroup {
    crate::impl_layer_trait!(FeatureGroup, properties);

    fn render(&self, context: &mut RenderContext, viewport: &Viewport) -> Result<()> {
        for marker in &self.markers {
            let center = viewport.lat_lng_to_container_point(&marker.position());
            context.render_circle(
                marker.id(),
                center,
                marker.style(),
                self.properties.opacity,
                marker.popup().map(|p| p.content().to_string()),
            )?;
        }
        Ok(())
    }

    fn bounds(&self) -> Option<LatLngBounds> {
        let positions: Vec<_> = self.markers.iter().map(|m| m.position()).collect();
        LatLngBounds::from_points(&positions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geo::LatLng;
    use crate::style::marker::MarkerStyle;

    fn collection() -> GeoJson {
        GeoJson::parse(
            r#"{
                "type": "FeatureCollection",
                "features": [
                    {"type": "Feature", "properties": {}, "geometry": {"type": "Point", "coordinates": [10.0, 20.0, 5.0]}},
                    {"type": "Feature", "properties": {}, "geometry": null},
                    {"type": "Feature", "properties": {}, "geometry": {"type": "Point", "coordinates": [-30.0, -40.0, 5.0]}}
                ]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_from_geojson_counts_skipped_features() {
        let group = FeatureGroup::from_geojson(
            "quakes".to_string(),
            "Earthquakes".to_string(),
            &collection(),
            |feature, index| {
                let coords = feature.geometry.as_ref()?.point()?;
                let position = LatLng::from_position(coords)?;
                Some(CircleMarker::new(format!("m-{index}"), position, MarkerStyle::default()))
            },
        );

        assert_eq!(group.len(), 2);
        assert_eq!(group.skipped(), 1);
        assert_eq!(group.markers()[1].id(), "m-2");

        let bounds = group.bounds().unwrap();
        assert!(bounds.contains(&LatLng::new(20.0, 10.0)));
        assert!(bounds.contains(&LatLng::new(-40.0, -30.0)));
    }

    #[test]
    fn test_empty_group_has_no_bounds() {
        let group = FeatureGroup::new("g".to_string(), "G".to_string());
        assert!(group.is_empty());
        assert!(group.bounds().is_none());
        assert_eq!(group.layer_type(), LayerType::Group);
    }

    #[test]
    fn test_render_emits_one_circle_per_marker() {
        let mut group = FeatureGroup::new("g".to_string(), "G".to_string());
        group.add_marker(CircleMarker::new("a".into(), LatLng::new(0.0, 0.0), MarkerStyle::default()));
        group.add_marker(CircleMarker::new("b".into(), LatLng::new(5.0, 5.0), MarkerStyle::default()));

        let viewport = Viewport::default();
        let mut context = RenderContext::new("map", viewport.size.x, viewport.size.y);
        context.begin_layer(&group);
        group.render(&mut context, &viewport).unwrap();
        assert_eq!(context.passes()[0].commands.len(), 2);
    }
}
