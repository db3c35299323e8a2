use crate::{
    constants::{STREET_ATTRIBUTION, STREET_TILE_URL, TILE_SIZE, TOPO_ATTRIBUTION, TOPO_MAX_ZOOM, TOPO_TILE_URL},
    core::{
        config::TileProviderConfig,
        geo::{Point, TileCoord},
        viewport::Viewport,
    },
    layers::base::{LayerProperties, LayerTrait, LayerType},
    rendering::context::RenderContext,
    Result,
};

/// Configuration for a tile layer
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TileLayerOptions {
    /// URL template for tiles (e.g., "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png")
    pub url_template: String,
    /// Available subdomains for load balancing
    pub subdomains: Vec<String>,
    /// Attribution HTML
    pub attribution: String,
    /// Tile size in pixels
    pub tile_size: u32,
    pub min_zoom: u8,
    pub max_zoom: u8,
}

impl Default for TileLayerOptions {
    fn default() -> Self {
        Self::from(&TileProviderConfig::street())
    }
}

impl From<&TileProviderConfig> for TileLayerOptions {
    fn from(provider: &TileProviderConfig) -> Self {
        Self {
            url_template: provider.url_template.clone(),
            subdomains: provider.subdomains.clone(),
            attribution: provider.attribution.clone(),
            tile_size: TILE_SIZE,
            min_zoom: provider.min_zoom,
            max_zoom: provider.max_zoom,
        }
    }
}

/// A tile placed in the container
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedTile {
    pub coord: TileCoord,
    pub url: String,
    /// Top-left and bottom-right corners in container pixels
    pub bounds: (Point, Point),
}

/// A layer that displays raster tiles from a slippy-map tile server
pub struct TileLayer {
    properties: LayerProperties,
    options: TileLayerOptions,
}

impl TileLayer {
    /// Create a new tile layer with default OpenStreetMap tiles
    pub fn new(id: String, name: String) -> Self {
        Self::with_options(id, name, TileLayerOptions::default())
    }

    /// Create a new tile layer with custom options
    pub fn with_options(id: String, name: String, options: TileLayerOptions) -> Self {
        let properties = LayerProperties::new(id, name, LayerType::Tile);
        Self {
            properties,
            options,
        }
    }

    pub fn from_provider(id: String, name: String, provider: &TileProviderConfig) -> Self {
        Self::with_options(id, name, TileLayerOptions::from(provider))
    }

    /// Create a tile layer for OpenStreetMap
    pub fn openstreetmap(id: String, name: String) -> Self {
        let options = TileLayerOptions {
            url_template: STREET_TILE_URL.to_string(),
            attribution: STREET_ATTRIBUTION.to_string(),
            ..TileLayerOptions::default()
        };
        Self::with_options(id, name, options)
    }

    /// Create a tile layer for OpenTopoMap
    pub fn opentopomap(id: String, name: String) -> Self {
        let options = TileLayerOptions {
            url_template: TOPO_TILE_URL.to_string(),
            attribution: TOPO_ATTRIBUTION.to_string(),
            max_zoom: TOPO_MAX_ZOOM,
            ..TileLayerOptions::default()
        };
        Self::with_options(id, name, options)
    }

    pub fn options(&self) -> &TileLayerOptions {
        &self.options
    }

    /// Expands the URL template for one tile
    pub fn tile_url(&self, coord: TileCoord) -> String {
        let subdomain = if self.options.subdomains.is_empty() {
            ""
        } else {
            let idx = ((coord.x + coord.y) as usize) % self.options.subdomains.len();
            self.options.subdomains[idx].as_str()
        };

        self.options
            .url_template
            .replace("{s}", subdomain)
            .replace("{z}", &coord.z.to_string())
            .replace("{x}", &coord.x.to_string())
            .replace("{y}", &coord.y.to_string())
            .replace("{r}", "")
    }

    /// Tiles covering the container, with their container-pixel bounds
    pub fn visible_tiles(&self, viewport: &Viewport) -> Vec<PlacedTile> {
        let zoom = viewport.tile_zoom(self.options.min_zoom, self.options.max_zoom);
        // Tiles are stretched when the view zoom is fractional or outside the provider range
        let tile_px =
            self.options.tile_size as f64 * 2_f64.powf(viewport.zoom - zoom as f64);
        if !(tile_px.is_finite() && tile_px > 0.0) {
            return Vec::new();
        }

        let origin = viewport.pixel_origin();
        let corners = [origin.x, origin.y, origin.x + viewport.size.x, origin.y + viewport.size.y];
        if !corners.iter().all(|v| v.is_finite()) {
            return Vec::new();
        }
        let min_x = (origin.x / tile_px).floor() as i64;
        let min_y = (origin.y / tile_px).floor() as i64;
        let max_x = ((origin.x + viewport.size.x) / tile_px).ceil() as i64 - 1;
        let max_y = ((origin.y + viewport.size.y) / tile_px).ceil() as i64 - 1;

        let mut tiles = Vec::new();
        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let Some(coord) = TileCoord::wrapped(x, y, zoom) else {
                    continue;
                };
                let top_left = Point::new(x as f64 * tile_px - origin.x, y as f64 * tile_px - origin.y);
                let bottom_right = top_left.add(&Point::new(tile_px, tile_px));
                tiles.push(PlacedTile {
                    coord,
                    url: self.tile_url(coord),
                    bounds: (top_left, bottom_right),
                });
            }
        }
        tiles
    }
}

impl LayerTrait for TileLayer {
    crate::impl_layer_trait!(TileLayer, properties);

    fn render(&self, context: &mut RenderContext, viewport: &Viewport) -> Result<()> {
        let tiles = self.visible_tiles(viewport);

        #[cfg(feature = "debug")]
        log::debug!("tile layer {}: {} tiles", self.properties.id, tiles.len());

        for tile in tiles {
            context.render_tile(&tile.url, tile.bounds, self.properties.opacity)?;
        }
        Ok(())
    }

    fn attribution(&self) -> Option<&str> {
        if self.options.attribution.is_empty() {
            None
        } else {
            Some(&self.options.attribution)
        }
    }
}
