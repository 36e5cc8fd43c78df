//! Raster tile source for the background layer.
//!
//! Templates follow the usual XYZ scheme, `{z}/{x}/{y}` plus a server placeholder, either
//! `{s}` or `{a-c}`, rotated over the `a`, `b` and `c` servers.
//!

use serde::Serialize;

use locmap_common::{ProjectedCoordinate, HALF_EXTENT};

/// OpenStreetMap standard tiles
pub const OSM_TILES: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";

/// Deepest zoom level we accept.
pub const MAX_ZOOM: u8 = 24;

const SERVERS: [&str; 3] = ["a", "b", "c"];

/// One tile of the XYZ pyramid
///
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub struct TileId {
    pub z: u8,
    pub x: u32,
    pub y: u32,
}

impl TileId {
    /// Find the tile containing `p` at level `z`, points outside the world are clamped.
    ///
    pub fn containing(p: ProjectedCoordinate, z: u8) -> Self {
        let z = z.min(MAX_ZOOM);
        let n = (1u64 << z) as f64;
        let world = 2.0 * HALF_EXTENT;

        let fx = (p.x() + HALF_EXTENT) / world * n;
        let fy = (HALF_EXTENT - p.y()) / world * n;

        let x = fx.floor().clamp(0., n - 1.) as u32;
        let y = fy.floor().clamp(0., n - 1.) as u32;
        TileId { z, x, y }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TileSource {
    template: String,
}

impl TileSource {
    pub fn new(template: &str) -> Self {
        TileSource {
            template: template.to_owned(),
        }
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    /// Expand the template for a given tile.
    ///
    pub fn url(&self, tile: TileId) -> String {
        let server = SERVERS[((tile.x as u64 + tile.y as u64) % SERVERS.len() as u64) as usize];
        self.template
            .replace("{s}", server)
            .replace("{a-c}", server)
            .replace("{z}", &tile.z.to_string())
            .replace("{x}", &tile.x.to_string())
            .replace("{y}", &tile.y.to_string())
    }
}

impl Default for TileSource {
    fn default() -> Self {
        TileSource::new(OSM_TILES)
    }
}
