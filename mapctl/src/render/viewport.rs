//! The visible window of the map.
//!

use serde::Serialize;

use locmap_common::{inverse, GeoCoordinate, ProjectedCoordinate};

use crate::render::{TileId, MAX_ZOOM};

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Viewport {
    center: ProjectedCoordinate,
    zoom: f64,
}

impl Viewport {
    pub(crate) fn new(center: ProjectedCoordinate, zoom: f64) -> Self {
        Viewport { center, zoom }
    }

    pub fn center(&self) -> ProjectedCoordinate {
        self.center
    }

    /// Center back in degrees, for display.
    ///
    pub fn center_geo(&self) -> GeoCoordinate {
        inverse(self.center)
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Tile under the center at the current (integer) zoom level.
    ///
    pub fn center_tile(&self) -> TileId {
        let z = self.zoom.floor().clamp(0., MAX_ZOOM as f64) as u8;
        TileId::containing(self.center, z)
    }
}
