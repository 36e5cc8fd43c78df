//! Map renderer.
//!
//! `MapState` owns the viewport, the tile source and the stack of marker layers.  Nothing is
//! drawn here, the state is what a drawing backend (or our text/GeoJSON output) consumes.
//!
//! The viewport goes from `Uninitialized` to `Initialized` exactly once, through
//! [`MapState::initialize()`] which hands back a [`MapHandle`].  Every marker operation needs
//! that handle so markers can not be added to a map without a viewport.  Markers are
//! append-only.
//!

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde_json::{json, Value};
use strum::Display;
use thiserror::Error;
use tracing::{debug, trace};

use locmap_common::{inverse, ProjectedCoordinate};

pub use marker::*;
pub use tiles::*;
pub use viewport::*;

mod marker;
mod tiles;
mod viewport;

/// Used to tell maps apart
static NEXT_MAP: AtomicU64 = AtomicU64::new(1);

#[derive(Clone, Debug, Error, PartialEq)]
pub enum RenderError {
    #[error("Map already initialized")]
    AlreadyInitialized,
    #[error("Handle does not belong to this map")]
    ForeignHandle,
    #[error("Bad zoom level {0}")]
    BadZoom(f64),
}

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub enum ViewState {
    Uninitialized,
    Initialized,
}

/// Proof that a given map has been initialized.
///
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct MapHandle {
    map: u64,
}

#[derive(Debug)]
pub struct MapState {
    id: u64,
    tiles: TileSource,
    viewport: Option<Viewport>,
    layers: Vec<MarkerLayer>,
    /// Sequences already turned into markers, compared by pointer
    rendered: Vec<Arc<[ProjectedCoordinate]>>,
}

impl MapState {
    pub fn new(tiles: TileSource) -> Self {
        MapState {
            id: NEXT_MAP.fetch_add(1, Ordering::Relaxed),
            tiles,
            viewport: None,
            layers: vec![],
            rendered: vec![],
        }
    }

    /// Create the viewport, only once.
    ///
    #[tracing::instrument(skip(self))]
    pub fn initialize(
        &mut self,
        anchor: ProjectedCoordinate,
        zoom: f64,
    ) -> Result<MapHandle, RenderError> {
        if self.viewport.is_some() {
            return Err(RenderError::AlreadyInitialized);
        }
        if !zoom.is_finite() || !(0.0..=MAX_ZOOM as f64).contains(&zoom) {
            return Err(RenderError::BadZoom(zoom));
        }
        self.viewport = Some(Viewport::new(anchor, zoom));
        debug!("map {} centered on {} at {}", self.id, anchor, zoom);
        Ok(MapHandle { map: self.id })
    }

    pub fn state(&self) -> ViewState {
        match self.viewport {
            Some(_) => ViewState::Initialized,
            None => ViewState::Uninitialized,
        }
    }

    pub fn viewport(&self) -> Option<&Viewport> {
        self.viewport.as_ref()
    }

    pub fn tiles(&self) -> &TileSource {
        &self.tiles
    }

    fn check(&self, handle: &MapHandle) -> Result<(), RenderError> {
        if handle.map != self.id || self.viewport.is_none() {
            return Err(RenderError::ForeignHandle);
        }
        Ok(())
    }

    /// Append one marker in its own layer.
    ///
    pub fn add_marker(
        &mut self,
        handle: &MapHandle,
        point: ProjectedCoordinate,
        style: &MarkerStyle,
    ) -> Result<(), RenderError> {
        self.check(handle)?;
        trace!("marker at {}", point);

        let id = self.layers.len();
        self.layers
            .push(MarkerLayer::new(id, vec![Marker::new(point, style)]));
        Ok(())
    }

    /// Turn a whole sequence of points into markers, one layer per marker.
    ///
    /// A sequence already rendered (same allocation) adds nothing.  A different sequence is
    /// always rendered, even if it holds the same values.  Returns the number of markers added.
    ///
    #[tracing::instrument(skip(self, points, style), fields(len = points.len()))]
    pub fn render_markers(
        &mut self,
        handle: &MapHandle,
        points: &Arc<[ProjectedCoordinate]>,
        style: &MarkerStyle,
    ) -> Result<usize, RenderError> {
        self.check(handle)?;

        if self.rendered.iter().any(|seen| Arc::ptr_eq(seen, points)) {
            debug!("sequence already rendered");
            return Ok(0);
        }

        for point in points.iter() {
            self.add_marker(handle, *point, style)?;
        }
        self.rendered.push(Arc::clone(points));
        Ok(points.len())
    }

    pub fn layers(&self) -> &[MarkerLayer] {
        &self.layers
    }

    /// All markers, in insertion order.
    ///
    pub fn markers(&self) -> impl Iterator<Item = &Marker> {
        self.layers.iter().flat_map(|l| l.features().iter())
    }

    pub fn marker_count(&self) -> usize {
        self.layers.iter().map(|l| l.len()).sum()
    }

    /// Markers as a GeoJSON `FeatureCollection`.
    ///
    /// Geometry is in degrees as GeoJSON wants, the projected point and style are kept
    /// in the properties.
    ///
    pub fn to_geojson(&self) -> Value {
        let features: Vec<Value> = self
            .markers()
            .enumerate()
            .map(|(i, m)| {
                let geo = inverse(m.point());
                json!({
                    "type": "Feature",
                    "geometry": {
                        "type": "Point",
                        "coordinates": [geo.lon, geo.lat],
                    },
                    "properties": {
                        "name": format!("Location {}", i + 1),
                        "x": m.point().x(),
                        "y": m.point().y(),
                        "radius": m.style().radius,
                        "color": m.style().color,
                        "width": m.style().width,
                    }
                })
            })
            .collect();

        json!({
            "type": "FeatureCollection",
            "features": features,
        })
    }
}

impl Default for MapState {
    fn default() -> Self {
        MapState::new(TileSource::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use locmap_common::{transform, GeoCoordinate};
    use rstest::rstest;

    fn seoul() -> ProjectedCoordinate {
        transform(GeoCoordinate::new(126.9779, 37.5663))
    }

    fn points(n: usize) -> Arc<[ProjectedCoordinate]> {
        (0..n)
            .map(|i| transform(GeoCoordinate::new(126. + i as f64 / 100., 37.5)))
            .collect()
    }

    #[test]
    fn test_map_new() {
        let map = MapState::default();
        assert_eq!(ViewState::Uninitialized, map.state());
        assert!(map.viewport().is_none());
        assert_eq!(0, map.marker_count());
    }

    #[test]
    fn test_map_initialize() {
        let mut map = MapState::default();
        let h = map.initialize(seoul(), 16.);
        assert!(h.is_ok());
        assert_eq!(ViewState::Initialized, map.state());

        let vp = map.viewport().unwrap();
        assert_eq!(seoul(), vp.center());
        assert_eq!(16., vp.zoom());
        assert_eq!(TileId { z: 16, x: 55883, y: 25379 }, vp.center_tile());

        let geo = vp.center_geo();
        assert!((geo.lat - 37.5663).abs() < 1e-9);
    }

    #[test]
    fn test_map_initialize_twice() {
        let mut map = MapState::default();
        map.initialize(seoul(), 16.).unwrap();
        assert_eq!(
            Err(RenderError::AlreadyInitialized),
            map.initialize(seoul(), 10.)
        );
        assert_eq!(16., map.viewport().unwrap().zoom());
    }

    #[rstest]
    #[case(-1.)]
    #[case(25.)]
    #[case(f64::INFINITY)]
    fn test_map_initialize_bad_zoom(#[case] zoom: f64) {
        let mut map = MapState::default();
        assert!(matches!(
            map.initialize(seoul(), zoom),
            Err(RenderError::BadZoom(_))
        ));
        assert_eq!(ViewState::Uninitialized, map.state());
    }

    #[test]
    fn test_add_marker() {
        let mut map = MapState::default();
        let h = map.initialize(seoul(), 16.).unwrap();
        map.add_marker(&h, seoul(), &MarkerStyle::default()).unwrap();
        map.add_marker(&h, seoul(), &MarkerStyle::default()).unwrap();

        assert_eq!(2, map.marker_count());
        assert_eq!(2, map.layers().len());
        let m = map.markers().next().unwrap();
        assert_eq!(seoul(), m.point());
        assert_eq!(10., m.style().radius);
        assert_eq!("blue", m.style().color);
        assert_eq!(2., m.style().width);
    }

    #[test]
    fn test_add_marker_foreign_handle() {
        let mut other = MapState::default();
        let h = other.initialize(seoul(), 16.).unwrap();

        let mut map = MapState::default();
        map.initialize(seoul(), 16.).unwrap();
        assert_eq!(
            Err(RenderError::ForeignHandle),
            map.add_marker(&h, seoul(), &MarkerStyle::default())
        );
        assert_eq!(0, map.marker_count());
    }

    #[rstest]
    #[case(0)]
    #[case(1)]
    #[case(5)]
    fn test_render_markers_count_and_order(#[case] n: usize) {
        let mut map = MapState::default();
        let h = map.initialize(seoul(), 16.).unwrap();
        let pts = points(n);

        let added = map.render_markers(&h, &pts, &MarkerStyle::default()).unwrap();
        assert_eq!(n, added);
        assert_eq!(n, map.marker_count());
        for (m, p) in map.markers().zip(pts.iter()) {
            assert_eq!(*p, m.point());
        }
    }

    #[test]
    fn test_render_markers_same_sequence_once() {
        let mut map = MapState::default();
        let h = map.initialize(seoul(), 16.).unwrap();
        let pts = points(3);

        assert_eq!(3, map.render_markers(&h, &pts, &MarkerStyle::default()).unwrap());
        assert_eq!(0, map.render_markers(&h, &pts, &MarkerStyle::default()).unwrap());
        let again = Arc::clone(&pts);
        assert_eq!(0, map.render_markers(&h, &again, &MarkerStyle::default()).unwrap());
        assert_eq!(3, map.marker_count());
    }

    #[test]
    fn test_render_markers_equal_values_new_sequence() {
        let mut map = MapState::default();
        let h = map.initialize(seoul(), 16.).unwrap();

        map.render_markers(&h, &points(3), &MarkerStyle::default()).unwrap();
        // Fresh allocation with identical values is a new sequence
        map.render_markers(&h, &points(3), &MarkerStyle::default()).unwrap();
        assert_eq!(6, map.marker_count());
    }

    #[test]
    fn test_to_geojson() {
        let mut map = MapState::default();
        let h = map.initialize(seoul(), 16.).unwrap();
        map.add_marker(&h, seoul(), &MarkerStyle::default()).unwrap();

        let gj = map.to_geojson();
        assert_eq!("FeatureCollection", gj["type"]);
        let f = &gj["features"][0];
        assert_eq!("Location 1", f["properties"]["name"]);
        let lon = f["geometry"]["coordinates"][0].as_f64().unwrap();
        let lat = f["geometry"]["coordinates"][1].as_f64().unwrap();
        assert!((lon - 126.9779).abs() < 1e-9);
        assert!((lat - 37.5663).abs() < 1e-9);
    }
}
