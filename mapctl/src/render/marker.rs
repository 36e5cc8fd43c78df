//! Markers and the vector layers holding them.
//!

use serde::{Deserialize, Serialize};

use locmap_common::ProjectedCoordinate;

/// Style of a marker: a stroked circle.
///
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct MarkerStyle {
    /// Circle radius in pixels
    pub radius: f64,
    /// Stroke color, any CSS color
    pub color: String,
    /// Stroke width in pixels
    pub width: f64,
}

impl Default for MarkerStyle {
    fn default() -> Self {
        MarkerStyle {
            radius: 10.,
            color: "blue".to_string(),
            width: 2.,
        }
    }
}

/// A point feature, never modified once created.
///
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Marker {
    point: ProjectedCoordinate,
    style: MarkerStyle,
}

impl Marker {
    pub(crate) fn new(point: ProjectedCoordinate, style: &MarkerStyle) -> Self {
        Marker {
            point,
            style: style.clone(),
        }
    }

    pub fn point(&self) -> ProjectedCoordinate {
        self.point
    }

    pub fn style(&self) -> &MarkerStyle {
        &self.style
    }
}

/// One vector layer on top of the tiles.
///
#[derive(Clone, Debug, Serialize)]
pub struct MarkerLayer {
    /// Position in the layer stack
    pub id: usize,
    features: Vec<Marker>,
}

impl MarkerLayer {
    pub(crate) fn new(id: usize, features: Vec<Marker>) -> Self {
        MarkerLayer { id, features }
    }

    pub fn features(&self) -> &[Marker] {
        &self.features
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}
