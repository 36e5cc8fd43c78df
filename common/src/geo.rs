//! Coordinate related module
//!
//! We deal with two reference systems:
//!
//! - geodetic coordinates on WGS84 ([EPSG:4326]), longitude first,
//! - projected coordinates on spherical Web Mercator ([EPSG:3857]), in metres.
//!
//! The locations service sends `[lat, lng]` pairs, everything in here works with
//! `(lon, lat)` so the only place where the order is swapped is [`GeoCoordinate::from_lat_lng()`].
//!
//! [EPSG:4326]: https://epsg.io/4326
//! [EPSG:3857]: https://epsg.io/3857
//!
use std::f64::consts::FRAC_PI_2;
use std::f64::consts::FRAC_PI_4;
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Radius of the sphere used by Web Mercator (WGS84 semi-major axis) in metres.
pub const EARTH_RADIUS: f64 = 6_378_137.0;

/// Latitude at which the projected world becomes a square.
pub const MAX_LATITUDE: f64 = 85.051_128_779_806_59;

/// Half of the projected world extent, both axis.
pub const HALF_EXTENT: f64 = std::f64::consts::PI * EARTH_RADIUS;

/// Errors for coordinates we can not project.
///
#[derive(Clone, Debug, Error, PartialEq)]
pub enum InvalidCoordinate {
    #[error("Non-finite coordinate ({0}, {1})")]
    NotFinite(f64, f64),
    #[error("Longitude {0} out of range")]
    Longitude(f64),
    #[error("Latitude {0} out of range")]
    Latitude(f64),
}

/// A geodetic coordinate, in degrees.
///
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct GeoCoordinate {
    /// Longitude
    pub lon: f64,
    /// Latitude
    pub lat: f64,
}

impl GeoCoordinate {
    #[inline]
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    /// Take a `[lat, lng]` pair as sent by the locations service.
    ///
    #[inline]
    pub fn from_lat_lng(pair: [f64; 2]) -> Self {
        let [lat, lon] = pair;
        Self { lon, lat }
    }

    /// Return the `[lat, lng]` pair, used for display.
    ///
    #[inline]
    pub fn to_lat_lng(&self) -> [f64; 2] {
        [self.lat, self.lon]
    }

    /// Check whether we can project this coordinate.
    ///
    pub fn validate(&self) -> Result<(), InvalidCoordinate> {
        if !self.lon.is_finite() || !self.lat.is_finite() {
            return Err(InvalidCoordinate::NotFinite(self.lon, self.lat));
        }
        if !(-180.0..=180.0).contains(&self.lon) {
            return Err(InvalidCoordinate::Longitude(self.lon));
        }
        if !(-MAX_LATITUDE..=MAX_LATITUDE).contains(&self.lat) {
            return Err(InvalidCoordinate::Latitude(self.lat));
        }
        Ok(())
    }
}

impl Display for GeoCoordinate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}, {}", self.lat, self.lon)
    }
}

/// A point on the Web Mercator plane, in metres.
///
/// Only ever built through projection or [`ProjectedCoordinate::new()`], there are no setters.
///
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct ProjectedCoordinate {
    x: f64,
    y: f64,
}

impl ProjectedCoordinate {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn x(&self) -> f64 {
        self.x
    }

    #[inline]
    pub fn y(&self) -> f64 {
        self.y
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Display for ProjectedCoordinate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}, {:.2}", self.x, self.y)
    }
}

/// Project a geodetic coordinate onto the Web Mercator plane.
///
/// No check is done, out of range values give out of range or non-finite results.
///
#[inline]
pub fn transform(geo: GeoCoordinate) -> ProjectedCoordinate {
    let x = EARTH_RADIUS * geo.lon.to_radians();
    let y = EARTH_RADIUS * (FRAC_PI_4 + geo.lat.to_radians() / 2.0).tan().ln();
    ProjectedCoordinate { x, y }
}

/// Same as [`transform()`] but refuse anything that does not land inside the projected world.
///
pub fn try_transform(geo: GeoCoordinate) -> Result<ProjectedCoordinate, InvalidCoordinate> {
    geo.validate()?;
    Ok(transform(geo))
}

/// Go back from the Web Mercator plane to geodetic coordinates.
///
#[inline]
pub fn inverse(p: ProjectedCoordinate) -> GeoCoordinate {
    let lon = (p.x / EARTH_RADIUS).to_degrees();
    let lat = (2.0 * (p.y / EARTH_RADIUS).exp().atan() - FRAC_PI_2).to_degrees();
    GeoCoordinate { lon, lat }
}
