use serde::Deserialize;

use locmap_common::{GeoCoordinate, Versioned};
use locmap_sources::LOCATIONS_URL;

use crate::render::{MarkerStyle, OSM_TILES};

/// Current version
pub const CVERSION: usize = 1;

/// Where the map starts: Seoul City Hall.
pub const SEOUL_CITY_HALL: GeoCoordinate = GeoCoordinate {
    lon: 126.9779,
    lat: 37.5663,
};

/// Default zoom level.
pub const DEF_ZOOM: f64 = 16.;

/// Configuration for the CLI tool.  Every field is optional in the file, an absent file
/// gives the built-in defaults.
///
/// ```hcl
/// version = 1
/// endpoint = "https://example.net/api/locations"
/// zoom = 14
/// anchor {
///   lat = 37.5663
///   lon = 126.9779
/// }
/// marker {
///   radius = 8
///   color = "red"
///   width = 1
/// }
/// ```
///
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// File version
    pub version: usize,
    /// Locations service
    pub endpoint: String,
    /// Initial zoom level
    pub zoom: f64,
    /// Initial center
    pub anchor: GeoCoordinate,
    /// Tile URL template
    pub tiles: String,
    /// Marker style
    pub marker: MarkerStyle,
    /// Request timeout in seconds, none by default
    pub timeout: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            version: CVERSION,
            endpoint: LOCATIONS_URL.to_string(),
            zoom: DEF_ZOOM,
            anchor: SEOUL_CITY_HALL,
            tiles: OSM_TILES.to_string(),
            marker: MarkerStyle::default(),
            timeout: None,
        }
    }
}

impl Versioned for Config {
    fn version(&self) -> usize {
        self.version
    }

    fn expected() -> usize {
        CVERSION
    }
}
