//! Side panel next to the map.
//!
//! Three tabs, only `Locations` has content: while the fetch is pending we show a waiting
//! message, then one entry per location, numbered from 1 in fetch order.
//!

use clap::ValueEnum;
use strum::{Display, EnumIter, EnumString};
use tabled::builder::Builder;
use tabled::settings::Style;

use locmap_common::GeoCoordinate;
use locmap_sources::FetchState;

pub const FETCHING: &str = "Fetching coordinates...";
pub const FAILED: &str = "Failed to fetch coordinates.";
pub const NO_CONTENT: &str = "No content!";

#[derive(
    Clone, Copy, Debug, Default, Display, EnumIter, EnumString, Eq, PartialEq, ValueEnum,
)]
#[strum(serialize_all = "lowercase")]
pub enum PanelTab {
    #[default]
    Locations,
    Scale,
    Layers,
}

/// What is displayed for one location, untransformed.
///
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LocationEntry {
    /// Position in the fetched list, from 0
    pub index: usize,
    pub lat: f64,
    pub long: f64,
}

impl LocationEntry {
    pub fn title(&self) -> String {
        format!("Location {}", self.index + 1)
    }
}

/// Build the entries, one per location, same order.
///
pub fn entries(locations: &[GeoCoordinate]) -> Vec<LocationEntry> {
    locations
        .iter()
        .enumerate()
        .map(|(index, geo)| {
            let [lat, long] = geo.to_lat_lng();
            LocationEntry { index, lat, long }
        })
        .collect()
}

impl PanelTab {
    /// Render the tab content as text.
    ///
    #[tracing::instrument(skip(locations))]
    pub fn render(&self, state: FetchState, locations: &[GeoCoordinate]) -> String {
        match self {
            PanelTab::Locations => match state {
                FetchState::Pending => FETCHING.to_string(),
                FetchState::Failed => FAILED.to_string(),
                FetchState::Loaded => {
                    let mut builder = Builder::default();
                    builder.push_record(["Location", "Lat", "Long"]);

                    entries(locations).iter().for_each(|e| {
                        builder.push_record([e.title(), e.lat.to_string(), e.long.to_string()]);
                    });
                    builder.build().with(Style::modern()).to_string()
                }
            },
            PanelTab::Scale | PanelTab::Layers => NO_CONTENT.to_string(),
        }
    }
}
