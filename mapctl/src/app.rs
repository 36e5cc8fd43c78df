//! Startup pipeline.
//!
//! Map initialization and the locations fetch are started together; once the fetch is done
//! the coordinates are projected and rendered in one pass:
//!
//! fetch -> transform all -> render all
//!
//! A failed fetch is not fatal, the map stays there with no markers and the panel says so.
//!

use std::fmt::Write;
use std::sync::Arc;
use std::time::Duration;

use eyre::Result;
use tracing::{error, info, trace, warn};

use locmap_common::{transform, GeoCoordinate, ProjectedCoordinate};
use locmap_sources::{FetchState, LocationFetcher};

use crate::panel::PanelTab;
use crate::render::{MapHandle, MapState, TileSource};
use crate::Config;

#[derive(Debug)]
pub struct App {
    config: Config,
    fetcher: LocationFetcher,
    map: MapState,
    handle: Option<MapHandle>,
    state: FetchState,
    /// Raw coordinates as fetched, shown in the panel
    locations: Vec<GeoCoordinate>,
    /// Projected once, fed to the map
    points: Option<Arc<[ProjectedCoordinate]>>,
}

impl App {
    pub fn new(config: Config) -> Result<Self> {
        let fetcher = LocationFetcher::new(&config.endpoint)?;
        let fetcher = match config.timeout {
            Some(t) => fetcher.with_timeout(Duration::from_secs(t))?,
            None => fetcher,
        };
        let map = MapState::new(TileSource::new(&config.tiles));

        Ok(App {
            config,
            fetcher,
            map,
            handle: None,
            state: FetchState::default(),
            locations: vec![],
            points: None,
        })
    }

    /// Initialize the map and fetch the locations concurrently, then put the markers on.
    ///
    #[tracing::instrument(skip(self))]
    pub async fn start(&mut self) -> Result<()> {
        trace!("start");

        let anchor = transform(self.config.anchor);
        let zoom = self.config.zoom;

        let map = &mut self.map;
        let fetcher = &self.fetcher;
        let (handle, res) = tokio::join!(
            async move { map.initialize(anchor, zoom) },
            fetcher.fetch_locations()
        );

        // Fetch outcome is kept even when the map can not be built
        self.state.complete(&res);
        match res {
            Ok(locations) => {
                info!("{} locations fetched", locations.len());
                self.locations = locations;
            }
            Err(e) => error!("can not fetch locations: {}", e),
        }

        self.handle = Some(handle?);
        let added = self.materialize()?;
        info!("{} markers added", added);
        Ok(())
    }

    /// Project the fetched locations (once) and render them.
    ///
    /// Does nothing without a map or locations, calling it again does not add anything.
    ///
    pub fn materialize(&mut self) -> Result<usize> {
        let Some(handle) = self.handle else {
            return Ok(0);
        };
        if self.locations.is_empty() {
            return Ok(0);
        }

        let points = match &self.points {
            Some(points) => Arc::clone(points),
            None => {
                let points: Arc<[ProjectedCoordinate]> = self
                    .locations
                    .iter()
                    .map(|geo| {
                        if let Err(e) = geo.validate() {
                            warn!("location {}: {}", geo, e);
                        }
                        transform(*geo)
                    })
                    .collect();
                self.points = Some(Arc::clone(&points));
                points
            }
        };
        Ok(self
            .map
            .render_markers(&handle, &points, &self.config.marker)?)
    }

    pub fn fetch_state(&self) -> FetchState {
        self.state
    }

    pub fn locations(&self) -> &[GeoCoordinate] {
        &self.locations
    }

    pub fn map(&self) -> &MapState {
        &self.map
    }

    pub fn panel(&self, tab: PanelTab) -> String {
        tab.render(self.state, &self.locations)
    }

    /// Text summary of the map and the given panel tab.
    ///
    pub fn report(&self, tab: PanelTab) -> Result<String> {
        let mut out = String::new();

        match self.map.viewport() {
            Some(vp) => {
                writeln!(out, "Center: {} ({})", vp.center_geo(), vp.center())?;
                writeln!(out, "Zoom: {}", vp.zoom())?;
                writeln!(out, "Tile: {}", self.map.tiles().url(vp.center_tile()))?;
            }
            None => writeln!(out, "Map not initialized")?,
        }
        writeln!(out, "Fetch: {}", self.state)?;
        writeln!(out, "Markers: {}", self.map.marker_count())?;
        writeln!(out)?;
        writeln!(out, "{}", self.panel(tab))?;
        Ok(out)
    }
}
