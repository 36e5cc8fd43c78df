//! `mapctl` library: everything the binary needs to fetch the locations, lay them out on the
//! map and describe the result.
//!
//! - [`render`] owns the map: viewport, tile source, marker layers,
//! - [`panel`] renders the side panel,
//! - [`App`] ties the fetcher, the projection and the map together at startup.
//!

pub use app::*;
pub use cli::*;
pub use config::*;

mod app;
mod cli;
mod config;
pub mod panel;
pub mod render;
