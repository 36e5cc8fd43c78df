//! Module describing all possible commands and sub-commands to the `mapctl` main driver
//!
//! - `show` fetch the locations, render them and print the map summary and one panel tab,
//! - `geojson` same but dump the markers as a GeoJSON `FeatureCollection`,
//! - `tiles` print the tile URL under the initial center, no network involved,
//! - `completion` is here just to configure the various shells completion system.
//!

use std::path::PathBuf;

use clap::{crate_authors, crate_description, crate_name, crate_version, Parser};
use clap_complete::shells::Shell;

use crate::panel::PanelTab;

/// CLI options
#[derive(Parser)]
#[command(disable_version_flag = true)]
#[clap(name = crate_name!(), about = crate_description!())]
#[clap(version = crate_version!(), author = crate_authors!())]
pub struct Opts {
    /// configuration file.
    #[clap(short = 'c', long)]
    pub config: Option<PathBuf>,
    /// debug mode, hierarchical traces.
    #[clap(short = 'D', long = "debug")]
    pub debug: bool,
    /// Also write traces in this directory.
    #[clap(short = 'L', long)]
    pub log_dir: Option<String>,
    /// Sub-commands (see below).
    #[clap(subcommand)]
    pub subcmd: SubCommand,
}

// ------

/// All sub-commands:
///
/// `completion SHELL`
/// `geojson [-u URL] [-o FILE]`
/// `show [-u URL] [-t TAB]`
/// `tiles [-z ZOOM]`
/// `version`
///
#[derive(Debug, Parser)]
pub enum SubCommand {
    /// Generate Completion stuff
    Completion(ComplOpts),
    /// Dump markers as GeoJSON
    Geojson(GeoJsonOpts),
    /// Fetch locations and display the map summary
    Show(ShowOpts),
    /// Display the tile URL under the initial center
    Tiles(TilesOpts),
    /// List all package versions
    Version,
}

// ------

/// Options for `show`.
///
#[derive(Debug, Parser)]
pub struct ShowOpts {
    /// Panel tab to display.
    #[clap(short = 't', long, value_enum, default_value_t = PanelTab::Locations)]
    pub tab: PanelTab,
    /// Override the locations service URL.
    #[clap(short = 'u', long)]
    pub url: Option<String>,
}

/// Options for `geojson`.
///
#[derive(Debug, Parser)]
pub struct GeoJsonOpts {
    /// Output file, default is stdout.
    #[clap(short = 'o', long)]
    pub output: Option<PathBuf>,
    /// Override the locations service URL.
    #[clap(short = 'u', long)]
    pub url: Option<String>,
}

/// Options for `tiles`.
///
#[derive(Debug, Parser)]
pub struct TilesOpts {
    /// Zoom level, default from configuration.
    #[clap(short = 'z', long)]
    pub zoom: Option<u8>,
}

// ------

/// Options to generate completion files at runtime
///
#[derive(Debug, Parser)]
pub struct ComplOpts {
    #[clap(value_parser)]
    pub shell: Shell,
}
