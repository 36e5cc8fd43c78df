use std::fs;
use std::io;

use clap::{crate_authors, crate_description, crate_version, CommandFactory, Parser};
use clap_complete::generate;
use eyre::Result;
use tracing::{info, trace};

use locmap_common::{init_logging, transform, ConfigFile};
use mapctl::render::{TileId, TileSource};
use mapctl::{App, Config, Opts, SubCommand};

/// Binary name, using a different binary name
pub const NAME: &str = env!("CARGO_BIN_NAME");
/// Binary version
pub const VERSION: &str = crate_version!();
/// Authors
pub const AUTHORS: &str = crate_authors!();

fn main() -> Result<()> {
    let opts = Opts::parse();

    // Initialise logging early
    //
    init_logging(NAME, opts.debug, opts.log_dir.clone())?;

    // Config is optional, defaults are enough to show something.
    //
    let cfg = ConfigFile::<Config>::load(opts.config.as_deref())?.into_inner();

    // Banner
    //
    banner()?;

    handle_subcmd(cfg, &opts.subcmd)
}

pub fn handle_subcmd(mut cfg: Config, subcmd: &SubCommand) -> Result<()> {
    match subcmd {
        // Handle `show`
        //
        SubCommand::Show(sopts) => {
            trace!("show");

            if let Some(url) = &sopts.url {
                cfg.endpoint = url.to_owned();
            }
            let app = run(cfg)?;
            print!("{}", app.report(sopts.tab)?);
        }

        // Handle `geojson`
        //
        SubCommand::Geojson(gopts) => {
            trace!("geojson");

            if let Some(url) = &gopts.url {
                cfg.endpoint = url.to_owned();
            }
            let app = run(cfg)?;
            let data = serde_json::to_string_pretty(&app.map().to_geojson())?;
            match &gopts.output {
                Some(fname) => {
                    info!("Writing {} markers into {:?}", app.map().marker_count(), fname);
                    fs::write(fname, data)?;
                }
                None => println!("{}", data),
            }
        }

        // Standalone `tiles`, no fetch
        //
        SubCommand::Tiles(topts) => {
            trace!("tiles");

            let zoom = topts.zoom.unwrap_or(cfg.zoom.floor() as u8);
            let tile = TileId::containing(transform(cfg.anchor), zoom);
            let tiles = TileSource::new(&cfg.tiles);
            println!("{}", tiles.url(tile));
        }

        // Standalone completion generation
        //
        // NOTE: you can generate UNIX shells completion on Windows and vice-versa.  Not worth
        //       trying to limit depending on the OS.
        //
        SubCommand::Completion(copts) => {
            let generator = copts.shell;
            generate(generator, &mut Opts::command(), NAME, &mut io::stdout());
        }

        // Standalone `version` command
        //
        SubCommand::Version => {
            eprintln!("Modules: ");
            eprintln!("\t{}", version());
            eprintln!("\t{}", locmap_common::version());
            eprintln!("\t{}", locmap_sources::version());
        }
    }
    Ok(())
}

/// Run the startup pipeline on a single-threaded runtime.
///
fn run(cfg: Config) -> Result<App> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    let mut app = App::new(cfg)?;
    runtime.block_on(app.start())?;
    Ok(app)
}

/// Return our version number
///
#[inline]
pub fn version() -> String {
    format!("{}/{}", NAME, VERSION)
}

/// Display banner
///
fn banner() -> Result<()> {
    Ok(eprintln!(
        r##"
{}/{} by {}
{}
"##,
        NAME,
        VERSION,
        AUTHORS,
        crate_description!()
    ))
}
