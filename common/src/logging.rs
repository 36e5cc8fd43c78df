//! Common logging initializer
//!

use eyre::Result;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;
use tracing_tree::HierarchicalLayer;

/// Setup the `tracing` subscriber stack.
///
/// - filters are loaded from `RUST_LOG`,
/// - `use_tree` gives the hierarchical output, otherwise a compact one-line format,
/// - `use_file` adds an hourly rolling file in that directory.
///
pub fn init_logging(name: &'static str, use_tree: bool, use_file: Option<String>) -> Result<()> {
    // Load filters from environment
    //
    let filter = EnvFilter::from_default_env();

    // Do we want hierarchical output?
    //
    let (tree, fmt) = if use_tree {
        (
            Some(
                HierarchicalLayer::new(2)
                    .with_ansi(true)
                    .with_span_retrace(true)
                    .with_span_modes(true)
                    .with_targets(true)
                    .with_verbose_entry(true)
                    .with_verbose_exit(true)
                    .with_bracketed_fields(true),
            ),
            None,
        )
    } else {
        (
            None,
            Some(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr)
                    .compact(),
            ),
        )
    };

    // Log to file?
    //
    let file = use_file.map(|dir| {
        let file_appender = tracing_appender::rolling::hourly(dir, name);
        tracing_subscriber::fmt::layer()
            .with_ansi(false)
            .with_writer(file_appender)
    });

    // Combine filters & exporters
    //
    tracing_subscriber::registry()
        .with(filter)
        .with(tree)
        .with(fmt)
        .with(file)
        .try_init()?;

    Ok(())
}
