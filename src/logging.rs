use tracing::Level;
use tracing_subscriber::{EnvFilter, fmt};

/// Log level for a `-v` count
pub fn level(verbose: u8) -> Level {
    match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// `RUST_LOG` when set and valid, otherwise the level picked by `-v`
fn filter(verbose: u8) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level(verbose).as_str()))
}

/// Install the global subscriber. Logs go to stderr so `--print-url` output stays clean.
pub fn init(verbose: u8) -> anyhow::Result<()> {
    let detailed = verbose >= 3;

    fmt()
        .compact()
        .with_env_filter(filter(verbose))
        .with_writer(std::io::stderr)
        .with_target(verbose >= 2)
        .with_thread_ids(detailed)
        .with_file(detailed)
        .with_line_number(detailed)
        .try_init()
        .map_err(anyhow::Error::msg)
}
