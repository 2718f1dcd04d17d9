use tracing::Level;
use tracing_subscriber::fmt;

/// Map a `-v` count to a level: none → warn, `-v` → info, `-vv` → debug, more → trace.
pub fn level_for_verbosity(verbose: u8) -> Level {
    match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Install the global subscriber. Logs go to stderr; stdout carries the CSV.
pub fn init_logging(verbose: u8) {
    fmt()
        .with_max_level(level_for_verbosity(verbose))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
