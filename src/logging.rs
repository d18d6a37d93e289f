use tracing::Level;

/// Pick the log level: --verbose wins, then the configured level, then WARN.
pub fn resolve_level(verbose: bool, configured: Option<&str>) -> Level {
    if verbose {
        return Level::DEBUG;
    }
    configured
        .and_then(|level| level.parse().ok())
        .unwrap_or(Level::WARN)
}

/// Install the stderr log subscriber. Safe to call more than once; later
/// calls are ignored.
pub fn init(verbose: bool, configured: Option<&str>) {
    let level = resolve_level(verbose, configured);
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
