use tracing::Level;

/// Installs the global fmt subscriber, writing to stderr so stdout stays
/// clean for table or JSON output. Later calls are no-ops.
pub fn init_logging(level: Level) {
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
