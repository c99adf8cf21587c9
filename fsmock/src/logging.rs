use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter for test runs.
pub const LOG_ENV: &str = "FSMOCK_LOG";

const DEFAULT_FILTER: &str = "fsmock=debug";

/// Install a `tracing` subscriber that writes through the test harness, so
/// records from a logging-enabled stub show up next to the failing test.
///
/// Safe to call from every test; only the first call installs anything.
pub fn init_test_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(filter)
        .try_init();
}
