//! Log capture for tests

/// Route scanner logs at `level` through the test harness writer
///
/// Safe to call from every test; only the first call in a process installs
/// the subscriber.
pub fn init_test_logging(level: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .with_target(false)
        .try_init();
}

/// Keep test output to errors only
pub fn suppress_logs() {
    init_test_logging("error");
}
