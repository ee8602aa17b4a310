//! Log output for the scanner
//!
//! stdout carries workflow commands for the CI runner, so every layer here
//! writes to stderr.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter directive used when `RUST_LOG` is unset
pub fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        "debug"
    } else {
        "info"
    }
}

/// Install the global subscriber
///
/// `json_format` switches from compact lines to one JSON object per event.
/// `RUST_LOG` overrides the `verbose` level.
///
/// ```no_run
/// speclink_common::telemetry::init_tracing(true, false);
/// ```
pub fn init_tracing(verbose: bool, json_format: bool) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));

    let (json, compact) = if json_format {
        (Some(fmt::layer().json().with_writer(std::io::stderr)), None)
    } else {
        let compact = fmt::layer()
            .compact()
            .with_target(false)
            .with_writer(std::io::stderr);
        (None, Some(compact))
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json)
        .with(compact)
        .init();
}
