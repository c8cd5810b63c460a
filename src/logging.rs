//! Log subscriber setup for the binary.
//!
//! Library code only emits `tracing` events; installing a subscriber is left
//! to the caller. Logs go to stderr so command output on stdout stays clean.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default filter for a verbosity level (`-q` = -1, `-v` = 1, `-vv` = 2).
pub fn default_directive(verbosity: i8) -> &'static str {
    match verbosity {
        i8::MIN..=-1 => "tgalign=warn",
        0 => "tgalign=info",
        1 => "tgalign=debug",
        _ => "tgalign=trace",
    }
}

/// Install the global subscriber. `RUST_LOG` takes precedence over
/// `verbosity` when set.
pub fn init(verbosity: i8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    // Tests and embedders may already have installed a subscriber.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .try_init();
}
