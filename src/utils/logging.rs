// src/utils/logging.rs
use tracing_subscriber::{fmt, EnvFilter};

/// Filter used when `RUST_LOG` is unset. Debug runs also show section transitions.
fn default_directive(debug: bool) -> &'static str {
    if debug {
        "bb_roster_parser=debug,warn"
    } else {
        "info"
    }
}

/// Installs the tracing subscriber. `RUST_LOG` always wins over the `--debug` default.
pub fn setup_logging(debug: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(debug)));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let debug_enabled = debug;
    tracing::debug!("Logging setup complete (debug: {}).", debug_enabled);
}
