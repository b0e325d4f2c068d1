//! NPL scenario runner.
//!
//! Loads a world and a set of entity programs from a JSON scenario, checks
//! the programs and runs them headless, a fixed step budget per tick.

pub mod commands;
pub mod scenario;

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing subscriber for debugging.
///
/// Safe to call multiple times. Enable with `RUST_LOG=npl_eval=debug` or
/// `RUST_LOG=trace`. Logs go to stderr so program output on stdout stays
/// clean.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        // Only initialize if RUST_LOG is set
        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(true)
                        .with_level(true),
                )
                .with(filter)
                .init();
        }
    });
}
