//! Log output setup.

use std::sync::Once;

static INIT: Once = Once::new();

/// Install the `tracing` subscriber once per process.
///
/// Does nothing unless `RUST_LOG` is set, so normal runs pay no logging
/// cost. Filtering follows `RUST_LOG` (e.g. `RUST_LOG=dsv_grammar=trace`
/// shows every scanner decision).
pub fn init_tracing() {
    INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_target(true)
                        .with_level(true)
                        .with_writer(std::io::stderr),
                )
                .with(filter)
                .init();
        }
    });
}
