//! Tracing initialization.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Environment variable holding the log filter directives.
pub const LOG_ENV: &str = "INFOTUPLE_LOG";

fn filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("infotuple=info"))
}

/// Initialize human-readable logging.
///
/// Reads `INFOTUPLE_LOG` for per-crate levels, e.g.
/// `INFOTUPLE_LOG=infotuple_learner=debug,infotuple_selection=info`.
/// Falls back to `infotuple=info`. Idempotent.
pub fn init_tracing() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .with(filter())
            .try_init();
    });
}

/// Initialize structured JSON logging. Idempotent, and a no-op if
/// [`init_tracing`] already ran.
pub fn init_tracing_json() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter())
            .with_target(true)
            .json()
            .try_init();
    });
}
