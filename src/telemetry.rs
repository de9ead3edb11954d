use std::sync::Once;

use tracing::info;
use tracing_subscriber::EnvFilter;

static INIT_TRACING: Once = Once::new();

/// Default filter when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "info,hyper=warn";

/// Install the global fmt subscriber. Safe to call more than once.
pub fn init_tracing() {
    init_tracing_with(DEFAULT_LOG_FILTER);
}

/// `fallback` is used when `RUST_LOG` is unset or invalid.
fn init_tracing_with(fallback: &str) {
    INIT_TRACING.call_once(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .try_init();

        info!("book library tracing initialized");
    });
}
