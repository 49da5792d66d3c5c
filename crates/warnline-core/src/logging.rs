//! Tracing subscriber setup.

use std::sync::Once;

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter directive.
pub const LOG_ENV: &str = "WARNLINE_LOG";

const DEFAULT_FILTER: &str = "warnline=info";

static INIT: Once = Once::new();

/// Install a global `fmt` subscriber filtered by `WARNLINE_LOG`.
///
/// Safe to call more than once; only the first call has an effect. If the
/// host already installed a subscriber, this is a no-op.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV)
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .try_init();
    });
}
