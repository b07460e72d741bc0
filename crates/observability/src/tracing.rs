//! Tracing subscriber configuration.

use tracing_subscriber::EnvFilter;

/// Install the global JSON subscriber.
///
/// Level filtering comes from `RUST_LOG`, defaulting to `info` with the
/// placement/cancellation paths at `debug` so reservation activity is
/// visible out of the box. Safe to call multiple times; later calls are
/// no-ops.
pub fn init() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,vendora_catalog=debug,vendora_checkout=debug"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .json()
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(true)
        .try_init();
}
