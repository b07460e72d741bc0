//! Process-wide logging setup.

pub mod tracing;

/// Initialize structured logging for the process.
///
/// Safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init();
}
