//! Process-wide logging setup shared by the Commander 500 binaries.

/// Initialize process-wide tracing/logging.
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init(tracing::LogFormat::from_env());
}

/// Tracing subscriber configuration (filters, output format).
pub mod tracing;
