//! Process-wide tracing setup shared by the binaries.

/// Initialize tracing from the environment (`RUST_LOG`, `LOG_FORMAT`).
///
/// Safe to call multiple times; later calls are no-ops.
pub fn init() {
    tracing::init(tracing::TracingConfig::from_env());
}

pub mod tracing;
