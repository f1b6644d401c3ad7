//! Tracing/logging setup shared by stockcast binaries.
//!
//! Library crates only emit `tracing` events; installing a subscriber is the
//! binary's job, done once at startup through [`init`].

pub mod tracing;

pub use self::tracing::LogFormat;

/// Initialize process-wide tracing with JSON output.
///
/// Safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init(LogFormat::Json);
}

/// Initialize process-wide tracing with an explicit output format.
pub fn init_with(format: LogFormat) {
    tracing::init(format);
}
