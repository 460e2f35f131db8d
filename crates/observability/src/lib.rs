//! Tracing/logging setup shared by binaries and tests.

/// Initialize process-wide tracing (JSON, filtered by `RUST_LOG`).
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init();
}

/// Initialize tracing for test runs (compact, captured by the test harness).
///
/// Safe to call from every test.
pub fn init_test() {
    tracing::init_test();
}

/// Tracing configuration (filters, layers).
pub mod tracing;
