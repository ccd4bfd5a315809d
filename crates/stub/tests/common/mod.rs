//! Shared helpers for the stub tests.


use tracing_subscriber::EnvFilter;

/// Routes stub logs to the test output; filter with `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init();
}
