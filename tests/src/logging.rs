use std::sync::Once;

static INIT: Once = Once::new();

/// Routes `tracing` events to `env_logger`, once per test binary.
///
/// Set `RUST_LOG=stubdb_core=debug` to see store writes.
pub fn init_logging() {
    INIT.call_once(|| {
        let _ = env_logger::builder().is_test(true).try_init();
    });
}
