//! Logging utilities

pub use log::{debug, info, warn, error, trace};

/// Initialize the logging system with a fallback filter
///
/// `RUST_LOG` still wins when set. Later calls are ignored.
pub fn init_with_default_level(level: &str) {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .try_init();
}

/// Initialize logging for tests, capturing output per test
pub fn init_for_tests() {
    let _ = env_logger::builder().is_test(true).try_init();
}
