//! Logging utilities
//!
//! The builder logs through the `log` facade. Applications that do not set up
//! their own logger can call [`init`] to get `env_logger` driven by `RUST_LOG`.

pub use log::{debug, error, info, trace, warn};

/// Initialize the logging system from the `RUST_LOG` environment variable
pub fn init() {
    env_logger::init();
}

/// Initialize logging for tests, ignoring repeated initialization
#[cfg(test)]
pub(crate) fn init_for_tests() {
    let _ = env_logger::builder().is_test(true).try_init();
}
