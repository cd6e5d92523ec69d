//! Logging utilities and structured logging support

pub use log::{debug, info, warn, error, trace};

/// Initialize the logging system
///
/// Reads the filter from `RUST_LOG`. Calling it twice panics inside
/// `env_logger`, so hosts that may re-initialize should use [`try_init`].
pub fn init() {
    env_logger::init();
}

/// Initialize the logging system, ignoring an already-installed logger
pub fn try_init() -> bool {
    env_logger::try_init().is_ok()
}
