//! Logging abstraction
//!
//! Provides unified logging macros used throughout the crate:
//! - Library code logs through `log_info!` and friends, which forward to the
//!   [`log`] facade so the embedding application picks the backend
//! - Binaries call [`init`] to install `env_logger` (honours `RUST_LOG`)
//! - Tests call [`init_test_logging`] so output is captured per test
//!
//! Levels follow a fixed convention: mode transitions at info, rejected
//! commands and auto-aborts at warn, collaborator failures at error,
//! stale fixes at debug and per-sample traffic at trace.

#[doc(hidden)]
pub use log as __log;

/// Install `env_logger` as the global logger
///
/// Defaults to `info` when `RUST_LOG` is not set. Calling it twice is harmless.
pub fn init() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .try_init();
}

/// Install a test-friendly logger (output captured by the test harness)
pub fn init_test_logging() {
    let _ = env_logger::builder()
        .is_test(true)
        .filter_level(log::LevelFilter::Trace)
        .try_init();
}

/// Log informational message
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {{
        $crate::core::logging::__log::info!($($arg)*);
    }};
}

/// Log warning message
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {{
        $crate::core::logging::__log::warn!($($arg)*);
    }};
}

/// Log error message
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {{
        $crate::core::logging::__log::error!($($arg)*);
    }};
}

/// Log debug message
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {{
        $crate::core::logging::__log::debug!($($arg)*);
    }};
}

/// Log trace message
#[macro_export]
macro_rules! log_trace {
    ($($arg:tt)*) => {{
        $crate::core::logging::__log::trace!($($arg)*);
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_macros_expand_with_and_without_args() {
        init_test_logging();
        crate::log_info!("plain message");
        crate::log_warn!("value {}", 42);
        crate::log_error!("{} {}", "two", "args");
        crate::log_debug!("debug {:?}", Some(1));
        crate::log_trace!("trace");
    }

    #[test]
    fn test_init_is_idempotent() {
        init_test_logging();
        init();
        init();
    }
}
