//! Logging setup.
//!
//! The engine emits `tracing` events; nothing is printed unless a subscriber
//! is installed. Binaries call [`init`] once at startup.

use tracing_subscriber::{fmt, EnvFilter};

/// Installs the global fmt subscriber.
///
/// # Environment
/// - `RUST_LOG`: filter directives (default: `info`),
///   e.g. `RUST_LOG=debug` or `RUST_LOG=u_staffing::scheduler=debug`
///
/// # Example
/// ```no_run
/// use u_staffing::logging;
/// logging::init();
/// ```
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_line_number(true)
        .init();
}

/// Installs a debug-level subscriber that writes through the test harness.
///
/// Safe to call from every test; only the first call takes effect.
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}
