//! Logging bootstrap (reads the RUST_LOG env var).

use env_logger::Env;

/// Initialize the process-wide logger. Safe to call more than once; later
/// calls are no-ops so tests can initialize freely.
pub fn init() {
    let _ = env_logger::Builder::from_env(Env::default().default_filter_or("info")).try_init();
}
