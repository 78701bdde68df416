//! Error types for the tempo core

use thiserror::Error;

/// Errors surfaced by the calendar and analytics layers.
///
/// The timer controller and database facade wrap their failures in `anyhow`
/// with context; this type exists for the places where callers must match on
/// the failure kind instead of just reporting it.
#[derive(Error, Debug)]
pub enum Error {
    /// Caller violated a precondition that must not be silently clamped
    #[error("validation error: {0}")]
    Validation(String),
}

/// Result type alias for the tempo core
pub type Result<T> = std::result::Result<T, Error>;
