//! Error types for loop input validation and processing.

use thiserror::Error;

/// Top-level error type for loop input handling.
#[derive(Debug, Error)]
pub enum LoopError {
    /// Track parameters violate a basic invariant (zero tempo, bad channel count...).
    #[error("invalid track: {0}")]
    InvalidTrack(String),

    /// Slice markers are malformed or out of order.
    #[error("invalid slices: {0}")]
    InvalidSlices(String),

    /// JSON parsing error.
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl BackendError for LoopError {
    fn code(&self) -> &'static str {
        match self {
            LoopError::InvalidTrack(_) => "LOOP_001",
            LoopError::InvalidSlices(_) => "LOOP_002",
            LoopError::JsonParse(_) => "LOOP_003",
            LoopError::Io(_) => "LOOP_004",
        }
    }

    fn category(&self) -> &'static str {
        "input"
    }
}

/// Common trait for backend errors.
///
/// Each error enum in the workspace implements this trait so that the CLI can
/// report failures with a stable code and category.
///
/// # Example
///
/// ```ignore
/// use loopslice_spec::error::BackendError;
///
/// fn handle_error<E: BackendError>(err: E) {
///     eprintln!("[{}] {}", err.code(), err.message());
/// }
/// ```
pub trait BackendError: std::error::Error {
    /// Get the error code for reporting.
    ///
    /// Returns a static string like "LOOP_001" or "META_002".
    fn code(&self) -> &'static str;

    /// Get a human-readable message describing the error.
    fn message(&self) -> String {
        self.to_string()
    }

    /// Get the error category for grouping related errors.
    ///
    /// Returns a category like "input", "metadata", "export".
    fn category(&self) -> &'static str;
}
