//! Error types for the filter pipeline.

use thiserror::Error;

/// Error type for filter operations.
#[derive(Error, Debug)]
pub enum FilterError {
    /// The host cancelled the in-flight render.
    ///
    /// Cooperative and retryable: nothing is cached or partially written,
    /// and the next request starts clean.
    #[error("render aborted")]
    Aborted,

    /// A contract violation surfaced by the upstream source.
    #[error(transparent)]
    Source(#[from] mattegrow_core::Error),
}

impl FilterError {
    /// Returns `true` if this is a cooperative cancellation.
    #[inline]
    pub fn is_aborted(&self) -> bool {
        matches!(self, Self::Aborted)
    }
}

/// Result type for filter operations.
pub type FilterResult<T> = Result<T, FilterError>;
