//! Error types shared across the sat-regrid workspace.

use thiserror::Error;

/// Result type alias using RegridError.
pub type RegridResult<T> = Result<T, RegridError>;

/// Structural errors raised by the regridding core.
///
/// These are raised immediately at the point of detection and never produce
/// partial results. Data-sparsity conditions (cells or bins that receive no
/// valid contribution) are not errors: they are reflected as per-element
/// invalid markers in otherwise complete output.
#[derive(Debug, Error)]
pub enum RegridError {
    /// A field's sample axis disagrees with the geometry an index or
    /// grouping structure was built against.
    #[error("sample axis mismatch: expected {expected} samples, got {actual}")]
    ShapeMismatch { expected: usize, actual: usize },

    /// A zero-length (or fully unusable) sample set was passed where at
    /// least one sample is required.
    #[error("empty input: {0}")]
    EmptyInput(String),

    /// A target region with non-increasing bounds or bounds outside the
    /// sensor disk.
    #[error("invalid target region: {0}")]
    InvalidRegion(String),

    /// Category bin edges that are not strictly increasing or define no bin.
    #[error("invalid bin edges: {0}")]
    InvalidBins(String),
}

impl RegridError {
    /// Create a ShapeMismatch error.
    pub fn shape_mismatch(expected: usize, actual: usize) -> Self {
        Self::ShapeMismatch { expected, actual }
    }

    /// Create an EmptyInput error.
    pub fn empty_input(msg: impl Into<String>) -> Self {
        Self::EmptyInput(msg.into())
    }

    /// Create an InvalidRegion error.
    pub fn invalid_region(msg: impl Into<String>) -> Self {
        Self::InvalidRegion(msg.into())
    }

    /// Create an InvalidBins error.
    pub fn invalid_bins(msg: impl Into<String>) -> Self {
        Self::InvalidBins(msg.into())
    }
}
