//! Error types shared across the matching and estimation routines.

use thiserror::Error;

/// Errors surfaced by the matching, filtering, and estimation entry points.
///
/// Per-iteration degeneracies inside the consensus loops are absorbed (the
/// loop moves on to the next sample); only failures that invalidate the whole
/// call reach the caller.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MatchError {
    /// Malformed input: shape mismatches, out-of-range thresholds,
    /// out-of-bounds match indices.
    #[error("invalid argument: {reason}")]
    InvalidArgument { reason: String },

    /// Fewer data points than a sampling step requires.
    #[error("insufficient data: need at least {needed}, got {got}")]
    InsufficientData { needed: usize, got: usize },

    /// A point configuration admits no stable homography (collinear or
    /// duplicated points).
    #[error("degenerate point configuration: no stable homography exists")]
    DegenerateModel,

    /// No RANSAC iteration produced a consensus set large enough to refit.
    #[error("no consensus: best inlier set has {best} members, need at least 4")]
    NoConsensus { best: usize },
}

/// Convenience alias used by every fallible function in the crate.
pub type MatchResult<T> = Result<T, MatchError>;
