//! Core shared types for keypoint matching and homography estimation.
//!
//! Descriptors travel as rows of an `nalgebra::DMatrix<f64>` (one descriptor
//! per row), matching the layout produced by the usual feature extractors.
//! Keypoints and matches are small copyable structs.

/// Conventional length of a SIFT-style descriptor.
///
/// The matcher accepts any consistent row length; this constant is the
/// expected one and is used by tests and demos.
pub const DESCRIPTOR_LEN: usize = 128;

/// A detected image feature: position, scale, and orientation.
///
/// `row`/`col` follow image-matrix convention; [`Keypoint::xy`] converts to
/// the `(x, y)` convention used by the homography routines. The orientation
/// unit (radians or degrees) is the caller's choice but must be the same for
/// both images, since the consensus filter compares raw differences.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Keypoint {
    pub row: f64,
    pub col: f64,
    /// Feature scale; positive.
    pub scale: f64,
    pub orientation: f64,
}

impl Keypoint {
    pub fn new(row: f64, col: f64, scale: f64, orientation: f64) -> Self {
        Self {
            row,
            col,
            scale,
            orientation,
        }
    }

    /// Position in `(x, y)` convention: x is the column, y is the row.
    pub fn xy(&self) -> [f64; 2] {
        [self.col, self.row]
    }
}

/// An index pair: descriptor/keypoint `query` in the first collection
/// corresponds to `train` in the second.
///
/// The ratio test yields at most one match per `query`; several queries may
/// share a `train` (no mutual-exclusivity is enforced).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Match {
    pub query: usize,
    pub train: usize,
}

impl Match {
    pub fn new(query: usize, train: usize) -> Self {
        Self { query, train }
    }
}
