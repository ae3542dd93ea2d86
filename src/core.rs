//! Strategy traits wired into the two consensus loops.
//!
//! Both RANSAC routines take their random-sampling dependency as an injected
//! [`Sampler`] rather than reaching for a global generator, so runs are
//! reproducible under a fixed seed. Homography fitting is likewise a
//! [`HomographySolver`] strategy: the bundled least-squares implementation
//! can be swapped for any routine honoring the same contract.

use nalgebra::Matrix3;

use crate::error::MatchResult;

/// Draws minimal samples for the consensus loops.
pub trait Sampler {
    /// Fill `out` with distinct indices drawn from `0..population`.
    ///
    /// Returns `false` if a valid sample could not be drawn (e.g. the request
    /// exceeds the population). Callers treat a failed draw as a degenerate
    /// iteration or an input-size error, depending on context.
    fn sample(&mut self, population: usize, out: &mut [usize]) -> bool;
}

/// Fits a 3×3 homography to point correspondences.
///
/// Contract: given `src.len() == dst.len() >= 4`, return a least-squares
/// homography `H` with `dst ≈ project(H, src)`, or
/// [`MatchError::DegenerateModel`](crate::MatchError::DegenerateModel) when
/// the points admit no stable solution (collinear or duplicated).
pub trait HomographySolver {
    fn fit(&self, src: &[[f64; 2]], dst: &[[f64; 2]]) -> MatchResult<Matrix3<f64>>;
}
