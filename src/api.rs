//! High-level API with production defaults.
//!
//! These wrappers construct an entropy-seeded [`UniformRandomSampler`] and
//! the bundled [`LeastSquaresSolver`] internally. For reproducible runs or
//! custom strategies, call the underlying functions in
//! [`consensus`](crate::consensus) and [`estimator`](crate::estimator)
//! directly.

use nalgebra::{DMatrix, Matrix3};

use crate::consensus;
use crate::error::MatchResult;
use crate::estimator;
use crate::homography::LeastSquaresSolver;
use crate::matching;
use crate::samplers::UniformRandomSampler;
use crate::types::{Keypoint, Match};

/// Consensus-filter candidate matches with a production sampler.
///
/// See [`consensus::filter_matches`].
pub fn filter_matches_ransac(
    matches: &[Match],
    keypoints1: &[Keypoint],
    keypoints2: &[Keypoint],
    orient_agreement: f64,
    scale_agreement: f64,
) -> MatchResult<Vec<Match>> {
    let mut sampler = UniformRandomSampler::new();
    consensus::filter_matches(
        matches,
        keypoints1,
        keypoints2,
        orient_agreement,
        scale_agreement,
        &mut sampler,
    )
}

/// Estimate a homography from matched coordinates with a production sampler
/// and the bundled least-squares solver, returning just the matrix.
///
/// See [`estimator::estimate_homography`] for the full result (inlier
/// indices, iteration count) and the error contract.
pub fn estimate_homography_ransac(
    xy_src: &[[f64; 2]],
    xy_ref: &[[f64; 2]],
    num_iterations: usize,
    tolerance: f64,
) -> MatchResult<Matrix3<f64>> {
    let mut sampler = UniformRandomSampler::new();
    let solver = LeastSquaresSolver::new();
    estimator::estimate_homography(
        xy_src,
        xy_ref,
        num_iterations,
        tolerance,
        &mut sampler,
        &solver,
    )
    .map(|estimate| estimate.h)
}

/// Match two descriptor sets and consensus-filter the result in one call.
///
/// Pure composition of [`matching::find_best_matches`] and
/// [`filter_matches_ransac`]; either stage's errors propagate unchanged.
#[allow(clippy::too_many_arguments)]
pub fn find_best_matches_ransac(
    keypoints1: &[Keypoint],
    keypoints2: &[Keypoint],
    descriptors1: &DMatrix<f64>,
    descriptors2: &DMatrix<f64>,
    threshold: f64,
    orient_agreement: f64,
    scale_agreement: f64,
) -> MatchResult<Vec<Match>> {
    let matches = matching::find_best_matches(descriptors1, descriptors2, threshold)?;
    filter_matches_ransac(
        &matches,
        keypoints1,
        keypoints2,
        orient_agreement,
        scale_agreement,
    )
}
