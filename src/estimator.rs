//! RANSAC homography estimation with a refit on the winning consensus set.

use log::{debug, trace};
use nalgebra::Matrix3;

use crate::core::{HomographySolver, Sampler};
use crate::error::{MatchError, MatchResult};
use crate::homography::project;
use crate::settings::RansacHomographySettings;

/// Minimal number of correspondences a homography fit needs.
pub const MIN_CORRESPONDENCES: usize = 4;

/// Outcome of a successful RANSAC homography estimation.
#[derive(Debug, Clone)]
pub struct HomographyEstimate {
    /// The homography refit on all inliers of the winning consensus set.
    pub h: Matrix3<f64>,
    /// Indices of the winning inliers, ascending.
    pub inliers: Vec<usize>,
    /// Number of iterations performed.
    pub iterations: usize,
}

/// Estimate the homography mapping `xy_src` onto `xy_ref`, robust to
/// outlier correspondences.
///
/// Each iteration fits a candidate homography to 4 sampled correspondences
/// and scores it by counting indices whose projected source point lands
/// within `tolerance` of its reference point. A degenerate sample (collinear
/// or duplicated points) scores zero inliers and the loop continues. The
/// candidate fit is only ever used for scoring: the returned matrix is the
/// refit on every inlier of the best consensus set. Ties between equal-sized
/// consensus sets keep the first one found.
///
/// # Errors
///
/// - [`MatchError::InvalidArgument`] for unequal list lengths, zero
///   iterations, or a negative (or NaN) tolerance.
/// - [`MatchError::InsufficientData`] for fewer than 4 correspondences.
/// - [`MatchError::NoConsensus`] when no iteration yields 4 or more inliers.
/// - [`MatchError::DegenerateModel`] if the winning consensus set itself
///   admits no stable refit.
pub fn estimate_homography<S: Sampler, V: HomographySolver>(
    xy_src: &[[f64; 2]],
    xy_ref: &[[f64; 2]],
    num_iterations: usize,
    tolerance: f64,
    sampler: &mut S,
    solver: &V,
) -> MatchResult<HomographyEstimate> {
    if xy_src.len() != xy_ref.len() {
        return Err(MatchError::InvalidArgument {
            reason: format!(
                "coordinate lists differ in length: {} vs {}",
                xy_src.len(),
                xy_ref.len()
            ),
        });
    }
    if num_iterations == 0 {
        return Err(MatchError::InvalidArgument {
            reason: "num_iterations must be positive".into(),
        });
    }
    if !(tolerance >= 0.0) {
        return Err(MatchError::InvalidArgument {
            reason: format!("tolerance must be non-negative, got {tolerance}"),
        });
    }
    let n = xy_src.len();
    if n < MIN_CORRESPONDENCES {
        return Err(MatchError::InsufficientData {
            needed: MIN_CORRESPONDENCES,
            got: n,
        });
    }

    let tol_sq = tolerance * tolerance;
    let mut sample = [0usize; MIN_CORRESPONDENCES];
    let mut best_inliers: Vec<usize> = Vec::new();
    let mut best_iteration = 0;

    for iteration in 0..num_iterations {
        if !sampler.sample(n, &mut sample) {
            continue;
        }
        let src4 = sample.map(|k| xy_src[k]);
        let ref4 = sample.map(|k| xy_ref[k]);

        let h = match solver.fit(&src4, &ref4) {
            Ok(h) => h,
            Err(_) => {
                trace!("iteration {iteration}: degenerate minimal sample, skipped");
                continue;
            }
        };

        let mut inliers = Vec::new();
        for (j, (s, r)) in xy_src.iter().zip(xy_ref).enumerate() {
            let p = project(&h, s[0], s[1]);
            let dx = p[0] - r[0];
            let dy = p[1] - r[1];
            let dist_sq = dx * dx + dy * dy;
            // Non-finite projections (w' == 0) never count as inliers.
            if dist_sq.is_finite() && dist_sq <= tol_sq {
                inliers.push(j);
            }
        }

        if inliers.len() > best_inliers.len() {
            trace!(
                "iteration {iteration}: new best consensus of {} inliers",
                inliers.len()
            );
            best_inliers = inliers;
            best_iteration = iteration;
        }
    }

    if best_inliers.len() < MIN_CORRESPONDENCES {
        return Err(MatchError::NoConsensus {
            best: best_inliers.len(),
        });
    }

    let src_in: Vec<[f64; 2]> = best_inliers.iter().map(|&j| xy_src[j]).collect();
    let ref_in: Vec<[f64; 2]> = best_inliers.iter().map(|&j| xy_ref[j]).collect();
    let h = solver.fit(&src_in, &ref_in)?;

    debug!(
        "homography consensus: {} of {} inliers (best at iteration {best_iteration})",
        best_inliers.len(),
        n
    );
    Ok(HomographyEstimate {
        h,
        inliers: best_inliers,
        iterations: num_iterations,
    })
}

/// [`estimate_homography`] with the loop parameters supplied through
/// [`RansacHomographySettings`].
pub fn estimate_homography_with<S: Sampler, V: HomographySolver>(
    xy_src: &[[f64; 2]],
    xy_ref: &[[f64; 2]],
    settings: &RansacHomographySettings,
    sampler: &mut S,
    solver: &V,
) -> MatchResult<HomographyEstimate> {
    estimate_homography(
        xy_src,
        xy_ref,
        settings.num_iterations,
        settings.tolerance,
        sampler,
        solver,
    )
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use nalgebra::Matrix3;

    use super::estimate_homography;
    use crate::error::MatchError;
    use crate::homography::{project, LeastSquaresSolver};
    use crate::samplers::UniformRandomSampler;

    fn assert_same_up_to_scale(a: &Matrix3<f64>, b: &Matrix3<f64>, epsilon: f64) {
        let an = a / a[(2, 2)];
        let bn = b / b[(2, 2)];
        for r in 0..3 {
            for c in 0..3 {
                assert_relative_eq!(an[(r, c)], bn[(r, c)], epsilon = epsilon);
            }
        }
    }

    fn grid_correspondences(h: &Matrix3<f64>, side: usize) -> (Vec<[f64; 2]>, Vec<[f64; 2]>) {
        let mut src = Vec::new();
        let mut dst = Vec::new();
        for i in 0..side {
            for j in 0..side {
                let s = [i as f64 * 25.0, j as f64 * 25.0];
                src.push(s);
                dst.push(project(h, s[0], s[1]));
            }
        }
        (src, dst)
    }

    #[test]
    fn recovers_a_known_homography_without_noise() {
        let h_true = Matrix3::new(2.0, 0.2, 30.0, -0.1, 1.8, -12.0, 1e-4, 2e-4, 1.0);
        let (src, dst) = grid_correspondences(&h_true, 4);

        let mut sampler = UniformRandomSampler::from_seed(17);
        let solver = LeastSquaresSolver::new();
        let estimate =
            estimate_homography(&src, &dst, 50, 1e-6, &mut sampler, &solver).unwrap();

        assert_eq!(estimate.inliers.len(), src.len());
        assert_same_up_to_scale(&estimate.h, &h_true, 1e-6);
    }

    #[test]
    fn single_iteration_suffices_on_clean_data() {
        let h_true = Matrix3::new(1.0, 0.0, 5.0, 0.0, 1.0, -3.0, 0.0, 0.0, 1.0);
        let (src, dst) = grid_correspondences(&h_true, 3);

        let mut sampler = UniformRandomSampler::from_seed(2);
        let solver = LeastSquaresSolver::new();
        let estimate = estimate_homography(&src, &dst, 1, 1e-6, &mut sampler, &solver).unwrap();

        assert_same_up_to_scale(&estimate.h, &h_true, 1e-6);
        assert_eq!(estimate.iterations, 1);
    }

    #[test]
    fn three_correspondences_are_insufficient() {
        let pts = [[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]];
        let mut sampler = UniformRandomSampler::from_seed(1);
        let solver = LeastSquaresSolver::new();

        let err = estimate_homography(&pts, &pts, 10, 1.0, &mut sampler, &solver).unwrap_err();
        assert_eq!(err, MatchError::InsufficientData { needed: 4, got: 3 });
    }

    #[test]
    fn collinear_input_yields_no_consensus() {
        // Every minimal sample is collinear, so every iteration is skipped.
        let src: Vec<[f64; 2]> = (0..6).map(|i| [i as f64, 0.0]).collect();
        let dst: Vec<[f64; 2]> = (0..6).map(|i| [i as f64, 1.0]).collect();

        let mut sampler = UniformRandomSampler::from_seed(8);
        let solver = LeastSquaresSolver::new();
        let err = estimate_homography(&src, &dst, 20, 1.0, &mut sampler, &solver).unwrap_err();

        assert_eq!(err, MatchError::NoConsensus { best: 0 });
    }

    #[test]
    fn invalid_arguments_are_rejected() {
        let pts = [[0.0, 0.0], [1.0, 0.0], [0.0, 1.0], [1.0, 1.0]];
        let short = [[0.0, 0.0]];
        let mut sampler = UniformRandomSampler::from_seed(1);
        let solver = LeastSquaresSolver::new();

        let err =
            estimate_homography(&pts, &short, 10, 1.0, &mut sampler, &solver).unwrap_err();
        assert!(matches!(err, MatchError::InvalidArgument { .. }));

        let err = estimate_homography(&pts, &pts, 0, 1.0, &mut sampler, &solver).unwrap_err();
        assert!(matches!(err, MatchError::InvalidArgument { .. }));

        let err = estimate_homography(&pts, &pts, 10, -0.5, &mut sampler, &solver).unwrap_err();
        assert!(matches!(err, MatchError::InvalidArgument { .. }));
    }
}
