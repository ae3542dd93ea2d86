//! Nearest-neighbor descriptor matching with a ratio test.

use log::debug;
use nalgebra::DMatrix;

use crate::error::{MatchError, MatchResult};
use crate::types::Match;

/// Find, for each descriptor in `descriptors1`, its best match in
/// `descriptors2`, keeping only unambiguous ones.
///
/// Descriptors are rows, assumed unit-norm; distance is the angle
/// `acos(dot)`, with the dot product clamped to `[-1, 1]` so floating-point
/// overshoot never leaves `acos`'s domain. A candidate is accepted iff the
/// distance to the nearest neighbor divided by the distance to the
/// second-nearest is at most `threshold`.
///
/// The output is ascending in `query` with at most one match per query.
/// Several queries may share a train index. Candidates at exactly equal
/// distance keep their original index order (stable sort), so the lower
/// train index wins ties. When the second-nearest distance is zero the ratio
/// is undefined and that query is rejected as maximally ambiguous.
///
/// Fewer than two rows in `descriptors2` yields an empty result: the ratio
/// has no second-nearest neighbor to compare against.
///
/// # Errors
///
/// [`MatchError::InvalidArgument`] if `threshold` lies outside `(0, 1]` or
/// the two matrices disagree in descriptor length.
pub fn find_best_matches(
    descriptors1: &DMatrix<f64>,
    descriptors2: &DMatrix<f64>,
    threshold: f64,
) -> MatchResult<Vec<Match>> {
    if !(threshold > 0.0 && threshold <= 1.0) {
        return Err(MatchError::InvalidArgument {
            reason: format!("ratio threshold must lie in (0, 1], got {threshold}"),
        });
    }
    if descriptors1.nrows() > 0
        && descriptors2.nrows() > 0
        && descriptors1.ncols() != descriptors2.ncols()
    {
        return Err(MatchError::InvalidArgument {
            reason: format!(
                "descriptor length mismatch: {} vs {}",
                descriptors1.ncols(),
                descriptors2.ncols()
            ),
        });
    }

    let n1 = descriptors1.nrows();
    let n2 = descriptors2.nrows();
    let mut matches = Vec::new();
    if n2 < 2 {
        return Ok(matches);
    }

    let mut distances: Vec<(usize, f64)> = Vec::with_capacity(n2);
    for i in 0..n1 {
        let d1 = descriptors1.row(i);

        distances.clear();
        for j in 0..n2 {
            let dot = d1.dot(&descriptors2.row(j)).clamp(-1.0, 1.0);
            distances.push((j, dot.acos()));
        }
        // Stable: equidistant candidates stay in index order.
        distances.sort_by(|a, b| a.1.total_cmp(&b.1));

        let (best_idx, best) = distances[0];
        let (_, second) = distances[1];
        if second > 0.0 && best / second <= threshold {
            matches.push(Match::new(i, best_idx));
        }
    }

    debug!(
        "ratio test kept {} of {} query descriptors",
        matches.len(),
        n1
    );
    Ok(matches)
}

#[cfg(test)]
mod tests {
    use nalgebra::DMatrix;

    use super::find_best_matches;
    use crate::error::MatchError;
    use crate::types::Match;

    /// Rows are unit vectors in the plane at the given angles, padded to make
    /// short synthetic descriptors.
    fn descriptors_at_angles(angles: &[f64]) -> DMatrix<f64> {
        let mut m = DMatrix::zeros(angles.len(), 4);
        for (i, a) in angles.iter().enumerate() {
            m[(i, 0)] = a.cos();
            m[(i, 1)] = a.sin();
        }
        m
    }

    #[test]
    fn identical_sets_match_themselves() {
        let d = descriptors_at_angles(&[0.0, 0.5, 1.0, 1.5, 2.0]);
        let matches = find_best_matches(&d, &d, 0.8).unwrap();

        assert_eq!(matches.len(), d.nrows());
        for (i, m) in matches.iter().enumerate() {
            assert_eq!(*m, Match::new(i, i));
        }
    }

    #[test]
    fn ratio_test_boundary_is_inclusive() {
        // Probe at angle 0; candidates at 0.2 and 0.4 rad.
        let probe = descriptors_at_angles(&[0.0]);
        let candidates = descriptors_at_angles(&[0.2, 0.4]);

        // Recompute the distances exactly as the matcher does.
        let d_best = 0.2f64.cos().clamp(-1.0, 1.0).acos();
        let d_second = 0.4f64.cos().clamp(-1.0, 1.0).acos();
        let ratio = d_best / d_second;

        let accepted = find_best_matches(&probe, &candidates, ratio).unwrap();
        assert_eq!(accepted, vec![Match::new(0, 0)]);

        let rejected = find_best_matches(&probe, &candidates, ratio - 1e-12).unwrap();
        assert!(rejected.is_empty());
    }

    #[test]
    fn equidistant_candidates_keep_index_order() {
        // Two candidates at the same angular distance on either side of the
        // probe; the stable sort must keep index 0 first.
        let probe = descriptors_at_angles(&[0.0]);
        let candidates = descriptors_at_angles(&[0.3, -0.3, 1.2]);

        let matches = find_best_matches(&probe, &candidates, 1.0).unwrap();
        assert_eq!(matches, vec![Match::new(0, 0)]);
    }

    #[test]
    fn duplicate_best_candidates_are_ambiguous() {
        // Both candidates coincide with the probe: second distance is zero,
        // so the ratio is undefined and the query is dropped.
        let probe = descriptors_at_angles(&[0.7]);
        let candidates = descriptors_at_angles(&[0.7, 0.7]);

        let matches = find_best_matches(&probe, &candidates, 1.0).unwrap();
        assert!(matches.is_empty());
    }

    #[test]
    fn single_candidate_yields_no_matches() {
        let probe = descriptors_at_angles(&[0.0, 0.5]);
        let candidates = descriptors_at_angles(&[0.1]);

        let matches = find_best_matches(&probe, &candidates, 0.9).unwrap();
        assert!(matches.is_empty());
    }

    #[test]
    fn invalid_threshold_is_rejected() {
        let d = descriptors_at_angles(&[0.0, 1.0]);
        for t in [0.0, -0.5, 1.5] {
            let err = find_best_matches(&d, &d, t).unwrap_err();
            assert!(matches!(err, MatchError::InvalidArgument { .. }));
        }
    }

    #[test]
    fn mismatched_descriptor_lengths_are_rejected() {
        let d1 = DMatrix::<f64>::zeros(2, 4);
        let d2 = DMatrix::<f64>::zeros(2, 8);
        let err = find_best_matches(&d1, &d2, 0.8).unwrap_err();
        assert!(matches!(err, MatchError::InvalidArgument { .. }));
    }
}
