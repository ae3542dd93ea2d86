//! Geometric consensus filtering of candidate matches.
//!
//! A correct set of matches between two views of the same scene agrees on a
//! single relative rotation and scale. The filter samples a handful of
//! hypothesis matches, derives the orientation offset and scale ratio each
//! one implies, and keeps the largest subset of matches consistent with one
//! hypothesis.

use log::debug;

use crate::core::Sampler;
use crate::error::{MatchError, MatchResult};
use crate::settings::ConsensusSettings;
use crate::types::{Keypoint, Match};

/// Keep the largest subset of `matches` agreeing on a common orientation
/// offset and scale ratio.
///
/// Equivalent to [`filter_matches_with`] with the default hypothesis count of
/// 10 (clamped to the number of matches available).
pub fn filter_matches<S: Sampler>(
    matches: &[Match],
    keypoints1: &[Keypoint],
    keypoints2: &[Keypoint],
    orient_agreement: f64,
    scale_agreement: f64,
    sampler: &mut S,
) -> MatchResult<Vec<Match>> {
    let settings = ConsensusSettings {
        orient_agreement,
        scale_agreement,
        ..ConsensusSettings::default()
    };
    filter_matches_with(matches, keypoints1, keypoints2, &settings, sampler)
}

/// [`filter_matches`] with all parameters supplied through
/// [`ConsensusSettings`].
///
/// Orientation differences are deliberately left unwrapped: two orientations
/// on opposite sides of the 2π (or 360°) boundary are judged far apart even
/// though the rotations they describe are nearly identical. This mirrors the
/// reference behavior; callers wanting wrap-around must canonicalize
/// orientations beforehand.
///
/// Ties between equally large consensus sets keep the first one found, so a
/// fixed-seed sampler makes the result fully deterministic.
///
/// # Errors
///
/// - [`MatchError::InsufficientData`] when `matches` is empty: sampling from
///   nothing is invalid, and an error keeps "no input" distinguishable from
///   "ran and found no consensus".
/// - [`MatchError::InvalidArgument`] for negative agreement thresholds, a
///   zero sample count, or match indices out of bounds for the keypoint
///   arrays.
pub fn filter_matches_with<S: Sampler>(
    matches: &[Match],
    keypoints1: &[Keypoint],
    keypoints2: &[Keypoint],
    settings: &ConsensusSettings,
    sampler: &mut S,
) -> MatchResult<Vec<Match>> {
    if matches.is_empty() {
        return Err(MatchError::InsufficientData { needed: 1, got: 0 });
    }
    if settings.orient_agreement < 0.0 || settings.scale_agreement < 0.0 {
        return Err(MatchError::InvalidArgument {
            reason: format!(
                "agreement thresholds must be non-negative, got orient {} / scale {}",
                settings.orient_agreement, settings.scale_agreement
            ),
        });
    }
    if settings.sample_count == 0 {
        return Err(MatchError::InvalidArgument {
            reason: "sample_count must be positive".into(),
        });
    }
    for m in matches {
        if m.query >= keypoints1.len() || m.train >= keypoints2.len() {
            return Err(MatchError::InvalidArgument {
                reason: format!(
                    "match ({}, {}) out of bounds for {} / {} keypoints",
                    m.query,
                    m.train,
                    keypoints1.len(),
                    keypoints2.len()
                ),
            });
        }
    }

    // Never request more hypotheses than there are matches.
    let sample_count = settings.sample_count.min(matches.len());
    let mut sample = vec![0usize; sample_count];
    if !sampler.sample(matches.len(), &mut sample) {
        return Err(MatchError::InsufficientData {
            needed: sample_count,
            got: matches.len(),
        });
    }

    let orient_diff =
        |m: &Match| keypoints1[m.query].orientation - keypoints2[m.train].orientation;
    let scale_ratio = |m: &Match| keypoints1[m.query].scale / keypoints2[m.train].scale;

    let mut largest: Vec<Match> = Vec::new();
    for &s in &sample {
        let offset = orient_diff(&matches[s]);
        let ratio = scale_ratio(&matches[s]);

        let mut current: Vec<Match> = Vec::new();
        for m in matches {
            if (orient_diff(m) - offset).abs() <= settings.orient_agreement
                && (scale_ratio(m) - ratio).abs() <= settings.scale_agreement
            {
                current.push(*m);
            }
        }
        if current.len() > largest.len() {
            largest = current;
        }
    }

    debug!(
        "consensus filter kept {} of {} matches ({} hypotheses)",
        largest.len(),
        matches.len(),
        sample_count
    );
    Ok(largest)
}
