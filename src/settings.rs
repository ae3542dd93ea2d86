//! Configuration types for the consensus filter and the homography
//! estimator.
//!
//! Both loops also accept their parameters as plain arguments; the settings
//! structs bundle them with production defaults and, behind the `serde`
//! feature, make them loadable from configuration files.

/// Parameters of the orientation/scale consensus filter.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConsensusSettings {
    /// Maximum deviation from the hypothesized orientation offset, in the
    /// keypoints' orientation unit.
    pub orient_agreement: f64,
    /// Maximum deviation from the hypothesized scale ratio.
    pub scale_agreement: f64,
    /// Number of hypothesis matches drawn per run (clamped to the number of
    /// matches available).
    pub sample_count: usize,
}

impl Default for ConsensusSettings {
    fn default() -> Self {
        Self {
            orient_agreement: 30.0,
            scale_agreement: 0.5,
            sample_count: 10,
        }
    }
}

/// Parameters of the RANSAC homography estimator.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RansacHomographySettings {
    /// Number of minimal-sample iterations.
    pub num_iterations: usize,
    /// Inlier threshold: maximum Euclidean distance, in the points' unit
    /// (typically pixels), between a projected source point and its
    /// reference.
    pub tolerance: f64,
}

impl Default for RansacHomographySettings {
    fn default() -> Self {
        Self {
            num_iterations: 1000,
            tolerance: 3.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn consensus_defaults() {
        let cfg = ConsensusSettings::default();
        assert!((cfg.orient_agreement - 30.0).abs() < 1e-12);
        assert!((cfg.scale_agreement - 0.5).abs() < 1e-12);
        assert_eq!(cfg.sample_count, 10);
    }

    #[test]
    fn homography_defaults() {
        let cfg = RansacHomographySettings::default();
        assert_eq!(cfg.num_iterations, 1000);
        assert!((cfg.tolerance - 3.0).abs() < 1e-12);
    }
}
