//! # Keymatch - Keypoint Matching and Robust Homography Estimation
//!
//! `keymatch` is the "correspondence + robust fit" stage of an image
//! alignment pipeline: it matches keypoint descriptors between two images
//! and estimates the homography relating them, tolerating a high fraction
//! of incorrect correspondences.
//!
//! Keypoint detection and descriptor extraction happen upstream; warping and
//! blending happen downstream. This crate only consumes already-computed
//! keypoints/descriptors and produces match lists and 3×3 matrices.
//!
//! ## Quick Start
//!
//! ```rust
//! use keymatch::estimate_homography_ransac;
//!
//! // Five correspondences related by a pure translation.
//! let src = vec![[0.0, 0.0], [10.0, 0.0], [10.0, 10.0], [0.0, 10.0], [5.0, 2.0]];
//! let reference: Vec<[f64; 2]> = src.iter().map(|p| [p[0] + 3.0, p[1] - 1.0]).collect();
//!
//! let h = estimate_homography_ransac(&src, &reference, 100, 1.0).unwrap();
//! assert!((h[(0, 2)] - 3.0).abs() < 1e-6);
//! ```
//!
//! The full matching pipeline composes the same way the pieces do:
//! descriptors go through [`find_best_matches`] (nearest-neighbor with a
//! ratio test), candidate matches through [`filter_matches`]
//! (orientation/scale consensus), and matched coordinates through
//! [`estimate_homography`] (spatial consensus with a refit on the winning
//! inlier set). [`api::find_best_matches_ransac`] wires the first two
//! together.
//!
//! ## Determinism
//!
//! Both consensus loops take their randomness as an injected
//! [`Sampler`](core::Sampler); pass
//! [`UniformRandomSampler::from_seed`](samplers::UniformRandomSampler::from_seed)
//! for reproducible runs. The `api` wrappers use entropy seeding.
//!
//! ## Extending
//!
//! Two strategy seams are public:
//!
//! - **[`Sampler`](core::Sampler)**: how minimal samples are drawn.
//! - **[`HomographySolver`](core::HomographySolver)**: how a homography is
//!   fit to ≥4 correspondences. The bundled [`LeastSquaresSolver`] fixes
//!   `h[2][2] = 1`; substitute a fully projective solver through this trait
//!   without touching the RANSAC logic.
//!
//! ## Modules
//!
//! - **[`api`]**: high-level entry points with production defaults
//! - **[`matching`]**: ratio-test descriptor matching
//! - **[`consensus`]**: orientation/scale consensus filtering
//! - **[`estimator`]**: RANSAC homography estimation
//! - **[`homography`]**: projection and the default solver
//! - **[`samplers`]**: built-in sampling strategies
//! - **[`settings`]**: configuration types with production defaults

pub mod api;
pub mod consensus;
pub mod core;
pub mod error;
pub mod estimator;
pub mod homography;
pub mod matching;
pub mod samplers;
pub mod settings;
pub mod types;
pub mod utils;

// Re-export the high-level API.
pub use api::{estimate_homography_ransac, filter_matches_ransac, find_best_matches_ransac};

// Re-export the core building blocks for easy access.
pub use consensus::{filter_matches, filter_matches_with};
pub use core::{HomographySolver, Sampler};
pub use error::{MatchError, MatchResult};
pub use estimator::{estimate_homography, estimate_homography_with, HomographyEstimate};
pub use homography::{project_points, LeastSquaresSolver};
pub use matching::find_best_matches;
pub use samplers::UniformRandomSampler;
pub use settings::{ConsensusSettings, RansacHomographySettings};
pub use types::{Keypoint, Match, DESCRIPTOR_LEN};
