//! Sampling strategies for the consensus loops.
//!
//! A single uniform strategy ships with the crate; the [`Sampler`] trait in
//! [`core`](crate::core) is the seam for anything smarter.
//!
//! [`Sampler`]: crate::core::Sampler

pub mod uniform;

pub use uniform::UniformRandomSampler;
