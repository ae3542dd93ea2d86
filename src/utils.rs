//! Shared numeric and random-sampling utilities.

use rand::distributions::Uniform;
use rand::prelude::*;

/// Uniform index generator backing [`UniformRandomSampler`].
///
/// By default this uses a randomly seeded RNG; test code can construct it
/// from a fixed seed for reproducible behavior.
///
/// [`UniformRandomSampler`]: crate::samplers::UniformRandomSampler
pub struct UniformRandomGenerator {
    rng: StdRng,
}

impl Default for UniformRandomGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl UniformRandomGenerator {
    /// Construct with a random seed (suitable for production use).
    pub fn new() -> Self {
        let rng = StdRng::from_rng(thread_rng()).expect("failed to seed StdRng");
        Self { rng }
    }

    /// Construct with a fixed seed (useful for tests).
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Fill `out` with distinct indices drawn uniformly from `0..population`.
    ///
    /// Rejection sampling; `out.len()` must not exceed `population`. Suitable
    /// for the small draw counts used by minimal solvers.
    pub fn gen_unique(&mut self, out: &mut [usize], population: usize) {
        debug_assert!(out.len() <= population);
        let dist = Uniform::new(0, population);
        for i in 0..out.len() {
            loop {
                let candidate = self.rng.sample(dist);
                if out[..i].iter().all(|&v| v != candidate) {
                    out[i] = candidate;
                    break;
                }
            }
        }
    }
}

/// Gaussian elimination with partial pivoting to solve `A * x = b`.
///
/// `augmented` is `[A | b]` with `A` square; the solution lands in `result`.
/// Returns `false` when the system is singular (pivot below 1e-10) or the
/// shapes disagree.
pub fn gauss_elimination(
    augmented: &mut nalgebra::DMatrix<f64>,
    result: &mut nalgebra::DVector<f64>,
) -> bool {
    let n = augmented.nrows();
    if n != augmented.ncols() - 1 || n != result.len() {
        return false;
    }

    for i in 0..n {
        // Pivot on the largest remaining element in this column.
        let mut max_row = i;
        let mut max_val = augmented[(i, i)].abs();
        for k in (i + 1)..n {
            let val = augmented[(k, i)].abs();
            if val > max_val {
                max_val = val;
                max_row = k;
            }
        }
        if max_row != i {
            augmented.swap_rows(i, max_row);
        }

        if augmented[(i, i)].abs() < 1e-10 {
            return false;
        }

        for k in (i + 1)..n {
            let factor = augmented[(k, i)] / augmented[(i, i)];
            for j in i..augmented.ncols() {
                augmented[(k, j)] -= factor * augmented[(i, j)];
            }
        }
    }

    // Back-substitution.
    for i in (0..n).rev() {
        result[i] = augmented[(i, n)];
        for j in (i + 1)..n {
            result[i] -= augmented[(i, j)] * result[j];
        }
        result[i] /= augmented[(i, i)];
    }

    true
}
