//! Homography projection and the default least-squares solver.

use nalgebra::{DMatrix, DVector, Matrix3, Vector3};

use crate::core::HomographySolver;
use crate::error::{MatchError, MatchResult};
use crate::utils::gauss_elimination;

/// Project a 2D point through a 3×3 homography: `H * [x, y, 1]^T → [u, v]`.
///
/// A vanishing homogeneous coordinate (|w| below 1e-15) yields
/// `[NaN, NaN]`; consensus counting treats non-finite coordinates as
/// non-matches.
pub fn project(h: &Matrix3<f64>, x: f64, y: f64) -> [f64; 2] {
    let p = h * Vector3::new(x, y, 1.0);
    if p[2].abs() < 1e-15 {
        return [f64::NAN, f64::NAN];
    }
    [p[0] / p[2], p[1] / p[2]]
}

/// Project a batch of points through `h`.
///
/// Allocates only the output vector.
pub fn project_points(points: &[[f64; 2]], h: &Matrix3<f64>) -> Vec<[f64; 2]> {
    points.iter().map(|p| project(h, p[0], p[1])).collect()
}

/// Default [`HomographySolver`]: least-squares fit with `h[2][2]` fixed to 1.
///
/// Minimal 4-point systems are solved by Gaussian elimination with partial
/// pivoting; overdetermined systems by column-pivoted QR. Both paths report
/// [`MatchError::DegenerateModel`] when the correspondences admit no stable
/// solution (collinear or duplicated points).
///
/// Fixing the lower-right entry puts homographies with a vanishing `h[2][2]`
/// out of range; that never arises in image-alignment use, and the
/// [`HomographySolver`] seam admits a fully projective solver if needed.
pub struct LeastSquaresSolver;

impl Default for LeastSquaresSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl LeastSquaresSolver {
    pub fn new() -> Self {
        Self
    }
}

/// Fill two rows of the design matrix for correspondence `(x1, y1) -> (x2, y2)`.
///
/// With h22 fixed to 1 the projection equations become, for the eight
/// unknowns `h0..h7`:
///   -h0*x1 - h1*y1 - h2 + h6*x2*x1 + h7*x2*y1 = -x2
///   -h3*x1 - h4*y1 - h5 + h6*y2*x1 + h7*y2*y1 = -y2
fn fill_rows(
    coefficients: &mut DMatrix<f64>,
    rhs: &mut [f64; 2],
    row: usize,
    src: [f64; 2],
    dst: [f64; 2],
) {
    let [x1, y1] = src;
    let [x2, y2] = dst;

    coefficients[(row, 0)] = -x1;
    coefficients[(row, 1)] = -y1;
    coefficients[(row, 2)] = -1.0;
    coefficients[(row, 6)] = x2 * x1;
    coefficients[(row, 7)] = x2 * y1;
    rhs[0] = -x2;

    coefficients[(row + 1, 3)] = -x1;
    coefficients[(row + 1, 4)] = -y1;
    coefficients[(row + 1, 5)] = -1.0;
    coefficients[(row + 1, 6)] = y2 * x1;
    coefficients[(row + 1, 7)] = y2 * y1;
    rhs[1] = -y2;
}

fn matrix_from_solution(h: &DVector<f64>) -> MatchResult<Matrix3<f64>> {
    if h.iter().any(|&v| !v.is_finite()) {
        return Err(MatchError::DegenerateModel);
    }
    Ok(Matrix3::new(
        h[0], h[1], h[2], h[3], h[4], h[5], h[6], h[7], 1.0,
    ))
}

/// Exact fit from four correspondences via Gaussian elimination.
fn fit_minimal(src: &[[f64; 2]], dst: &[[f64; 2]]) -> MatchResult<Matrix3<f64>> {
    let mut augmented = DMatrix::<f64>::zeros(8, 9);
    for i in 0..4 {
        let mut rhs = [0.0; 2];
        fill_rows(&mut augmented, &mut rhs, 2 * i, src[i], dst[i]);
        augmented[(2 * i, 8)] = rhs[0];
        augmented[(2 * i + 1, 8)] = rhs[1];
    }

    let mut h = DVector::<f64>::zeros(8);
    if !gauss_elimination(&mut augmented, &mut h) {
        return Err(MatchError::DegenerateModel);
    }
    matrix_from_solution(&h)
}

/// Least-squares fit from more than four correspondences via column-pivoted
/// QR.
fn fit_least_squares(src: &[[f64; 2]], dst: &[[f64; 2]]) -> MatchResult<Matrix3<f64>> {
    let n = src.len();
    let mut coefficients = DMatrix::<f64>::zeros(2 * n, 8);
    let mut inhomogeneous = DVector::<f64>::zeros(2 * n);

    for i in 0..n {
        let mut rhs = [0.0; 2];
        fill_rows(&mut coefficients, &mut rhs, 2 * i, src[i], dst[i]);
        inhomogeneous[2 * i] = rhs[0];
        inhomogeneous[2 * i + 1] = rhs[1];
    }

    let qr = coefficients.col_piv_qr();
    let h = qr.solve(&inhomogeneous).ok_or(MatchError::DegenerateModel)?;
    matrix_from_solution(&h)
}

impl HomographySolver for LeastSquaresSolver {
    fn fit(&self, src: &[[f64; 2]], dst: &[[f64; 2]]) -> MatchResult<Matrix3<f64>> {
        if src.len() != dst.len() {
            return Err(MatchError::InvalidArgument {
                reason: format!(
                    "correspondence lists differ in length: {} vs {}",
                    src.len(),
                    dst.len()
                ),
            });
        }
        if src.len() < 4 {
            return Err(MatchError::InsufficientData {
                needed: 4,
                got: src.len(),
            });
        }

        if src.len() == 4 {
            fit_minimal(src, dst)
        } else {
            fit_least_squares(src, dst)
        }
    }
}
