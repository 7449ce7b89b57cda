//! Least squares solver.
//!
//! We solve one small regression problem per interaction:
//!
//! ```text
//! minimize Σ (y_i - x_i^T β)^2
//! ```
//!
//! SVD is used rather than the normal equations so that rank-deficient
//! designs (e.g. a centred feature column that is all zeros) still produce the
//! minimum-norm solution instead of failing.

use nalgebra::{DMatrix, DVector};

/// Solve a least squares problem using SVD.
///
/// Returns `None` if no finite solution is found.
pub fn solve_least_squares(x: &DMatrix<f64>, y: &DVector<f64>) -> Option<DVector<f64>> {
    let svd = x.clone().svd(true, true);

    // Singular values below the tolerance are treated as zero, which is what
    // gives the minimum-norm answer for collinear columns.
    for &tol in &[1e-10, 1e-8, 1e-6] {
        if let Ok(beta) = svd.solve(y, tol) {
            if beta.iter().all(|v| v.is_finite()) {
                return Some(beta);
            }
        }
    }

    None
}
