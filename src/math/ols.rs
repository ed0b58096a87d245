//! Least squares solver.
//!
//! Training solves one linear regression problem:
//!
//! ```text
//! minimize Σ (price_i - x_i^T β)^2
//! ```
//!
//! Implementation choices:
//! - SVD rather than normal equations or QR. The design matrix is tall and
//!   rank-deficient by construction (`total_quality` is a linear combination of
//!   the ten quality codes), and SVD returns the minimum-norm solution instead of
//!   failing. Nalgebra's `QR::solve` also only handles square systems.
//! - The matrix has 23 columns, so SVD cost is negligible next to CSV parsing.

use nalgebra::{DMatrix, DVector};

/// Solve a least squares problem using SVD.
///
/// Returns `None` if no finite solution exists at any tolerance.
pub fn solve_least_squares(x: &DMatrix<f64>, y: &DVector<f64>) -> Option<DVector<f64>> {
    let svd = x.clone().svd(true, true);

    // Singular values below `tol` are treated as zero (pseudo-inverse).
    for &tol in &[1e-10, 1e-8, 1e-6] {
        if let Ok(beta) = svd.solve(y, tol) {
            if beta.iter().all(|v| v.is_finite()) {
                return Some(beta);
            }
        }
    }

    None
}
