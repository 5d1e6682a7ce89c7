//! Ordinary least squares via Householder QR.
//!
//! We solve
//!
//! ```text
//! minimize ‖A β - b‖²
//! ```
//!
//! where `A` is the (n × p) design matrix (rows = observations) whose first
//! column is the constant intercept term.
//!
//! Implementation choices:
//! - `A = Q R` is computed with nalgebra's Householder QR. We never form `AᵀA`,
//!   so the conditioning of the problem is that of `A`, not its square.
//! - `Qᵀ b` is applied in place from the stored Householder reflectors
//!   (`q_tr_mul`), which avoids materializing `Q`. Only the first `p` entries
//!   are needed for back-substitution against the `p × p` block `R`.
//!   (Nalgebra's `QR::solve` only accepts square systems.)
//! - Columns of `A` are scaled to unit 2-norm before factoring and the
//!   solution is unscaled afterwards (`β_j = γ_j / ‖a_j‖`). The rank test then
//!   only sees the geometry of the columns, not the units of the features.
//! - Rank is estimated from the diagonal of `R`. A pivot that is tiny relative
//!   to the largest one means the columns of `A` are (numerically) dependent,
//!   and back-substitution would amplify rounding noise into the coefficients.
//!   We report that as an error instead of returning the vector.

use nalgebra::{DMatrix, DVector};

use crate::error::RegressionError;

/// Default relative tolerance on `|R_ii| / max_j |R_jj|` below which a pivot is
/// treated as zero.
pub const DEFAULT_RANK_TOL: f64 = 1e-10;

/// Build the design matrix: a private copy of `predictors` with a column of
/// ones inserted at index 0.
pub fn augment_with_intercept(predictors: &DMatrix<f64>) -> DMatrix<f64> {
    predictors.clone().insert_column(0, 1.0)
}

/// Solve a least squares problem using QR.
///
/// `design` must already contain the intercept column. Returns the coefficient
/// vector of length `design.ncols()`.
pub fn solve_least_squares(
    design: &DMatrix<f64>,
    y: &DVector<f64>,
    rank_tol: f64,
) -> Result<DVector<f64>, RegressionError> {
    let (n, p) = design.shape();
    if y.len() != n {
        return Err(RegressionError::DimensionMismatch {
            context: "least squares right-hand side",
            expected: n,
            found: y.len(),
        });
    }
    if n == 0 || p == 0 {
        return Err(RegressionError::EmptyInput("design matrix"));
    }

    // An n × p system with n < p has at most n independent columns.
    if n < p {
        return Err(RegressionError::RankDeficient { rank: n, parameters: p });
    }

    // Zero columns keep scale 1 so they surface as a zero pivot below.
    let norms: Vec<f64> = design
        .column_iter()
        .map(|c| match c.norm() {
            v if v > 0.0 && v.is_finite() => v,
            _ => 1.0,
        })
        .collect();
    let mut scaled = design.clone();
    for (mut col, &norm) in scaled.column_iter_mut().zip(norms.iter()) {
        col /= norm;
    }

    let qr = scaled.qr();
    let r = qr.r();

    let rank = numerical_rank(&r, rank_tol);
    log::debug!("QR of {n}x{p} design matrix: numerical rank {rank}");
    if rank < p {
        return Err(RegressionError::RankDeficient { rank, parameters: p });
    }

    let mut qty = y.clone();
    qr.q_tr_mul(&mut qty);
    let rhs = qty.rows(0, p).into_owned();

    let gamma = r
        .solve_upper_triangular(&rhs)
        .ok_or(RegressionError::RankDeficient { rank, parameters: p })?;
    let beta = DVector::from_iterator(p, gamma.iter().zip(norms.iter()).map(|(g, norm)| g / norm));

    if !beta.iter().all(|v| v.is_finite()) {
        return Err(RegressionError::RankDeficient { rank, parameters: p });
    }

    Ok(beta)
}

/// Count the pivots of `r` whose magnitude exceeds `tol` times the largest one.
///
/// Without column pivoting this is an estimate; it is exact for the question we
/// care about (is every pivot non-negligible).
pub fn numerical_rank(r: &DMatrix<f64>, tol: f64) -> usize {
    let pivots: Vec<f64> = (0..r.nrows().min(r.ncols())).map(|i| r[(i, i)].abs()).collect();
    let max = pivots.iter().fold(0.0_f64, |m, &v| m.max(v));
    if max == 0.0 || !max.is_finite() {
        return 0;
    }
    pivots.iter().filter(|&&v| v > tol * max).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn least_squares_solves_simple_system() {
        // Fit y = 2 + 3x on x = [0,1,2]
        let x = DMatrix::from_row_slice(3, 2, &[1.0, 0.0, 1.0, 1.0, 1.0, 2.0]);
        let y = DVector::from_row_slice(&[2.0, 5.0, 8.0]);

        let beta = solve_least_squares(&x, &y, DEFAULT_RANK_TOL).unwrap();
        assert!((beta[0] - 2.0).abs() < 1e-10);
        assert!((beta[1] - 3.0).abs() < 1e-10);
    }

    #[test]
    fn augmentation_prepends_ones_on_a_copy() {
        let x = DMatrix::from_row_slice(2, 2, &[3.0, 4.0, 5.0, 6.0]);
        let a = augment_with_intercept(&x);

        assert_eq!(a.shape(), (2, 3));
        assert_eq!(a.column(0).iter().copied().collect::<Vec<_>>(), vec![1.0, 1.0]);
        assert_eq!(a[(1, 2)], 6.0);
        assert_eq!(x.shape(), (2, 2));
    }

    #[test]
    fn least_squares_matches_normal_equations_on_overdetermined_data() {
        // Noisy-looking but fixed data; compare against (AᵀA)⁻¹ Aᵀ b.
        let x = DMatrix::from_row_slice(
            5,
            2,
            &[1.0, 0.5, 1.0, 1.5, 1.0, 2.0, 1.0, 3.5, 1.0, 4.0],
        );
        let y = DVector::from_row_slice(&[1.1, 2.9, 4.2, 7.1, 7.8]);

        let beta = solve_least_squares(&x, &y, DEFAULT_RANK_TOL).unwrap();
        let xtx = x.transpose() * &x;
        let xty = x.transpose() * &y;
        let expected = xtx.try_inverse().unwrap() * xty;

        for (a, b) in beta.iter().zip(expected.iter()) {
            assert!((a - b).abs() < 1e-9, "QR {a} vs normal equations {b}");
        }
    }

    #[test]
    fn collinear_columns_are_rank_deficient() {
        // Third column is the second plus three times the intercept.
        let x = DMatrix::from_row_slice(3, 3, &[1.0, 1.0, 4.0, 1.0, 2.0, 5.0, 1.0, 3.0, 6.0]);
        let y = DVector::from_row_slice(&[15.0, 19.0, 23.0]);

        let err = solve_least_squares(&x, &y, DEFAULT_RANK_TOL).unwrap_err();
        assert_eq!(err, RegressionError::RankDeficient { rank: 2, parameters: 3 });
    }

    #[test]
    fn fewer_rows_than_columns_is_rank_deficient() {
        let x = DMatrix::from_row_slice(2, 3, &[1.0, 1.0, 2.0, 1.0, 3.0, 5.0]);
        let y = DVector::from_row_slice(&[1.0, 2.0]);

        let err = solve_least_squares(&x, &y, DEFAULT_RANK_TOL).unwrap_err();
        assert_eq!(err, RegressionError::RankDeficient { rank: 2, parameters: 3 });
    }

    #[test]
    fn mismatched_rhs_is_rejected() {
        let x = DMatrix::from_row_slice(2, 2, &[1.0, 0.0, 1.0, 1.0]);
        let y = DVector::from_row_slice(&[1.0, 2.0, 3.0]);

        let err = solve_least_squares(&x, &y, DEFAULT_RANK_TOL).unwrap_err();
        assert!(matches!(err, RegressionError::DimensionMismatch { expected: 2, found: 3, .. }));
    }

    #[test]
    fn rank_check_ignores_feature_scale() {
        // y = 1 + 2e-12 x with x around 1e12, and y = 1 + 2e12 x with x around 1e-12.
        for (scale, slope) in [(1e12, 2e-12), (1e-12, 2e12)] {
            let xs = [1.0, 2.0, 3.0, 4.0].map(|v| v * scale);
            let x = DMatrix::from_fn(4, 2, |i, j| if j == 0 { 1.0 } else { xs[i] });
            let y = DVector::from_iterator(4, xs.iter().map(|v| 1.0 + slope * v));

            let beta = solve_least_squares(&x, &y, DEFAULT_RANK_TOL).unwrap();
            assert!((beta[0] - 1.0).abs() < 1e-8, "scale {scale}: intercept {}", beta[0]);
            assert!((beta[1] / slope - 1.0).abs() < 1e-8, "scale {scale}: slope {}", beta[1]);
        }
    }

    #[test]
    fn zero_feature_column_is_rank_deficient() {
        let x = DMatrix::from_row_slice(3, 2, &[1.0, 0.0, 1.0, 0.0, 1.0, 0.0]);
        let y = DVector::from_row_slice(&[1.0, 2.0, 3.0]);

        let err = solve_least_squares(&x, &y, DEFAULT_RANK_TOL).unwrap_err();
        assert_eq!(err, RegressionError::RankDeficient { rank: 1, parameters: 2 });
    }

    #[test]
    fn numerical_rank_handles_wide_r() {
        let r = DMatrix::from_row_slice(2, 3, &[2.0, 1.0, 1.0, 0.0, 1e-14, 5.0]);
        assert_eq!(numerical_rank(&r, DEFAULT_RANK_TOL), 1);
    }

    #[test]
    fn numerical_rank_of_zero_matrix_is_zero() {
        assert_eq!(numerical_rank(&DMatrix::zeros(3, 2), DEFAULT_RANK_TOL), 0);
    }
}
