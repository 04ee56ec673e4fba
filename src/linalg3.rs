//! 3x3 helpers on top of [`nalgebra`]: fallible inversion and induced norms.

use nalgebra::Matrix3;

use crate::calikins_errors::CalikinsError;

/// Invert a 3x3 matrix.
///
/// Delegates to nalgebra's closed-form 3x3 kernel (adjugate divided by the
/// cofactor-expansion determinant). The determinant test is an exact
/// comparison against zero, with no epsilon threshold: an ill-conditioned
/// but nonzero determinant still inverts, only a determinant of exactly
/// `0.0` fails with [`CalikinsError::SingularMatrix`].
pub fn invert(m: &Matrix3<f64>) -> Result<Matrix3<f64>, CalikinsError> {
    m.try_inverse().ok_or(CalikinsError::SingularMatrix)
}

/// Induced 1-norm of a 3x3 matrix: the maximum absolute column sum.
pub fn norm_one(m: &Matrix3<f64>) -> f64 {
    let mut norm = 0.0;
    for j in 0..3 {
        let abs_sum: f64 = m.column(j).iter().map(|x| x.abs()).sum();
        if abs_sum > norm {
            norm = abs_sum;
        }
    }
    norm
}

/// Induced infinity-norm of a 3x3 matrix: the maximum absolute row sum.
pub fn norm_inf(m: &Matrix3<f64>) -> f64 {
    let mut norm = 0.0;
    for i in 0..3 {
        let abs_sum: f64 = m.row(i).iter().map(|x| x.abs()).sum();
        if abs_sum > norm {
            norm = abs_sum;
        }
    }
    norm
}
