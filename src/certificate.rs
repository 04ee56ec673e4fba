//! # Offline invertibility certificate
//!
//! Before a calibration is activated, the machine must know that the inverse
//! solver's Jacobian `J(j) = A + 2*B*diag(j)` stays invertible for **every**
//! joint vector inside the configured travel limits, not just at the current
//! point. Sampling the box cannot prove that; this module derives a closed
//! form sufficient condition instead.
//!
//! Writing `J(j) = A * (I + 2*A^-1*B*diag(j))` and bounding `|j[k]|` by the
//! per-axis envelope radius `r[k] = max(|min[k]|, |max[k]|)`, a Neumann
//! series argument shows that `I + 2*A^-1*B*diag(j)` is invertible whenever
//! some induced norm of `M = 2*A^-1*B*diag(r)` is below one. The check uses
//! both the induced 1-norm and infinity-norm and accepts if either is below
//! one.
//!
//! The bound is **sufficient but not necessary**: a calibration may be
//! rejected as [`Certificate::CannotGuarantee`] even though the true
//! Jacobian happens to remain invertible everywhere in the box. That
//! conservatism is the price of an O(1) check with no domain sampling, run
//! once per calibration change and never inside the control loop.

use std::fmt;

use nalgebra::Matrix3;

use crate::bounds::Bounds;
use crate::linalg3;

/// Outcome of the offline invertibility check.
///
/// Advisory: a failed certificate blocks activation of a calibration but
/// does not corrupt solves already in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Certificate {
    /// The Jacobian is invertible at every joint vector inside the limits.
    Guaranteed,
    /// The linear term `A` itself is singular; the inverse problem is
    /// ill-posed everywhere. Terminal.
    ANotInvertible,
    /// The norm bound is not met. The Jacobian may still be invertible
    /// everywhere, but this check cannot prove it.
    CannotGuarantee,
}

impl Certificate {
    pub fn is_guaranteed(&self) -> bool {
        matches!(self, Certificate::Guaranteed)
    }
}

impl fmt::Display for Certificate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Certificate::Guaranteed => {
                write!(f, "Jacobian invertible over the whole joint envelope")
            }
            Certificate::ANotInvertible => {
                write!(f, "calibration matrix A is not invertible")
            }
            Certificate::CannotGuarantee => {
                write!(f, "cannot guarantee Jacobian invertibility over the joint envelope")
            }
        }
    }
}

/// Certify that the inverse problem for calibration terms `a` and `b` is
/// well-posed over the whole box described by `bounds`.
///
/// Evaluates the norm bound described in the [module docs](crate::certificate).
/// With unconstrained default bounds the envelope radius is infinite, so any
/// nonzero quadratic coefficient fails the check; a purely linear
/// calibration (`b = 0`) still certifies. Scaling by an infinite radius
/// treats `0 * inf` as zero: an unconstrained axis only penalizes
/// coefficients it actually excites.
pub fn certify(a: &Matrix3<f64>, b: &Matrix3<f64>, bounds: &Bounds) -> Certificate {
    let inv_a = match linalg3::invert(a) {
        Ok(inv_a) => inv_a,
        Err(_) => return Certificate::ANotInvertible,
    };

    let radius = bounds.envelope_radius();
    let coupling = 2.0 * inv_a * b;

    let mut m = Matrix3::zeros();
    for j in 0..3 {
        for i in 0..3 {
            let coeff = coupling[(i, j)];
            if coeff != 0.0 {
                m[(i, j)] = coeff * radius[j];
            }
        }
    }

    if linalg3::norm_one(&m) >= 1.0 || linalg3::norm_inf(&m) >= 1.0 {
        Certificate::CannotGuarantee
    } else {
        Certificate::Guaranteed
    }
}
