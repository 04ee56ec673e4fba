//! # Bounded Newton-Raphson inverse solver
//!
//! The calibrated forward map is mildly nonlinear (quadratic per axis), so
//! recovering joint values from a target position needs an iterative solve.
//! This module implements a Newton-Raphson iteration with a **hard iteration
//! cap**: the solver runs inside a hard-real-time control cycle and must
//! return within a bounded number of arithmetic operations, so accuracy is
//! traded for deterministic worst-case latency. There are no retries, no
//! adaptive step sizing and no line search, a single linear Newton step per
//! iteration keeps the per-cycle cost predictable.
//!
//! ## Algorithm
//!
//! 1. Initial guess: the target position, clamped into the joint limits when
//!    limits are configured. For a near-identity calibration this starts one
//!    short Newton step away from the solution.
//! 2. Up to `max_iter` times:
//!    * residual `F(j) = A*j + B*(j o j) + C - target`,
//!    * stop as [`SolveStatus::Converged`] when `||F||_2 < tol`,
//!    * Jacobian `J = A + 2*B*diag(j)`; a singular `J` aborts the whole
//!      solve with [`CalikinsError::SingularJacobian`], no partial result,
//!    * Newton update `j <- j - J^-1 * F`, clamped back into the limits.
//! 3. An exhausted budget is **not** an error: the solver returns the last
//!    iterate together with the last evaluated residual norm and
//!    [`SolveStatus::NonConvergence`]. The caller decides whether to use,
//!    hold, or reject that joint vector.
//!
//! Well-posedness of the iteration over the whole joint envelope is checked
//! offline by [`certify`](crate::certificate::certify) whenever the
//! calibration or the limits change; the hot path never re-verifies it.
//!
//! ## Example
//!
//! ```rust
//! use calikins::calibration::CalibrationModel;
//! use calikins::bounds::Bounds;
//! use calikins::solver::{inverse, SolverConfig};
//! use nalgebra::Vector3;
//!
//! let model = CalibrationModel::default();
//! let config = SolverConfig::default();
//! let target = Vector3::new(10.0, 20.0, 30.0);
//!
//! let solution = inverse(&model, Some(&Bounds::symmetric(100.0)), &config, &target).unwrap();
//! assert!(solution.status.is_converged());
//! assert_eq!(solution.joints, target);
//! ```

use std::cmp::Ordering::Greater;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::bounds::Bounds;
use crate::calibration::CalibrationModel;
use crate::calikins_errors::CalikinsError;
use crate::constants::{JointTriple, Pose3, DEFAULT_MAX_ITER, DEFAULT_TOL};
use crate::linalg3;

/// Iteration budget and convergence tolerance of the inverse solver.
///
/// Both values are live-tunable at runtime. `max_iter` bounds the worst-case
/// latency of one solve; `tol` is compared against the Euclidean norm of the
/// position residual, in machine units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolverConfig {
    pub max_iter: u32,
    pub tol: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        SolverConfig {
            max_iter: DEFAULT_MAX_ITER,
            tol: DEFAULT_TOL,
        }
    }
}

impl SolverConfig {
    /// Create a new [`SolverConfigBuilder`] to validate custom settings.
    pub fn builder() -> SolverConfigBuilder {
        SolverConfigBuilder::new()
    }
}

impl fmt::Display for SolverConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SolverConfig(max_iter={}, tol={:.1e})", self.max_iter, self.tol)
    }
}

/// Builder for [`SolverConfig`], with validation.
#[derive(Debug, Clone, Default)]
pub struct SolverConfigBuilder {
    config: SolverConfig,
}

impl SolverConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: SolverConfig::default(),
        }
    }

    pub fn max_iter(mut self, v: u32) -> Self {
        self.config.max_iter = v;
        self
    }

    pub fn tol(mut self, v: f64) -> Self {
        self.config.tol = v;
        self
    }

    /// Return true iff x > 0.0 and comparable (i.e., not NaN).
    #[inline]
    fn gt0(x: f64) -> bool {
        x.partial_cmp(&0.0) == Some(Greater)
    }

    /// Finalize the builder.
    ///
    /// Validation rules:
    /// * `max_iter >= 1` - a zero budget could never even evaluate the residual.
    /// * `tol > 0` and finite - NaN or infinite tolerances are rejected.
    pub fn build(self) -> Result<SolverConfig, CalikinsError> {
        let c = &self.config;
        if c.max_iter == 0 {
            return Err(CalikinsError::InvalidSolverParameter(
                "max_iter must be >= 1".into(),
            ));
        }
        if !Self::gt0(c.tol) || !c.tol.is_finite() {
            return Err(CalikinsError::InvalidSolverParameter(
                "tol must be positive and finite".into(),
            ));
        }
        Ok(self.config)
    }
}

/// Outcome of one bounded inverse solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveStatus {
    /// Residual norm dropped below the configured tolerance.
    Converged,
    /// Iteration budget exhausted above tolerance. A signaled outcome, not a
    /// failure: the caller inspects the residual and decides what to do.
    NonConvergence,
}

impl SolveStatus {
    pub fn is_converged(&self) -> bool {
        matches!(self, SolveStatus::Converged)
    }
}

impl fmt::Display for SolveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolveStatus::Converged => write!(f, "converged"),
            SolveStatus::NonConvergence => write!(f, "iteration budget exhausted"),
        }
    }
}

/// Joint vector recovered by [`inverse`], with convergence diagnostics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InverseSolution {
    /// Last Newton iterate; inside the limits on every axis when limits were given.
    pub joints: JointTriple,
    /// Euclidean norm of the last evaluated position residual.
    pub residual_norm: f64,
    pub status: SolveStatus,
}

/// Recover joint values for a target machine position.
///
/// Runs the bounded Newton-Raphson iteration described in the
/// [module docs](crate::solver). The solver holds no state between calls:
/// every invocation is a fresh computation from `model`, `bounds`, `config`
/// and `target`, so it is safe to call repeatedly from a single control
/// thread at a fixed rate. The solve path performs no allocation and no I/O.
///
/// Arguments
/// -----------------
/// * `model`: calibration snapshot to invert.
/// * `bounds`: optional joint travel limits; when present, the initial guess
///   and every iterate are clamped into them componentwise.
/// * `config`: iteration budget and tolerance.
/// * `target`: machine position to reach.
///
/// Return
/// ----------
/// * `Ok(InverseSolution)` with [`SolveStatus::Converged`] or
///   [`SolveStatus::NonConvergence`], or
/// * `Err(CalikinsError::SingularJacobian)` when an iterate's Jacobian has a
///   determinant of exactly zero, in which case no joint vector is produced.
pub fn inverse(
    model: &CalibrationModel,
    bounds: Option<&Bounds>,
    config: &SolverConfig,
    target: &Pose3,
) -> Result<InverseSolution, CalikinsError> {
    let mut joints = match bounds {
        Some(b) => b.clamp(target),
        None => *target,
    };

    let mut residual_norm = f64::INFINITY;

    for _ in 0..config.max_iter {
        let residual = model.forward(&joints) - target;
        residual_norm = residual.norm();

        if residual_norm < config.tol {
            return Ok(InverseSolution {
                joints,
                residual_norm,
                status: SolveStatus::Converged,
            });
        }

        let jacobian = model.jacobian(&joints);
        let inv_jacobian =
            linalg3::invert(&jacobian).map_err(|_| CalikinsError::SingularJacobian)?;

        joints -= inv_jacobian * residual;
        if let Some(b) = bounds {
            joints = b.clamp(&joints);
        }
    }

    Ok(InverseSolution {
        joints,
        residual_norm,
        status: SolveStatus::NonConvergence,
    })
}

#[cfg(test)]
mod solver_test {
    use super::*;
    use approx::assert_abs_diff_eq;
    use nalgebra::{Matrix3, Vector3};

    #[test]
    fn identity_model_converges_immediately() {
        let model = CalibrationModel::default();
        let target = Vector3::new(10.0, -20.0, 30.0);

        let solution = inverse(&model, None, &SolverConfig::default(), &target).unwrap();

        assert_eq!(solution.status, SolveStatus::Converged);
        assert_eq!(solution.joints, target);
        assert_eq!(solution.residual_norm, 0.0);
    }

    #[test]
    fn offset_model_converges_after_one_step() {
        let model = CalibrationModel {
            c: Vector3::new(0.5, 1.0, 1.5),
            ..Default::default()
        };
        let target = Vector3::new(10.0, 20.0, 30.0);

        let solution = inverse(&model, None, &SolverConfig::default(), &target).unwrap();

        assert_eq!(solution.status, SolveStatus::Converged);
        assert_abs_diff_eq!(
            solution.joints,
            Vector3::new(9.5, 19.0, 28.5),
            epsilon = 1e-12
        );
        assert_eq!(solution.residual_norm, 0.0);
    }

    #[test]
    fn singular_linear_term_aborts_the_solve() {
        // Third row of A is zero, so the Jacobian of the purely linear model
        // is singular at every iterate.
        let model = CalibrationModel {
            a: Matrix3::new(1., 0.025, 0., 0.025, 1., 0., 0., 0., 0.),
            ..Default::default()
        };
        let target = Vector3::new(1.0, 2.0, 3.0);

        let result = inverse(&model, None, &SolverConfig::default(), &target);
        assert_eq!(result, Err(CalikinsError::SingularJacobian));
    }

    #[test]
    fn unreachable_target_pins_joints_to_the_limits() {
        let model = CalibrationModel::default();
        let bounds = Bounds::symmetric(10.0);
        // True solution (40, 0, 0) lies outside the box.
        let target = Vector3::new(40.0, 0.0, 0.0);

        let solution = inverse(&model, Some(&bounds), &SolverConfig::default(), &target).unwrap();

        assert_eq!(solution.status, SolveStatus::NonConvergence);
        assert_eq!(solution.joints, Vector3::new(10.0, 0.0, 0.0));
        assert!(bounds.contains(&solution.joints));
        assert_abs_diff_eq!(solution.residual_norm, 30.0, epsilon = 1e-12);
    }

    #[test]
    fn builder_accepts_valid_settings() {
        let config = SolverConfig::builder().max_iter(20).tol(1e-5).build().unwrap();
        assert_eq!(config.max_iter, 20);
        assert_eq!(config.tol, 1e-5);
    }

    #[test]
    fn builder_rejects_broken_settings() {
        assert!(SolverConfig::builder().max_iter(0).build().is_err());
        assert!(SolverConfig::builder().tol(0.0).build().is_err());
        assert!(SolverConfig::builder().tol(-1e-3).build().is_err());
        assert!(SolverConfig::builder().tol(f64::NAN).build().is_err());
        assert!(SolverConfig::builder().tol(f64::INFINITY).build().is_err());
    }

    #[test]
    fn default_config_matches_documented_values() {
        let config = SolverConfig::default();
        assert_eq!(config.max_iter, 10);
        assert_eq!(config.tol, 1e-3);
    }
}
