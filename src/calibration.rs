//! # Quadratic calibration model
//!
//! Geometric imperfections of a cartesian machine (axis skew, scale error,
//! screw-pitch drift) are compensated with an affine-plus-quadratic map from
//! joint space to machine space:
//!
//! ```text
//! [x, y, z]^T = A * [jx, jy, jz]^T + B * [jx^2, jy^2, jz^2]^T + C
//! ```
//!
//! where `A` and `B` are 3x3 matrices and `C` is a 3x1 vector. The defaults
//! (`A` identity, `B` and `C` zero) reduce the map to trivial kinematics, so
//! an uncalibrated machine behaves exactly as if no correction were
//! installed.
//!
//! The model is fitted offline by the calibration pipeline and loaded into
//! the machine configuration; at runtime its 21 scalars are live-tunable
//! through [`TuningStore`](crate::tuning::TuningStore).

use nalgebra::{Matrix3, Vector3};
use serde::{Deserialize, Serialize};

use crate::constants::{JointTriple, Pose3};

/// Calibration matrices `A`, `B` and offset vector `C` of the quadratic
/// joint-to-position map.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalibrationModel {
    /// Linear term, defaults to the identity matrix.
    pub a: Matrix3<f64>,
    /// Quadratic term, defaults to zero.
    pub b: Matrix3<f64>,
    /// Constant offset, defaults to zero.
    pub c: Vector3<f64>,
}

impl Default for CalibrationModel {
    fn default() -> Self {
        CalibrationModel {
            a: Matrix3::identity(),
            b: Matrix3::zeros(),
            c: Vector3::zeros(),
        }
    }
}

impl CalibrationModel {
    pub fn new(a: Matrix3<f64>, b: Matrix3<f64>, c: Vector3<f64>) -> Self {
        CalibrationModel { a, b, c }
    }

    /// Calibrated forward transform from joint values to machine position.
    ///
    /// Total and constant-time: every joint triple maps to a position, no
    /// allocation, no failure path.
    pub fn forward(&self, joints: &JointTriple) -> Pose3 {
        self.a * joints + self.b * joints.component_mul(joints) + self.c
    }

    /// Jacobian of the forward map at `joints`: `J = A + 2 * B * diag(joints)`.
    ///
    /// This is the matrix linearizing the inverse problem at each Newton
    /// step, and the object whose invertibility the
    /// [`certificate`](crate::certificate) module bounds over the whole
    /// joint envelope.
    pub fn jacobian(&self, joints: &JointTriple) -> Matrix3<f64> {
        self.a + 2.0 * self.b * Matrix3::from_diagonal(joints)
    }
}
