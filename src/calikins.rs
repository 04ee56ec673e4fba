//! # Calikins: machine context for calibrated XYZ kinematics
//!
//! This module defines the [`Calikins`] struct, the central context that
//! wires together:
//!
//! 1. **Axis mapping** ([`AxisJointMapping`]) - which joints drive which
//!    axis letters, fixed at machine startup.
//! 2. **Live tuning store** ([`TuningStore`]) - calibration scalars, joint
//!    limits, and solver settings, retunable from outside the control
//!    thread.
//!
//! There is no process-wide state: everything a transform needs lives in
//! this value, and each transform reads one immutable snapshot of the store
//! before touching any number.
//!
//! ## Typical usage
//!
//! ```rust
//! use calikins::calikins::Calikins;
//!
//! // A three-joint cartesian machine with default (trivial) calibration.
//! let kins = Calikins::new(Some("XYZ"), 3, false).unwrap();
//!
//! let joints = [10.0, 20.0, 30.0];
//! let pose = kins.forward(&joints).unwrap();
//! assert_eq!((pose.x, pose.y, pose.z), (10.0, 20.0, 30.0));
//!
//! let mut recovered = [0.0; 3];
//! let solution = kins.inverse(&pose, &mut recovered).unwrap();
//! assert!(solution.status.is_converged());
//! assert_eq!(recovered, joints);
//! ```
//!
//! ## Hot-path contract
//!
//! [`forward`](Calikins::forward) and [`inverse`](Calikins::inverse) are
//! called synchronously once per control cycle from a single real-time
//! thread. Neither allocates, blocks, nor performs I/O. The certificate
//! ([`Calikins::certify`]) runs off the hot path, once per calibration or
//! limit change.

use crate::axis_mapping::AxisJointMapping;
use crate::calikins_errors::CalikinsError;
use crate::certificate::{certify, Certificate};
use crate::constants::JointTriple;
use crate::pose::MachinePose;
use crate::solver::{inverse, InverseSolution};
use crate::tuning::{KinsSnapshot, TuningStore};

/// Calibrated kinematics context: the immutable axis mapping plus the live
/// tuning store.
#[derive(Debug)]
pub struct Calikins {
    mapping: AxisJointMapping,
    tuning: TuningStore,
}

impl Calikins {
    /// Build the context for a machine configuration.
    ///
    /// Arguments
    /// -----------------
    /// * `coordinates`: axis letter sequence naming the joints, or `None`
    ///   for the default `"XYZABCUVW"` mapping.
    /// * `max_joints`: number of joints the machine provides.
    /// * `allow_duplicates`: permit one letter to drive several joints.
    ///
    /// The tuning store starts at the uncalibrated defaults; a fatal
    /// [`CalikinsError`] means initialization must refuse to proceed.
    pub fn new(
        coordinates: Option<&str>,
        max_joints: usize,
        allow_duplicates: bool,
    ) -> Result<Self, CalikinsError> {
        let coordinates = coordinates.unwrap_or(AxisJointMapping::DEFAULT_COORDINATES);
        Ok(Calikins {
            mapping: AxisJointMapping::new(coordinates, max_joints, allow_duplicates)?,
            tuning: TuningStore::default(),
        })
    }

    pub fn mapping(&self) -> &AxisJointMapping {
        &self.mapping
    }

    /// Handle for the operator/tuning channel.
    pub fn tuning(&self) -> &TuningStore {
        &self.tuning
    }

    /// One consistent copy of the live configuration.
    pub fn snapshot(&self) -> KinsSnapshot {
        self.tuning.snapshot()
    }

    /// Run the offline invertibility check against the current calibration
    /// and joint limits. Call after every retune, never per cycle.
    pub fn certify(&self) -> Certificate {
        let snapshot = self.snapshot();
        certify(&snapshot.model.a, &snapshot.model.b, &snapshot.bounds)
    }

    /// Update the machine pose from joint values.
    ///
    /// The calibrated transform reads the X/Y/Z principal joints; every
    /// auxiliary axis copies its principal joint through unchanged. Axes the
    /// mapping never names stay at zero.
    pub fn forward(&self, joints: &[f64]) -> Result<MachinePose, CalikinsError> {
        self.check_joint_count(joints.len())?;
        let snapshot = self.snapshot();

        let [jx, jy, jz] = self.mapping.linear_joints();
        let xyz_joints = JointTriple::new(joints[jx], joints[jy], joints[jz]);
        let xyz_pos = snapshot.model.forward(&xyz_joints);

        let mut pose = MachinePose::default();
        pose.set_translation(&xyz_pos);

        for joint in 0..self.mapping.joint_count() {
            let Some(axis) = self.mapping.axis_for_joint(joint) else {
                break;
            };
            if !axis.is_linear() {
                if let Some(principal) = self.mapping.first_joint_for_axis(axis) {
                    pose.set_axis(axis, joints[principal]);
                }
            }
        }

        Ok(pose)
    }

    /// Update joint values (including joints for duplicate letters) from a
    /// machine pose.
    ///
    /// Solves the calibrated inverse problem for the cartesian part of the
    /// pose, then fans the result out to every joint through the mapping;
    /// auxiliary joints copy their axis's pose value directly. The returned
    /// [`InverseSolution`] carries the residual norm and convergence status
    /// the caller must inspect; a singular Jacobian aborts the call and
    /// leaves `joints` untouched.
    pub fn inverse(
        &self,
        pose: &MachinePose,
        joints: &mut [f64],
    ) -> Result<InverseSolution, CalikinsError> {
        self.check_joint_count(joints.len())?;
        let snapshot = self.snapshot();

        let target = pose.translation();
        let solution = inverse(
            &snapshot.model,
            Some(&snapshot.bounds),
            &snapshot.config,
            &target,
        )?;

        for joint in 0..self.mapping.joint_count() {
            let Some(axis) = self.mapping.axis_for_joint(joint) else {
                break;
            };
            joints[joint] = if axis.is_linear() {
                solution.joints[axis.index()]
            } else {
                pose.axis(axis)
            };
        }

        Ok(solution)
    }

    fn check_joint_count(&self, provided: usize) -> Result<(), CalikinsError> {
        if provided < self.mapping.joint_count() {
            return Err(CalikinsError::JointCountMismatch(
                provided,
                self.mapping.joint_count(),
            ));
        }
        Ok(())
    }
}
