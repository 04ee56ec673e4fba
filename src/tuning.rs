//! # Live tuning store
//!
//! The calibration scalars, joint limits, and solver settings are retuned at
//! runtime by an operator channel running outside the control thread. The
//! control thread must never block on that channel, so the store keeps every
//! scalar in its own atomic cell (`f64` bits in an `AtomicU64`, relaxed
//! ordering) instead of behind a lock.
//!
//! Reads are therefore **relaxed-consistency by design**: each scalar is
//! read atomically, the set of scalars is not. A snapshot taken while the
//! operator is mid-update may mix old and new values across the 25 fields.
//! That torn read is tolerated deliberately: the solver re-converges on the
//! next cycle with fresh inputs, and blocking the real-time thread would be
//! worse than one transiently inconsistent solve.
//!
//! The control thread calls [`TuningStore::snapshot`] exactly once per
//! cycle and runs the whole Newton iteration against the returned immutable
//! [`KinsSnapshot`], so a single solve never sees two different values for
//! the same field.

use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};

use nalgebra::{Matrix3, Vector3};

use crate::bounds::Bounds;
use crate::calibration::CalibrationModel;
use crate::solver::SolverConfig;

/// One live-tunable `f64`, stored as raw bits in an `AtomicU64`.
#[derive(Debug)]
pub struct LiveFloat(AtomicU64);

impl LiveFloat {
    pub fn new(value: f64) -> Self {
        LiveFloat(AtomicU64::new(value.to_bits()))
    }

    pub fn get(&self) -> f64 {
        f64::from_bits(self.0.load(Ordering::Relaxed))
    }

    pub fn set(&self, value: f64) {
        self.0.store(value.to_bits(), Ordering::Relaxed);
    }
}

/// Immutable per-cycle copy of the live configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KinsSnapshot {
    pub model: CalibrationModel,
    pub bounds: Bounds,
    pub config: SolverConfig,
}

/// Shared store of every live-tunable parameter.
///
/// Defaults reproduce an uncalibrated machine: `A` identity, `B` and `C`
/// zero, unconstrained joint limits, and the default solver settings.
#[derive(Debug)]
pub struct TuningStore {
    calib_a: [[LiveFloat; 3]; 3],
    calib_b: [[LiveFloat; 3]; 3],
    calib_c: [LiveFloat; 3],
    joints_min: [LiveFloat; 3],
    joints_max: [LiveFloat; 3],
    max_iter: AtomicU32,
    tol: LiveFloat,
}

fn live_matrix(m: &Matrix3<f64>) -> [[LiveFloat; 3]; 3] {
    [0usize, 1, 2].map(|i| [0usize, 1, 2].map(|j| LiveFloat::new(m[(i, j)])))
}

fn live_vector(v: &Vector3<f64>) -> [LiveFloat; 3] {
    [0usize, 1, 2].map(|i| LiveFloat::new(v[i]))
}

impl Default for TuningStore {
    fn default() -> Self {
        Self::new(
            &CalibrationModel::default(),
            &Bounds::default(),
            &SolverConfig::default(),
        )
    }
}

impl TuningStore {
    pub fn new(model: &CalibrationModel, bounds: &Bounds, config: &SolverConfig) -> Self {
        TuningStore {
            calib_a: live_matrix(&model.a),
            calib_b: live_matrix(&model.b),
            calib_c: live_vector(&model.c),
            joints_min: live_vector(&bounds.min),
            joints_max: live_vector(&bounds.max),
            max_iter: AtomicU32::new(config.max_iter),
            tol: LiveFloat::new(config.tol),
        }
    }

    /// Copy the whole store into an immutable value.
    ///
    /// This is the only read path the control thread uses; see the
    /// [module docs](crate::tuning) for the consistency guarantees.
    pub fn snapshot(&self) -> KinsSnapshot {
        let read_matrix = |cells: &[[LiveFloat; 3]; 3]| {
            Matrix3::from_fn(|i, j| cells[i][j].get())
        };
        let read_vector =
            |cells: &[LiveFloat; 3]| Vector3::new(cells[0].get(), cells[1].get(), cells[2].get());

        KinsSnapshot {
            model: CalibrationModel {
                a: read_matrix(&self.calib_a),
                b: read_matrix(&self.calib_b),
                c: read_vector(&self.calib_c),
            },
            bounds: Bounds {
                min: read_vector(&self.joints_min),
                max: read_vector(&self.joints_max),
            },
            config: SolverConfig {
                max_iter: self.max_iter.load(Ordering::Relaxed),
                tol: self.tol.get(),
            },
        }
    }

    /// Retune one entry of the linear calibration matrix `A`.
    pub fn set_a(&self, row: usize, col: usize, value: f64) {
        self.calib_a[row][col].set(value);
    }

    /// Retune one entry of the quadratic calibration matrix `B`.
    pub fn set_b(&self, row: usize, col: usize, value: f64) {
        self.calib_b[row][col].set(value);
    }

    /// Retune one component of the offset vector `C`.
    pub fn set_c(&self, row: usize, value: f64) {
        self.calib_c[row].set(value);
    }

    /// Retune the joint travel limits of one linear axis.
    pub fn set_joint_limits(&self, axis: usize, min: f64, max: f64) {
        self.joints_min[axis].set(min);
        self.joints_max[axis].set(max);
    }

    pub fn set_max_iter(&self, max_iter: u32) {
        self.max_iter.store(max_iter, Ordering::Relaxed);
    }

    pub fn set_tol(&self, tol: f64) {
        self.tol.set(tol);
    }

    /// Replace the whole calibration model, scalar by scalar.
    pub fn store_model(&self, model: &CalibrationModel) {
        for i in 0..3 {
            for j in 0..3 {
                self.calib_a[i][j].set(model.a[(i, j)]);
                self.calib_b[i][j].set(model.b[(i, j)]);
            }
            self.calib_c[i].set(model.c[i]);
        }
    }

    /// Replace the joint limits of all three linear axes.
    pub fn store_bounds(&self, bounds: &Bounds) {
        for i in 0..3 {
            self.joints_min[i].set(bounds.min[i]);
            self.joints_max[i].set(bounds.max[i]);
        }
    }

    /// Replace both solver settings.
    pub fn store_config(&self, config: &SolverConfig) {
        self.set_max_iter(config.max_iter);
        self.set_tol(config.tol);
    }
}
