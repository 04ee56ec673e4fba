//! Full machine pose: the cartesian tool position plus auxiliary axes.

use serde::{Deserialize, Serialize};

use crate::axis_mapping::Axis;
use crate::constants::Pose3;

/// Commanded or computed value of every machine axis.
///
/// `x`, `y`, `z` carry the calibrated cartesian position; the six auxiliary
/// axes pass through the kinematics uncorrected.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MachinePose {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub u: f64,
    pub v: f64,
    pub w: f64,
}

impl MachinePose {
    /// Value of a single axis.
    pub fn axis(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
            Axis::A => self.a,
            Axis::B => self.b,
            Axis::C => self.c,
            Axis::U => self.u,
            Axis::V => self.v,
            Axis::W => self.w,
        }
    }

    /// Overwrite a single axis.
    pub fn set_axis(&mut self, axis: Axis, value: f64) {
        match axis {
            Axis::X => self.x = value,
            Axis::Y => self.y = value,
            Axis::Z => self.z = value,
            Axis::A => self.a = value,
            Axis::B => self.b = value,
            Axis::C => self.c = value,
            Axis::U => self.u = value,
            Axis::V => self.v = value,
            Axis::W => self.w = value,
        }
    }

    /// The cartesian part of the pose.
    pub fn translation(&self) -> Pose3 {
        Pose3::new(self.x, self.y, self.z)
    }

    /// Replace the cartesian part of the pose.
    pub fn set_translation(&mut self, translation: &Pose3) {
        self.x = translation[0];
        self.y = translation[1];
        self.z = translation[2];
    }
}
