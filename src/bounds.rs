//! Per-axis joint travel limits.

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::constants::JointTriple;

/// Box limits of the joint domain, one `[min, max]` interval per linear axis.
///
/// The default is the unconstrained domain `(-inf, +inf)` on every axis,
/// matching an uncalibrated machine with no configured travel limits.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: Vector3<f64>,
    pub max: Vector3<f64>,
}

impl Default for Bounds {
    fn default() -> Self {
        Bounds {
            min: Vector3::repeat(f64::NEG_INFINITY),
            max: Vector3::repeat(f64::INFINITY),
        }
    }
}

fn clamp_component(value: f64, min: f64, max: f64) -> f64 {
    let t = if value < min { min } else { value };
    if t > max {
        max
    } else {
        t
    }
}

impl Bounds {
    pub fn new(min: Vector3<f64>, max: Vector3<f64>) -> Self {
        Bounds { min, max }
    }

    /// Symmetric bounds `[-half_range, +half_range]` on every axis.
    pub fn symmetric(half_range: f64) -> Self {
        Bounds {
            min: Vector3::repeat(-half_range),
            max: Vector3::repeat(half_range),
        }
    }

    /// Clamp a joint vector componentwise into `[min, max]`.
    pub fn clamp(&self, joints: &JointTriple) -> JointTriple {
        JointTriple::new(
            clamp_component(joints[0], self.min[0], self.max[0]),
            clamp_component(joints[1], self.min[1], self.max[1]),
            clamp_component(joints[2], self.min[2], self.max[2]),
        )
    }

    /// True if `joints` lies inside `[min, max]` on every axis.
    pub fn contains(&self, joints: &JointTriple) -> bool {
        (0..3).all(|i| joints[i] >= self.min[i] && joints[i] <= self.max[i])
    }

    /// Per-axis envelope radius `max(|min|, |max|)`, the largest joint
    /// magnitude reachable on each axis. Used by the invertibility check.
    pub fn envelope_radius(&self) -> Vector3<f64> {
        Vector3::new(
            self.min[0].abs().max(self.max[0].abs()),
            self.min[1].abs().max(self.max[1].abs()),
            self.min[2].abs().max(self.max[2].abs()),
        )
    }
}

#[cfg(test)]
mod bounds_test {
    use super::*;

    #[test]
    fn default_is_unconstrained() {
        let bounds = Bounds::default();
        let joints = Vector3::new(1e12, -1e12, 0.0);
        assert_eq!(bounds.clamp(&joints), joints);
        assert!(bounds.contains(&joints));
    }

    #[test]
    fn clamp_pins_to_box() {
        let bounds = Bounds::symmetric(100.0);
        assert_eq!(
            bounds.clamp(&Vector3::new(150.0, -150.0, 50.0)),
            Vector3::new(100.0, -100.0, 50.0)
        );
    }

    #[test]
    fn envelope_radius_takes_largest_magnitude() {
        let bounds = Bounds::new(Vector3::new(-200.0, -10.0, 0.0), Vector3::new(50.0, 30.0, 70.0));
        assert_eq!(bounds.envelope_radius(), Vector3::new(200.0, 30.0, 70.0));
    }
}
