use approx::assert_abs_diff_eq;
use calikins::bounds::Bounds;
use calikins::calibration::CalibrationModel;
use calikins::constants::JointTriple;
use calikins::solver::{inverse, SolverConfig};

/// Forward-transform `joints`, solve the inverse problem for the resulting
/// position, and check the recovered joints and residual against `tolerance`.
pub fn assert_roundtrip(
    model: &CalibrationModel,
    bounds: &Bounds,
    config: &SolverConfig,
    joints: &JointTriple,
    tolerance: f64,
) {
    let position = model.forward(joints);
    let solution = inverse(model, Some(bounds), config, &position)
        .expect("Jacobian must stay invertible for a certified calibration");

    assert!(
        solution.status.is_converged(),
        "no convergence for joints {joints:?}: residual {}",
        solution.residual_norm
    );
    assert_abs_diff_eq!(solution.residual_norm, 0.0, epsilon = tolerance);
    assert_abs_diff_eq!(solution.joints, *joints, epsilon = tolerance);
}
