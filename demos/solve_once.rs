//! Run one calibrated forward/inverse cycle and print the results.

use calikins::bounds::Bounds;
use calikins::calibration::CalibrationModel;
use calikins::calikins::Calikins;
use calikins::calikins_errors::CalikinsError;
use calikins::solver::SolverConfig;
use nalgebra::{Matrix3, Vector3};

fn main() -> Result<(), CalikinsError> {
    let kins = Calikins::new(Some("XYZ"), 3, false)?;

    kins.tuning().store_model(&CalibrationModel {
        a: Matrix3::new(1., 0.025, 0., 0.025, 1., 0., 0., 0.1, 1.),
        b: Matrix3::new(
            0.002, 0.0005, 0., 0.00025, 0.002, 0., 0.001, 0.002, 0.0005,
        ),
        c: Vector3::new(0.5, 1.0, 1.5),
    });
    kins.tuning().store_bounds(&Bounds::symmetric(100.0));
    kins.tuning().store_config(&SolverConfig {
        max_iter: 20,
        tol: 1e-5,
    });

    println!("certificate: {}", kins.certify());

    let joints = [10.0, 10.0, 10.0];
    let pose = kins.forward(&joints)?;
    println!("joints {joints:?} -> position ({}, {}, {})", pose.x, pose.y, pose.z);

    let mut recovered = [0.0; 3];
    let solution = kins.inverse(&pose, &mut recovered)?;
    println!(
        "position -> joints {recovered:?} ({}, residual {:.3e})",
        solution.status, solution.residual_norm
    );

    Ok(())
}
