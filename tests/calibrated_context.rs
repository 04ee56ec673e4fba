use approx::assert_abs_diff_eq;
use calikins::bounds::Bounds;
use calikins::calibration::CalibrationModel;
use calikins::calikins::Calikins;
use calikins::pose::MachinePose;
use calikins::solver::SolverConfig;
use nalgebra::{Matrix3, Vector3};

#[test]
fn trivial_machine_passes_joints_through() {
    let kins = Calikins::new(None, 9, true).unwrap();
    let joints = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0];

    let pose = kins.forward(&joints).unwrap();
    assert_eq!(
        (pose.x, pose.y, pose.z, pose.a, pose.b, pose.c),
        (1.0, 2.0, 3.0, 4.0, 5.0, 6.0)
    );
    assert_eq!((pose.u, pose.v, pose.w), (7.0, 8.0, 9.0));

    let mut recovered = [0.0; 9];
    let solution = kins.inverse(&pose, &mut recovered).unwrap();
    assert!(solution.status.is_converged());
    assert_eq!(recovered, joints);
}

#[test]
fn calibrated_machine_round_trips_through_the_context() {
    let kins = Calikins::new(Some("XYZ"), 3, false).unwrap();
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

    assert!(kins.certify().is_guaranteed());

    let joints = [10.0, 10.0, 10.0];
    let pose = kins.forward(&joints).unwrap();
    // position = A*j + B*(j^2) + C at j = (10, 10, 10)
    assert_abs_diff_eq!(pose.x, 10.0 + 0.25 + 0.25 + 0.5, epsilon = 1e-12);

    let mut recovered = [0.0; 3];
    let solution = kins.inverse(&pose, &mut recovered).unwrap();
    assert!(solution.status.is_converged());
    for joint in recovered {
        assert_abs_diff_eq!(joint, 10.0, epsilon = 5e-5);
    }
}

#[test]
fn gantry_duplicates_follow_their_axis() {
    // Dual-motor Y gantry: joints 1 and 3 both ride the Y letter.
    let kins = Calikins::new(Some("XYZY"), 4, true).unwrap();
    let joints = [1.0, 2.0, 3.0, 2.0];

    let pose = kins.forward(&joints).unwrap();
    // The principal Y joint (joint 1) feeds the transform.
    assert_eq!((pose.x, pose.y, pose.z), (1.0, 2.0, 3.0));

    let mut recovered = [0.0; 4];
    kins.inverse(&pose, &mut recovered).unwrap();
    // Both Y joints receive the same solved value.
    assert_eq!(recovered, [1.0, 2.0, 3.0, 2.0]);
}

#[test]
fn auxiliary_axes_bypass_the_calibration() {
    let kins = Calikins::new(Some("XYZAB"), 5, false).unwrap();
    kins.tuning().store_model(&CalibrationModel {
        c: Vector3::new(0.5, 1.0, 1.5),
        ..Default::default()
    });

    let joints = [0.0, 0.0, 0.0, 45.0, -30.0];
    let pose = kins.forward(&joints).unwrap();
    assert_eq!((pose.x, pose.y, pose.z), (0.5, 1.0, 1.5));
    assert_eq!((pose.a, pose.b), (45.0, -30.0));

    let mut recovered = [0.0; 5];
    let solution = kins.inverse(&pose, &mut recovered).unwrap();
    assert!(solution.status.is_converged());
    assert_abs_diff_eq!(recovered[0], 0.0, epsilon = 1e-9);
    assert_eq!(recovered[3], 45.0);
    assert_eq!(recovered[4], -30.0);
}

#[test]
fn retuning_between_cycles_changes_the_next_solve() {
    let kins = Calikins::new(Some("XYZ"), 3, false).unwrap();
    let joints = [10.0, 20.0, 30.0];

    let pose = kins.forward(&joints).unwrap();
    assert_eq!((pose.x, pose.y, pose.z), (10.0, 20.0, 30.0));

    // Operator dials in an X offset; the next cycle sees it.
    kins.tuning().set_c(0, 0.5);
    let pose = kins.forward(&joints).unwrap();
    assert_eq!((pose.x, pose.y, pose.z), (10.5, 20.0, 30.0));
}
