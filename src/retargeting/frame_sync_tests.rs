use super::*;
use crate::{
    rotation::convention::RotatingRadians,
    skeleton::joint_spec::{AxisOrder, JointSpec},
    ErrorKind,
};
use float_cmp::{ApproxEq, F64Margin};
use nalgebra::{Rotation3, Vector3};

fn margin() -> F64Margin {
    F64Margin {
        epsilon: 1e-10,
        ulps: 4,
    }
}

fn dof_names() -> Vec<&'static str> {
    vec![
        "root_rx", "root_ry", "root_rz", "root_tx", "root_ty", "root_tz", "lfemur_x", "lfemur_y",
        "lfemur_z", "ltibia_y", "lfoot_x", "lfoot_z",
    ]
}

fn dof_map() -> SkeletonDofMap {
    let joints = vec![
        JointSpec::new("lfemur".to_string(), "xyz".parse().unwrap()),
        JointSpec::new("ltibia".to_string(), "y".parse().unwrap()),
        JointSpec::new("lfoot".to_string(), "zx".parse().unwrap()),
    ];
    SkeletonDofMap::new(&dof_names(), &joints).unwrap()
}

fn frame(root: Vec<f64>, lfemur: Vec<f64>, ltibia: Vec<f64>, lfoot: Vec<f64>) -> MocapFrame {
    MocapFrame::new(vec![
        ("root".to_string(), root),
        ("lfemur".to_string(), lfemur),
        ("ltibia".to_string(), ltibia),
        ("lfoot".to_string(), lfoot),
    ])
}

fn rest_frame() -> MocapFrame {
    frame(vec![0.0; 6], vec![0.0; 3], vec![0.0], vec![0.0; 2])
}

fn assert_slices_equal(expected: &[f64], actual: &[f64]) {
    assert_eq!(expected.len(), actual.len());
    for (i, (e, a)) in expected.iter().zip(actual.iter()).enumerate() {
        assert!(
            e.approx_eq(*a, margin()),
            "Element {} differs. Expected {} but got {}",
            i,
            e,
            a
        );
    }
}

#[test]
fn when_syncing_a_single_axis_joint_it_should_describe_the_same_rotation() {
    let map = dof_map();
    let input = frame(vec![0.0; 6], vec![0.0; 3], vec![45.0], vec![0.0; 2]);

    let positions = sync_frame(&map, &input).unwrap();

    let order: AxisOrder = "y".parse().unwrap();
    let window = map.joint("ltibia").unwrap().window();
    let stored = &positions.as_slice()[window.range()];
    assert_eq!(1, stored.len());

    let rotating = RotatingRadians::from_vector(order.expand(stored).unwrap());
    let expected = SequentialDegrees::new(0.0, 45.0, 0.0).to_radians().to_rotation();
    let actual = rotating.to_rotation();
    for (e, a) in expected.matrix().iter().zip(actual.matrix().iter()) {
        assert!(e.approx_eq(*a, margin()));
    }
}

#[test]
fn when_syncing_the_root_it_should_place_rotation_first_and_translation_second() {
    let map = dof_map();
    let input = frame(
        vec![0.0, 0.0, 0.0, 10.0, 20.0, 30.0],
        vec![0.0; 3],
        vec![0.0],
        vec![0.0; 2],
    );

    let positions = sync_frame(&map, &input).unwrap();

    // Rx(a) Ry(b) Rz(c) is the inverse of Rz(-c) Ry(-b) Rx(-a), so the rotating-frame
    // angles are the negated roll, pitch and yaw of the inverse rotation.
    let rotation = Rotation3::from_euler_angles(
        10f64.to_radians(),
        20f64.to_radians(),
        30f64.to_radians(),
    );
    let (roll, pitch, yaw) = rotation.inverse().euler_angles();
    let expected = [-roll, -pitch, -yaw];

    assert_slices_equal(&expected, &positions.as_slice()[ROOT_ROTATION_DOFS]);
    assert_eq!(&[0.0, 0.0, 0.0], &positions.as_slice()[ROOT_TRANSLATION_DOFS]);
}

#[test]
fn when_syncing_the_root_translation_it_should_copy_it_unchanged() {
    let map = dof_map();
    let input = frame(
        vec![1.5, -2.0, 0.25, 0.0, 0.0, 0.0],
        vec![0.0; 3],
        vec![0.0],
        vec![0.0; 2],
    );

    let positions = sync_frame(&map, &input).unwrap();

    assert_eq!(&[1.5, -2.0, 0.25], &positions.as_slice()[ROOT_TRANSLATION_DOFS]);
    assert_eq!(&[0.0, 0.0, 0.0], &positions.as_slice()[ROOT_ROTATION_DOFS]);
}

#[test]
fn when_syncing_a_multi_axis_joint_it_should_compress_in_the_joint_order() {
    let map = dof_map();
    let input = frame(vec![0.0; 6], vec![0.0; 3], vec![0.0], vec![30.0, 0.0]);

    let positions = sync_frame(&map, &input).unwrap();

    // A pure z rotation is the same in both conventions; "zx" stores z first
    assert_slices_equal(
        &[30f64.to_radians(), 0.0],
        &positions.as_slice()[map.joint("lfoot").unwrap().window().range()],
    );
}

#[test]
fn when_syncing_the_same_frame_twice_it_should_be_bit_identical() {
    let map = dof_map();
    let input = frame(
        vec![0.1, 0.2, 0.3, 12.0, -33.0, 71.0],
        vec![5.0, 15.0, 25.0],
        vec![-45.0],
        vec![10.0, 20.0],
    );

    let first = sync_frame(&map, &input).unwrap();
    let second = sync_frame(&map, &input).unwrap();

    assert_eq!(first, second);
}

#[test]
fn when_syncing_into_a_vector_it_should_only_touch_mapped_dofs() {
    let names = vec![
        "root_rx", "root_ry", "root_rz", "root_tx", "root_ty", "root_tz", "lfemur_x", "lfemur_y",
        "lfemur_z", "ltibia_y", "lfoot_x", "lfoot_z", "lhand_x",
    ];
    let joints = vec![
        JointSpec::new("lfemur".to_string(), "xyz".parse().unwrap()),
        JointSpec::new("ltibia".to_string(), "y".parse().unwrap()),
        JointSpec::new("lfoot".to_string(), "zx".parse().unwrap()),
    ];
    let map = SkeletonDofMap::new(&names, &joints).unwrap();
    let mut positions = DVector::from_element(13, 7.0);

    sync_frame_into(&map, &rest_frame(), &mut positions).unwrap();

    assert_eq!(7.0, positions[12]);
    assert!(positions.rows(0, 12).iter().all(|v| *v == 0.0));
}

#[test]
fn when_syncing_into_a_vector_of_the_wrong_length_it_should_fail() {
    let map = dof_map();
    let mut positions = DVector::zeros(11);

    let result = sync_frame_into(&map, &rest_frame(), &mut positions);

    assert_eq!(
        Err(Error::StateLengthMismatch {
            expected: 12,
            actual: 11
        }),
        result
    );
}

#[test]
fn when_a_frame_has_an_unknown_joint_it_should_fail_without_writing() {
    let map = dof_map();
    let input = MocapFrame::new(vec![
        ("root".to_string(), vec![1.0, 1.0, 1.0, 0.0, 0.0, 0.0]),
        ("head".to_string(), vec![1.0]),
    ]);
    let mut positions = DVector::zeros(12);

    let result = sync_frame_into(&map, &input, &mut positions);

    let err = result.unwrap_err();
    assert_eq!(
        Error::UnknownJoint {
            joint: "head".to_string()
        },
        err
    );
    assert_eq!(ErrorKind::DataShape, err.kind());
    assert_eq!(DVector::<f64>::zeros(12), positions);
}

#[test]
fn when_a_joint_has_the_wrong_number_of_values_it_should_fail() {
    let map = dof_map();
    let input = frame(vec![0.0; 6], vec![0.0; 2], vec![0.0], vec![0.0; 2]);

    let result = sync_frame(&map, &input);

    assert_eq!(
        Err(Error::JointAngleCountMismatch {
            joint: "lfemur".to_string(),
            expected: 3,
            actual: 2
        }),
        result
    );
}

#[test]
fn when_a_frame_does_not_start_with_the_root_it_should_fail() {
    let map = dof_map();
    let input = MocapFrame::new(vec![("lfemur".to_string(), vec![0.0; 3])]);

    assert_eq!(Err(Error::MissingRootEntry), sync_frame(&map, &input));
}

#[test]
fn when_converting_back_it_should_recover_the_mocap_angles() {
    let map = dof_map();
    let input = frame(vec![0.0; 6], vec![5.0, 15.0, 25.0], vec![0.0], vec![0.0; 2]);

    let positions = sync_frame(&map, &input).unwrap();

    let window = map.joint("lfemur").unwrap().window();
    let stored = &positions.as_slice()[window.range()];
    let rotating = RotatingRadians::from_vector(Vector3::new(stored[0], stored[1], stored[2]));
    assert_slices_equal(
        &[5.0, 15.0, 25.0],
        rotating.to_sequential_degrees().as_vector().as_slice(),
    );
}
