use super::*;
use float_cmp::{ApproxEq, F64Margin};
use std::f64::consts::FRAC_PI_2;

fn margin() -> F64Margin {
    F64Margin {
        epsilon: 1e-10,
        ulps: 4,
    }
}

fn assert_angles_equal(expected: &RotatingRadians, actual: &RotatingRadians) {
    for i in 0..3 {
        assert!(
            expected[i].approx_eq(actual[i], margin()),
            "Angles differ. Expected {:?} but got {:?}",
            expected,
            actual
        );
    }
}

#[test]
fn when_asking_for_component_counts_it_should_match_the_action_layout() {
    assert_eq!(3, RepresentationMode::Euler.component_count());
    assert_eq!(4, RepresentationMode::Quaternion.component_count());
    assert_eq!(4, RepresentationMode::AxisAngle.component_count());
}

#[test]
fn when_encoding_as_euler_it_should_pass_the_angles_through() {
    let angles = RotatingRadians::new(0.1, -0.2, 0.3);

    let encoded = AngleRepresentation::encode(RepresentationMode::Euler, &angles);

    assert_eq!(AngleRepresentation::Euler(Vector3::new(0.1, -0.2, 0.3)), encoded);
    assert_eq!(angles, encoded.to_rotating_radians());
}

#[test]
fn when_encoding_a_single_axis_rotation_as_quaternion_it_should_use_the_half_angle() {
    let angles = RotatingRadians::new(0.0, 0.0, FRAC_PI_2);

    let encoded = AngleRepresentation::encode(RepresentationMode::Quaternion, &angles);

    let mut components = Vec::new();
    encoded.extend_into(&mut components);
    let half = (FRAC_PI_2 / 2.0).cos();
    let expected = [half, 0.0, 0.0, (FRAC_PI_2 / 2.0).sin()];
    for (e, a) in expected.iter().zip(components.iter()) {
        assert!(e.approx_eq(*a, margin()));
    }
}

#[test]
fn when_decoding_a_quaternion_it_should_recover_the_euler_angles() {
    let angles = RotatingRadians::new(0.4, -0.3, 1.1);

    let encoded = AngleRepresentation::encode(RepresentationMode::Quaternion, &angles);

    assert_eq!(RepresentationMode::Quaternion, encoded.mode());
    assert_angles_equal(&angles, &encoded.to_rotating_radians());
}

#[test]
fn when_decoding_an_unnormalized_quaternion_it_should_normalize_first() {
    let angles = RotatingRadians::new(0.2, 0.5, -0.7);
    let encoded = AngleRepresentation::encode(RepresentationMode::Quaternion, &angles);
    let scaled = match encoded {
        AngleRepresentation::Quaternion(q) => AngleRepresentation::Quaternion(q * 3.0),
        _ => panic!("Expected a quaternion"),
    };

    assert_angles_equal(&angles, &scaled.to_rotating_radians());
}

#[test]
fn when_decoding_a_zero_quaternion_it_should_return_the_identity() {
    let decoded = AngleRepresentation::Quaternion(Vector4::zeros()).to_rotating_radians();

    assert_eq!(RotatingRadians::zeros(), decoded);
}

#[test]
fn when_decoding_an_axis_angle_it_should_recover_the_euler_angles() {
    let angles = RotatingRadians::new(-0.6, 0.25, 0.9);

    let encoded = AngleRepresentation::encode(RepresentationMode::AxisAngle, &angles);

    match encoded {
        AngleRepresentation::AxisAngle { axis, .. } => {
            assert!(axis.norm().approx_eq(1.0, margin()));
        }
        _ => panic!("Expected an axis-angle representation"),
    }
    assert_angles_equal(&angles, &encoded.to_rotating_radians());
}

#[test]
fn when_encoding_the_identity_as_axis_angle_it_should_use_the_x_axis_and_zero_angle() {
    let encoded =
        AngleRepresentation::encode(RepresentationMode::AxisAngle, &RotatingRadians::zeros());

    assert_eq!(
        AngleRepresentation::AxisAngle {
            axis: Vector3::x(),
            angle: 0.0
        },
        encoded
    );
}

#[test]
fn when_decoding_a_zero_axis_it_should_return_the_identity() {
    let decoded = AngleRepresentation::AxisAngle {
        axis: Vector3::zeros(),
        angle: 1.0,
    }
    .to_rotating_radians();

    assert_eq!(RotatingRadians::zeros(), decoded);
}

#[test]
fn when_building_from_components_it_should_check_the_length() {
    let result = AngleRepresentation::from_components(RepresentationMode::Quaternion, &[1.0, 0.0]);

    assert_eq!(
        Err(Error::AngleCountMismatch {
            expected: 4,
            actual: 2
        }),
        result
    );
}

#[test]
fn when_building_from_components_it_should_keep_the_component_order() {
    let axis_angle =
        AngleRepresentation::from_components(RepresentationMode::AxisAngle, &[0.0, 1.0, 0.0, 0.5])
            .unwrap();

    assert_eq!(
        AngleRepresentation::AxisAngle {
            axis: Vector3::y(),
            angle: 0.5
        },
        axis_angle
    );

    let mut buffer = vec![9.0];
    axis_angle.extend_into(&mut buffer);
    assert_eq!(vec![9.0, 0.0, 1.0, 0.0, 0.5], buffer);
}
