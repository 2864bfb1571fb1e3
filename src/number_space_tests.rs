use super::*;
use float_cmp::{ApproxEq, F64Margin};
use std::f64::consts::PI;

fn margin() -> F64Margin {
    F64Margin {
        epsilon: 1e-12,
        ulps: 4,
    }
}

#[test]
fn test_linear_unbounded_space_tracking_error() {
    let space = LinearUnboundedSpace::new();
    assert_eq!(space.tracking_error(1.0, 4.0), 3.0);
    assert_eq!(space.tracking_error(2.0, -2.0), -4.0);
    assert_eq!(space.tracking_error(0.9 * PI, -0.9 * PI), -0.9 * PI - 0.9 * PI);
}

#[test]
fn test_periodic_bounded_circular_space_tracking_error_takes_the_short_way_round() {
    let space = PeriodicBoundedCircularSpace::new();
    assert!(space
        .tracking_error(0.9 * PI, -0.9 * PI)
        .approx_eq(0.2 * PI, margin()));
    assert!(space
        .tracking_error(-0.9 * PI, 0.9 * PI)
        .approx_eq(-0.2 * PI, margin()));
    assert!(space.tracking_error(0.25, 0.75).approx_eq(0.5, margin()));
    assert!(space.tracking_error(0.0, 4.0 * PI).approx_eq(0.0, margin()));
}

#[test]
fn test_periodic_bounded_circular_space_tracking_error_at_half_turn_is_positive() {
    let space = PeriodicBoundedCircularSpace::new();
    assert!(space.tracking_error(0.0, PI).approx_eq(PI, margin()));
    assert!(space.tracking_error(PI, 0.0).approx_eq(PI, margin()));
}

#[test]
fn test_to_number_space_defaults_to_linear() {
    let space = to_number_space(NumberSpaceType::default());
    assert_eq!(space.tracking_error(0.0, 3.0 * PI), 3.0 * PI);
}
