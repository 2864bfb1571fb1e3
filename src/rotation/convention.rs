//! Defines the angle conventions used by motion capture data and by the simulator, and the
//! conversions between them.
//!
//! Motion capture (AMC) files store joint rotations as *sequential* Euler angles in degrees:
//! each rotation is applied about the fixed world axes, x first, then y, then z. In matrix
//! form that is `R = Rz(c) * Ry(b) * Rx(a)` (the "sxyz" convention).
//!
//! The simulator stores joint rotations as *rotating-frame* Euler angles in radians: each
//! rotation is applied about the axes of the already rotated body frame, giving
//! `R = Rx(a) * Ry(b) * Rz(c)` (the "rxyz" convention).
//!
//! Converting one into the other is not a per-axis rescale. The rotation matrix has to be
//! composed in one convention and decomposed in the other. The angle types in this module
//! carry their unit and convention so that the compiler rejects mixing them up.

extern crate nalgebra as na;

use std::ops::Index;

use na::{Matrix3, Rotation3, Vector3};
use tracing::debug;

#[cfg(test)]
#[path = "convention_tests.rs"]
mod convention_tests;

/// Below this value of the middle-axis cosine a decomposition is treated as gimbal locked.
pub const GIMBAL_LOCK_EPSILON: f64 = 4.0 * f64::EPSILON;

/// Sequential (static axis, "sxyz") Euler angles in degrees, as stored in AMC files.
///
/// Element 0 rotates about x, element 1 about y and element 2 about z.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SequentialDegrees(Vector3<f64>);

/// Sequential (static axis, "sxyz") Euler angles in radians.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SequentialRadians(Vector3<f64>);

/// Rotating-frame ("rxyz") Euler angles in radians, as stored by the simulator.
///
/// Element 0 rotates about x, element 1 about the rotated y and element 2 about the twice
/// rotated z.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RotatingRadians(Vector3<f64>);

macro_rules! angle_vector_accessors {
    ($name:ident) => {
        impl $name {
            /// Creates a new instance from the x, y and z components.
            pub fn new(x: f64, y: f64, z: f64) -> Self {
                Self(Vector3::new(x, y, z))
            }

            /// Wraps an existing 3-vector.
            pub fn from_vector(vector: Vector3<f64>) -> Self {
                Self(vector)
            }

            /// Returns the underlying 3-vector.
            pub fn as_vector(&self) -> &Vector3<f64> {
                &self.0
            }

            /// Consumes the instance and returns the underlying 3-vector.
            pub fn into_vector(self) -> Vector3<f64> {
                self.0
            }

            /// Returns the angles with all components set to zero.
            pub fn zeros() -> Self {
                Self(Vector3::zeros())
            }
        }

        impl Index<usize> for $name {
            type Output = f64;

            fn index(&self, index: usize) -> &f64 {
                &self.0[index]
            }
        }
    };
}

angle_vector_accessors!(SequentialDegrees);
angle_vector_accessors!(SequentialRadians);
angle_vector_accessors!(RotatingRadians);

impl SequentialDegrees {
    /// Converts the angles to radians without changing the convention.
    pub fn to_radians(&self) -> SequentialRadians {
        SequentialRadians(self.0.map(f64::to_radians))
    }

    /// Converts the angles into the rotating-frame convention used by the simulator.
    ///
    /// ## Example
    ///
    /// ```
    /// use mimic_retargeting::rotation::convention::SequentialDegrees;
    ///
    /// // A rotation about a single axis is the same in both conventions
    /// let rotating = SequentialDegrees::new(0.0, 0.0, 90.0).to_rotating_radians();
    /// assert!((rotating[2] - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
    /// ```
    pub fn to_rotating_radians(&self) -> RotatingRadians {
        self.to_radians().to_rotating_radians()
    }
}

impl SequentialRadians {
    /// Converts the angles to degrees without changing the convention.
    pub fn to_degrees(&self) -> SequentialDegrees {
        SequentialDegrees(self.0.map(f64::to_degrees))
    }

    /// Returns the rotation matrix `Rz(c) * Ry(b) * Rx(a)`.
    pub fn to_rotation(&self) -> Rotation3<f64> {
        Rotation3::from_axis_angle(&Vector3::z_axis(), self.0[2])
            * Rotation3::from_axis_angle(&Vector3::y_axis(), self.0[1])
            * Rotation3::from_axis_angle(&Vector3::x_axis(), self.0[0])
    }

    /// Converts the angles into the rotating-frame convention used by the simulator.
    pub fn to_rotating_radians(&self) -> RotatingRadians {
        let decomposition = decompose_rotating_xyz(self.to_rotation().matrix());
        if decomposition.is_gimbal_locked() {
            debug!(
                angles = ?self.0,
                "Sequential rotation is gimbal locked in the rotating-frame convention"
            );
        }

        RotatingRadians(decomposition.angles)
    }
}

impl RotatingRadians {
    /// Returns the rotation matrix `Rx(a) * Ry(b) * Rz(c)`.
    pub fn to_rotation(&self) -> Rotation3<f64> {
        Rotation3::from_axis_angle(&Vector3::x_axis(), self.0[0])
            * Rotation3::from_axis_angle(&Vector3::y_axis(), self.0[1])
            * Rotation3::from_axis_angle(&Vector3::z_axis(), self.0[2])
    }

    /// Converts the angles back into the sequential convention used by motion capture data.
    pub fn to_sequential_radians(&self) -> SequentialRadians {
        let decomposition = decompose_static_xyz(self.to_rotation().matrix());
        if decomposition.is_gimbal_locked() {
            debug!(
                angles = ?self.0,
                "Rotating-frame rotation is gimbal locked in the sequential convention"
            );
        }

        SequentialRadians(decomposition.angles)
    }

    /// Converts the angles back into sequential degrees, i.e. the AMC convention.
    pub fn to_sequential_degrees(&self) -> SequentialDegrees {
        self.to_sequential_radians().to_degrees()
    }
}

/// The result of splitting a rotation matrix into three Euler angles.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Decomposition {
    /// The x, y and z angles in radians.
    angles: Vector3<f64>,

    /// Set when the middle axis is at +/- 90 degrees and the outer axes coincide.
    gimbal_locked: bool,
}

impl Decomposition {
    /// Returns the decomposed angles in radians.
    pub fn angles(&self) -> &Vector3<f64> {
        &self.angles
    }

    /// Returns a value indicating whether the decomposition was degenerate.
    ///
    /// A gimbal locked rotation has infinitely many decompositions. The one returned sets
    /// the x angle to zero and folds the whole rotation about the coincident axis into the
    /// remaining outer angle.
    pub fn is_gimbal_locked(&self) -> bool {
        self.gimbal_locked
    }
}

/// Decomposes a rotation matrix into rotating-frame angles with `m = Rx(a) * Ry(b) * Rz(c)`.
///
/// The middle angle is in [-PI/2, PI/2], the outer angles in [-PI, PI].
pub fn decompose_rotating_xyz(m: &Matrix3<f64>) -> Decomposition {
    let cy = (m[(2, 2)] * m[(2, 2)] + m[(1, 2)] * m[(1, 2)]).sqrt();
    if cy > GIMBAL_LOCK_EPSILON {
        Decomposition {
            angles: Vector3::new(
                (-m[(1, 2)]).atan2(m[(2, 2)]),
                m[(0, 2)].atan2(cy),
                (-m[(0, 1)]).atan2(m[(0, 0)]),
            ),
            gimbal_locked: false,
        }
    } else {
        Decomposition {
            angles: Vector3::new(0.0, m[(0, 2)].atan2(cy), m[(1, 0)].atan2(m[(1, 1)])),
            gimbal_locked: true,
        }
    }
}

/// Decomposes a rotation matrix into sequential angles with `m = Rz(c) * Ry(b) * Rx(a)`.
///
/// The middle angle is in [-PI/2, PI/2], the outer angles in [-PI, PI].
pub fn decompose_static_xyz(m: &Matrix3<f64>) -> Decomposition {
    let cy = (m[(0, 0)] * m[(0, 0)] + m[(1, 0)] * m[(1, 0)]).sqrt();
    if cy > GIMBAL_LOCK_EPSILON {
        Decomposition {
            angles: Vector3::new(
                m[(2, 1)].atan2(m[(2, 2)]),
                (-m[(2, 0)]).atan2(cy),
                m[(1, 0)].atan2(m[(0, 0)]),
            ),
            gimbal_locked: false,
        }
    } else {
        Decomposition {
            angles: Vector3::new(
                (-m[(1, 2)]).atan2(m[(1, 1)]),
                (-m[(2, 0)]).atan2(cy),
                0.0,
            ),
            gimbal_locked: true,
        }
    }
}

/// Converts sequential Euler degrees (AMC) into rotating-frame Euler radians (simulator).
pub fn to_rotating_radians(sequential_degrees: &SequentialDegrees) -> RotatingRadians {
    sequential_degrees.to_rotating_radians()
}

/// Converts rotating-frame Euler radians (simulator) into sequential Euler degrees (AMC).
pub fn to_sequential_degrees(rotating_radians: &RotatingRadians) -> SequentialDegrees {
    rotating_radians.to_sequential_degrees()
}
