//! Defines how joint rotations are encoded in observation and action vectors.
//!
//! The simulator works with rotating-frame Euler angles ([RotatingRadians]). Policies may
//! prefer to read and write rotations as quaternions or as axis-angle pairs, so every
//! rotation that crosses the policy boundary is encoded in one of the
//! [RepresentationMode] formats.

extern crate nalgebra as na;

use na::{Quaternion, Rotation3, Unit, UnitQuaternion, Vector3, Vector4};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    rotation::convention::{decompose_rotating_xyz, RotatingRadians},
    Error,
};

#[cfg(test)]
#[path = "representation_tests.rs"]
mod representation_tests;

/// Norms below this value are treated as zero when decoding quaternions and axes.
const DEGENERATE_NORM: f64 = 4.0 * f64::EPSILON;

/// Selects the encoding used for rotations in observation or action vectors.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum RepresentationMode {
    /// Rotating-frame Euler angles in radians, 3 components.
    #[default]
    Euler,

    /// Unit quaternion stored as [w, x, y, z], 4 components.
    Quaternion,

    /// Unit axis followed by the rotation angle in radians, 4 components.
    AxisAngle,
}

impl RepresentationMode {
    /// Returns the number of values a single rotation occupies in this mode.
    pub fn component_count(&self) -> usize {
        match self {
            RepresentationMode::Euler => 3,
            RepresentationMode::Quaternion => 4,
            RepresentationMode::AxisAngle => 4,
        }
    }
}

/// A single rotation encoded in one of the [RepresentationMode] formats.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AngleRepresentation {
    /// Rotating-frame Euler angles in radians.
    Euler(Vector3<f64>),

    /// Quaternion stored as [w, x, y, z].
    Quaternion(Vector4<f64>),

    /// Rotation of `angle` radians around the unit `axis`.
    AxisAngle {
        /// The unit rotation axis.
        axis: Vector3<f64>,
        /// The rotation angle in radians.
        angle: f64,
    },
}

impl AngleRepresentation {
    /// Encodes the given rotating-frame Euler angles in the requested mode.
    ///
    /// The identity rotation has no defined axis. It is encoded with the x axis and a zero
    /// angle.
    pub fn encode(mode: RepresentationMode, angles: &RotatingRadians) -> Self {
        match mode {
            RepresentationMode::Euler => AngleRepresentation::Euler(*angles.as_vector()),
            RepresentationMode::Quaternion => {
                let q = rotating_quaternion(angles);
                AngleRepresentation::Quaternion(Vector4::new(q.w, q.i, q.j, q.k))
            }
            RepresentationMode::AxisAngle => match rotating_quaternion(angles).axis_angle() {
                Some((axis, angle)) => AngleRepresentation::AxisAngle {
                    axis: axis.into_inner(),
                    angle,
                },
                None => AngleRepresentation::AxisAngle {
                    axis: Vector3::x(),
                    angle: 0.0,
                },
            },
        }
    }

    /// Decodes a slice of raw components in the given mode.
    ///
    /// ## Errors
    ///
    /// * [Error::AngleCountMismatch] - Returned when the slice length differs from
    ///   [RepresentationMode::component_count()]
    pub fn from_components(mode: RepresentationMode, components: &[f64]) -> Result<Self, Error> {
        if components.len() != mode.component_count() {
            return Err(Error::AngleCountMismatch {
                expected: mode.component_count(),
                actual: components.len(),
            });
        }

        let representation = match mode {
            RepresentationMode::Euler => AngleRepresentation::Euler(Vector3::new(
                components[0],
                components[1],
                components[2],
            )),
            RepresentationMode::Quaternion => AngleRepresentation::Quaternion(Vector4::new(
                components[0],
                components[1],
                components[2],
                components[3],
            )),
            RepresentationMode::AxisAngle => AngleRepresentation::AxisAngle {
                axis: Vector3::new(components[0], components[1], components[2]),
                angle: components[3],
            },
        };

        Ok(representation)
    }

    /// Returns the mode this rotation is encoded in.
    pub fn mode(&self) -> RepresentationMode {
        match self {
            AngleRepresentation::Euler(_) => RepresentationMode::Euler,
            AngleRepresentation::Quaternion(_) => RepresentationMode::Quaternion,
            AngleRepresentation::AxisAngle { .. } => RepresentationMode::AxisAngle,
        }
    }

    /// Appends the raw components to the given buffer.
    pub fn extend_into(&self, buffer: &mut Vec<f64>) {
        match self {
            AngleRepresentation::Euler(v) => buffer.extend(v.iter()),
            AngleRepresentation::Quaternion(q) => buffer.extend(q.iter()),
            AngleRepresentation::AxisAngle { axis, angle } => {
                buffer.extend(axis.iter());
                buffer.push(*angle);
            }
        }
    }

    /// Decodes the rotation into rotating-frame Euler angles.
    ///
    /// Quaternions are normalized first. A quaternion or an axis with a (near) zero norm
    /// decodes to the identity rotation.
    pub fn to_rotating_radians(&self) -> RotatingRadians {
        match self {
            AngleRepresentation::Euler(v) => RotatingRadians::from_vector(*v),
            AngleRepresentation::Quaternion(q) => {
                let quaternion = Quaternion::new(q[0], q[1], q[2], q[3]);
                if quaternion.norm() < DEGENERATE_NORM {
                    return RotatingRadians::zeros();
                }

                let rotation: Rotation3<f64> =
                    UnitQuaternion::from_quaternion(quaternion).to_rotation_matrix();
                rotation_to_rotating_radians(&rotation)
            }
            AngleRepresentation::AxisAngle { axis, angle } => {
                if axis.norm() < DEGENERATE_NORM {
                    return RotatingRadians::zeros();
                }

                let rotation = Rotation3::from_axis_angle(&Unit::new_normalize(*axis), *angle);
                rotation_to_rotating_radians(&rotation)
            }
        }
    }
}

/// Returns the quaternion `qx(a) * qy(b) * qz(c)` for rotating-frame Euler angles.
fn rotating_quaternion(angles: &RotatingRadians) -> UnitQuaternion<f64> {
    UnitQuaternion::from_axis_angle(&Vector3::x_axis(), angles[0])
        * UnitQuaternion::from_axis_angle(&Vector3::y_axis(), angles[1])
        * UnitQuaternion::from_axis_angle(&Vector3::z_axis(), angles[2])
}

fn rotation_to_rotating_radians(rotation: &Rotation3<f64>) -> RotatingRadians {
    RotatingRadians::from_vector(*decompose_rotating_xyz(rotation.matrix()).angles())
}
