//! Defines the axis orders of motion capture joints and the codec that moves joint angles
//! between a joint's native layout and a full 3-axis vector.
//!
//! A joint in an ASF skeleton actuates a subset of the x, y and z axes, listed in the
//! order in which the AMC file stores them, e.g. `"zx"`. Angle data for that joint then
//! holds exactly two values, the z angle first. To run the data through the rotation
//! conversions it is expanded to a 3-vector (`[x, 0, z]`), and afterwards compressed back
//! to the native layout (`[z, x]`).

extern crate nalgebra as na;

use std::{fmt::Display, str::FromStr};

use na::Vector3;

use crate::Error;

#[cfg(test)]
#[path = "joint_spec_tests.rs"]
mod joint_spec_tests;

/// One of the three rotation axes.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Axis {
    /// The x axis, stored at index 0 of an expanded vector.
    X,
    /// The y axis, stored at index 1 of an expanded vector.
    Y,
    /// The z axis, stored at index 2 of an expanded vector.
    Z,
}

impl Axis {
    /// Returns the index of the axis in an expanded 3-vector.
    pub fn index(&self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    fn from_letter(letter: char) -> Option<Axis> {
        match letter {
            'x' => Some(Axis::X),
            'y' => Some(Axis::Y),
            'z' => Some(Axis::Z),
            _ => None,
        }
    }

    fn letter(&self) -> char {
        match self {
            Axis::X => 'x',
            Axis::Y => 'y',
            Axis::Z => 'z',
        }
    }
}

/// The axes a joint actuates, in the order its angle data is stored.
///
/// An axis order holds 1 to 3 distinct axes.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct AxisOrder {
    axes: Vec<Axis>,
}

impl AxisOrder {
    /// Returns the axes in storage order.
    pub fn axes(&self) -> &[Axis] {
        &self.axes
    }

    /// Compresses a 3-vector to the joint's native layout.
    ///
    /// ## Example
    ///
    /// ```
    /// use nalgebra::Vector3;
    /// use mimic_retargeting::skeleton::joint_spec::AxisOrder;
    ///
    /// let order: AxisOrder = "zx".parse().unwrap();
    /// assert_eq!(vec![3.0, 1.0], order.compress(&Vector3::new(1.0, 2.0, 3.0)));
    /// ```
    pub fn compress(&self, vector: &Vector3<f64>) -> Vec<f64> {
        self.axes.iter().map(|axis| vector[axis.index()]).collect()
    }

    /// Returns the number of degrees of freedom of the joint.
    pub fn dof_count(&self) -> usize {
        self.axes.len()
    }

    /// Expands angles stored in the joint's native layout to a full 3-vector.
    ///
    /// Axes the joint does not actuate are set to zero.
    ///
    /// ## Errors
    ///
    /// * [Error::AngleCountMismatch] - Returned when the number of angles differs from
    ///   the number of axes in the order.
    ///
    /// ## Example
    ///
    /// ```
    /// use nalgebra::Vector3;
    /// use mimic_retargeting::skeleton::joint_spec::AxisOrder;
    ///
    /// let order: AxisOrder = "zx".parse().unwrap();
    /// assert_eq!(Vector3::new(2.0, 0.0, 1.0), order.expand(&[1.0, 2.0]).unwrap());
    /// ```
    pub fn expand(&self, angles: &[f64]) -> Result<Vector3<f64>, Error> {
        if angles.len() != self.axes.len() {
            return Err(Error::AngleCountMismatch {
                expected: self.axes.len(),
                actual: angles.len(),
            });
        }

        let mut result = Vector3::zeros();
        for (axis, angle) in self.axes.iter().zip(angles) {
            result[axis.index()] = *angle;
        }

        Ok(result)
    }

    /// Returns the full `"xyz"` order used for root rotations.
    pub fn xyz() -> Self {
        Self {
            axes: vec![Axis::X, Axis::Y, Axis::Z],
        }
    }
}

impl FromStr for AxisOrder {
    type Err = Error;

    /// Parses an order such as `"zyx"` or `"y"`.
    ///
    /// ## Errors
    ///
    /// * [Error::InvalidAxisOrder] - Returned when the string is empty, longer than 3
    ///   characters, contains a character other than `x`, `y` or `z`, or repeats an axis.
    fn from_str(order: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::InvalidAxisOrder {
            order: order.to_string(),
        };

        let mut axes = Vec::with_capacity(3);
        for letter in order.chars() {
            let axis = Axis::from_letter(letter).ok_or_else(invalid)?;
            if axes.contains(&axis) {
                return Err(invalid());
            }

            axes.push(axis);
        }

        if axes.is_empty() || axes.len() > 3 {
            return Err(invalid());
        }

        Ok(Self { axes })
    }
}

impl Display for AxisOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for axis in &self.axes {
            write!(f, "{}", axis.letter())?;
        }

        Ok(())
    }
}

/// Describes a single motion capture joint: its name and the axes it actuates.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct JointSpec {
    /// The joint name as used in the AMC frames.
    name: String,

    /// The actuated axes in storage order.
    order: AxisOrder,
}

impl JointSpec {
    /// Returns the number of degrees of freedom of the joint.
    pub fn dof_count(&self) -> usize {
        self.order.dof_count()
    }

    /// Returns the name of the joint.
    pub fn name(&self) -> &str {
        self.name.as_ref()
    }

    /// Creates a new [JointSpec] instance.
    ///
    /// ## Parameters
    ///
    /// * 'name' - The name of the joint in the AMC data
    /// * 'order' - The axes the joint actuates, in storage order
    pub fn new(name: String, order: AxisOrder) -> Self {
        Self { name, order }
    }

    /// Returns the axis order of the joint.
    pub fn order(&self) -> &AxisOrder {
        &self.order
    }
}

/// Expands angles in the native layout described by `order` to a full 3-vector.
///
/// ## Errors
///
/// * [Error::InvalidAxisOrder] - Returned when `order` is not a valid axis order.
/// * [Error::AngleCountMismatch] - Returned when the number of angles differs from the
///   length of `order`.
pub fn expand_angle(angles: &[f64], order: &str) -> Result<Vector3<f64>, Error> {
    order.parse::<AxisOrder>()?.expand(angles)
}

/// Compresses a full 3-vector to the native layout described by `order`.
///
/// ## Errors
///
/// * [Error::InvalidAxisOrder] - Returned when `order` is not a valid axis order.
pub fn compress_angle(vector: &Vector3<f64>, order: &str) -> Result<Vec<f64>, Error> {
    Ok(order.parse::<AxisOrder>()?.compress(vector))
}
