//! Defines the spaces in which the difference between a target angle and an actual angle is
//! measured.
//!
//! In a linear space the difference between two angles is simply `target - actual`. This
//! is what the PD controller uses by default and it matches the way the simulator stores
//! its generalized coordinates, i.e. as unbounded numbers.
//!
//! In a periodic space angles wrap around every 2 * [Pi](core::f64::consts::PI), so the
//! difference between two angles is the shortest signed arc between them. A target of
//! 179 degrees and an actual angle of -179 degrees are then 2 degrees apart instead of
//! 358 degrees. The [to_number_space()] function creates either of these spaces from a
//! [NumberSpaceType].

use std::f64::consts::PI;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[cfg(test)]
#[path = "number_space_tests.rs"]
mod number_space_tests;

/// Defines the different kinds of number spaces available.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum NumberSpaceType {
    /// Indicates that angles are unbounded numbers. The tracking error is `target - actual`.
    LinearUnlimited,

    /// Indicates that angles live on a circle of 2 PI radians. The tracking error is the
    /// shortest signed arc from the actual angle to the target.
    AngularLimited,
}

impl Default for NumberSpaceType {
    fn default() -> Self {
        NumberSpaceType::LinearUnlimited
    }
}

/// Defines an abstraction over the spaces in which angle errors are measured.
pub trait RealNumberValueSpace: Send + Sync {
    /// Returns the signed error that moves `actual` onto `target`.
    ///
    /// ## Parameters
    ///
    /// * `actual` - The measured value.
    /// * `target` - The desired value.
    ///
    /// ## Example
    ///
    /// ```
    /// use core::f64::consts::PI;
    /// use mimic_retargeting::number_space::{ NumberSpaceType, to_number_space };
    ///
    /// let space = to_number_space(NumberSpaceType::LinearUnlimited);
    /// assert_eq!(1.5 * PI, space.tracking_error(0.0, 1.5 * PI));
    ///
    /// let space = to_number_space(NumberSpaceType::AngularLimited);
    /// assert!((space.tracking_error(0.0, 1.5 * PI) + 0.5 * PI).abs() < 1e-12);
    /// ```
    fn tracking_error(&self, actual: f64, target: f64) -> f64;
}

/// The space of unbounded real numbers.
pub(crate) struct LinearUnboundedSpace {}

impl LinearUnboundedSpace {
    pub fn new() -> LinearUnboundedSpace {
        LinearUnboundedSpace {}
    }
}

impl RealNumberValueSpace for LinearUnboundedSpace {
    fn tracking_error(&self, actual: f64, target: f64) -> f64 {
        target - actual
    }
}

/// A circular space of angles that wraps around every 2 PI radians.
pub(crate) struct PeriodicBoundedCircularSpace {}

impl PeriodicBoundedCircularSpace {
    /// The size of a full revolution.
    const PERIOD: f64 = 2.0 * PI;

    pub fn new() -> PeriodicBoundedCircularSpace {
        PeriodicBoundedCircularSpace {}
    }
}

impl RealNumberValueSpace for PeriodicBoundedCircularSpace {
    fn tracking_error(&self, actual: f64, target: f64) -> f64 {
        // Shortest signed arc, in (-PI, PI]
        let arc = (target - actual).rem_euclid(Self::PERIOD);
        if arc > PI {
            arc - Self::PERIOD
        } else {
            arc
        }
    }
}

/// Returns a [RealNumberValueSpace] instance for the given number space type.
///
/// ```
/// use core::f64::consts::PI;
/// use mimic_retargeting::number_space::{ NumberSpaceType, to_number_space };
///
/// let space = to_number_space(NumberSpaceType::AngularLimited);
/// assert!((space.tracking_error(0.9 * PI, -0.9 * PI) - 0.2 * PI).abs() < 1e-12);
/// ```
pub fn to_number_space(number_space_type: NumberSpaceType) -> Box<dyn RealNumberValueSpace> {
    match number_space_type {
        NumberSpaceType::LinearUnlimited => Box::new(LinearUnboundedSpace::new()),
        NumberSpaceType::AngularLimited => Box::new(PeriodicBoundedCircularSpace::new()),
    }
}
