//! Computes the proportional-derivative torques that drive the simulated skeleton towards
//! a set of target joint angles.
//!
//! For every actuated joint the controller measures the error between the target and the
//! current angles, and between the target and the angles one step earlier. The error rate
//! is the change between the two divided by the timestep. Both are compressed to the
//! joint's axis order and scattered into full size vectors, after which
//!
//! ```text
//! torque = P * error + D * error_rate
//! ```
//!
//! element by element. The root and any simulator DOF without a joint receive no torque.

extern crate nalgebra as na;

use std::collections::HashMap;

use na::{DVector, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    number_space::{to_number_space, NumberSpaceType, RealNumberValueSpace},
    rotation::convention::RotatingRadians,
    skeleton::dof_map::SkeletonDofMap,
    Error,
};

#[cfg(test)]
#[path = "pd_controller_tests.rs"]
mod pd_controller_tests;

/// Describes how a gain is spread over the simulator DOFs.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum GainSchedule {
    /// Every DOF uses the same gain.
    Uniform(f64),

    /// Every DOF has its own gain. The list has one entry per simulator DOF.
    PerDof(Vec<f64>),
}

impl GainSchedule {
    /// Expands the schedule into one gain per simulator DOF.
    ///
    /// ## Errors
    ///
    /// * [Error::GainLengthMismatch] - Returned when a per DOF list does not have one entry
    ///   per simulator DOF.
    pub fn to_vector(&self, total_dofs: usize) -> Result<DVector<f64>, Error> {
        match self {
            GainSchedule::Uniform(gain) => Ok(DVector::from_element(total_dofs, *gain)),
            GainSchedule::PerDof(gains) => {
                if gains.len() != total_dofs {
                    return Err(Error::GainLengthMismatch {
                        expected: total_dofs,
                        actual: gains.len(),
                    });
                }

                Ok(DVector::from_column_slice(gains))
            }
        }
    }
}

/// The proportional and derivative gains, one per simulator DOF.
#[derive(Clone, Debug, PartialEq)]
pub struct PdGains {
    proportional: DVector<f64>,
    derivative: DVector<f64>,
}

impl PdGains {
    /// Returns the derivative gains.
    pub fn derivative(&self) -> &DVector<f64> {
        &self.derivative
    }

    /// Returns the number of DOFs the gains are defined for.
    pub fn dof_count(&self) -> usize {
        self.proportional.len()
    }

    /// Creates a new [PdGains] instance.
    ///
    /// ## Parameters
    ///
    /// * 'proportional' - The proportional gain schedule
    /// * 'derivative' - The derivative gain schedule
    /// * 'total_dofs' - The number of simulator DOFs
    ///
    /// ## Errors
    ///
    /// * [Error::GainLengthMismatch] - Returned when either schedule lists a different
    ///   number of gains than there are simulator DOFs.
    pub fn new(
        proportional: &GainSchedule,
        derivative: &GainSchedule,
        total_dofs: usize,
    ) -> Result<Self, Error> {
        Ok(Self {
            proportional: proportional.to_vector(total_dofs)?,
            derivative: derivative.to_vector(total_dofs)?,
        })
    }

    /// Returns the proportional gains.
    pub fn proportional(&self) -> &DVector<f64> {
        &self.proportional
    }
}

/// Computes tracking torques for the actuated joints of a skeleton.
pub struct PdController {
    gains: PdGains,

    /// The time between two consecutive simulation steps, in seconds.
    dt: f64,

    error_space_type: NumberSpaceType,
    error_space: Box<dyn RealNumberValueSpace>,
}

impl PdController {
    /// Returns the timestep in seconds.
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Returns the space in which angle errors are measured.
    pub fn error_space(&self) -> NumberSpaceType {
        self.error_space_type
    }

    /// Returns the gains.
    pub fn gains(&self) -> &PdGains {
        &self.gains
    }

    /// Creates a new [PdController] instance.
    ///
    /// ## Parameters
    ///
    /// * 'gains' - The gains, one per simulator DOF
    /// * 'dt' - The simulation timestep in seconds
    /// * 'error_space' - The space in which angle errors are measured
    ///
    /// ## Errors
    ///
    /// * [Error::InvalidTimestep] - Returned when `dt` is not a positive finite number.
    pub fn new(gains: PdGains, dt: f64, error_space: NumberSpaceType) -> Result<Self, Error> {
        if !dt.is_finite() || dt <= 0.0 {
            return Err(Error::InvalidTimestep { dt });
        }

        Ok(Self {
            gains,
            dt,
            error_space_type: error_space,
            error_space: to_number_space(error_space),
        })
    }

    /// Computes the torques for every simulator DOF.
    ///
    /// All three angle maps hold expanded rotating-frame Euler angles keyed by joint name.
    /// They must contain every joint in the DOF map; additional entries are ignored.
    ///
    /// ## Parameters
    ///
    /// * 'dof_map' - The mapping from joints to simulator DOFs
    /// * 'target' - The angles the joints should reach
    /// * 'current' - The angles of the joints now
    /// * 'past' - The angles of the joints one step earlier
    ///
    /// ## Errors
    ///
    /// * [Error::GainLengthMismatch] - Returned when the gains were made for a skeleton
    ///   with a different number of DOFs.
    /// * [Error::UnknownJoint] - Returned when a joint of the DOF map is missing from one of
    ///   the angle maps.
    pub fn torques(
        &self,
        dof_map: &SkeletonDofMap,
        target: &HashMap<String, RotatingRadians>,
        current: &HashMap<String, RotatingRadians>,
        past: &HashMap<String, RotatingRadians>,
    ) -> Result<DVector<f64>, Error> {
        let total_dofs = dof_map.total_dofs();
        if self.gains.dof_count() != total_dofs {
            return Err(Error::GainLengthMismatch {
                expected: total_dofs,
                actual: self.gains.dof_count(),
            });
        }

        let mut torques = DVector::zeros(total_dofs);
        for joint in dof_map.joints() {
            let target = lookup(target, joint.name())?;
            let current = lookup(current, joint.name())?;
            let past = lookup(past, joint.name())?;

            let error = self.error_between(current, target);
            let past_error = self.error_between(past, target);
            let error_rate = (error - past_error) / self.dt;

            let error = joint.order().compress(&error);
            let error_rate = joint.order().compress(&error_rate);
            for (i, index) in joint.window().range().enumerate() {
                torques[index] = self.gains.proportional[index] * error[i]
                    + self.gains.derivative[index] * error_rate[i];
            }
        }

        Ok(torques)
    }

    fn error_between(&self, actual: &RotatingRadians, target: &RotatingRadians) -> Vector3<f64> {
        Vector3::from_fn(|i, _| self.error_space.tracking_error(actual[i], target[i]))
    }
}

fn lookup<'a>(
    angles: &'a HashMap<String, RotatingRadians>,
    joint: &str,
) -> Result<&'a RotatingRadians, Error> {
    angles.get(joint).ok_or_else(|| Error::UnknownJoint {
        joint: joint.to_string(),
    })
}
