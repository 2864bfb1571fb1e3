//! Turns the flat action vector produced by a policy into per joint targets.
//!
//! The policy outputs one rotation per actuated (non-root) joint, in DOF map order, each
//! encoded in the configured [RepresentationMode]. Every component is limited to
//! `[-max_action_magnitude, max_action_magnitude]`.

extern crate nalgebra as na;

use std::collections::HashMap;

use na::DVector;

use crate::{
    rotation::{
        convention::RotatingRadians,
        representation::{AngleRepresentation, RepresentationMode},
    },
    skeleton::dof_map::SkeletonDofMap,
    Error,
};

#[cfg(test)]
#[path = "action_decoder_tests.rs"]
mod action_decoder_tests;

/// The magnitude limit applied to every action component when none is configured.
pub const DEFAULT_MAX_ACTION_MAGNITUDE: f64 = 10.0;

/// The lower and upper bound of every action component.
#[derive(Clone, Debug, PartialEq)]
pub struct ActionLimits {
    lower: DVector<f64>,
    upper: DVector<f64>,
}

impl ActionLimits {
    /// Returns the lower bounds.
    pub fn lower(&self) -> &DVector<f64> {
        &self.lower
    }

    /// Returns the upper bounds.
    pub fn upper(&self) -> &DVector<f64> {
        &self.upper
    }
}

/// Decodes policy actions in a fixed [RepresentationMode].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ActionDecoder {
    mode: RepresentationMode,
    max_action_magnitude: f64,
}

impl ActionDecoder {
    /// Returns the length of the action vectors for the given skeleton.
    pub fn action_dim(&self, dof_map: &SkeletonDofMap) -> usize {
        self.mode.component_count() * dof_map.joint_count()
    }

    /// Returns the bounds of every component of the action vector.
    pub fn action_limits(&self, dof_map: &SkeletonDofMap) -> ActionLimits {
        let dim = self.action_dim(dof_map);
        ActionLimits {
            lower: DVector::from_element(dim, -self.max_action_magnitude),
            upper: DVector::from_element(dim, self.max_action_magnitude),
        }
    }

    /// Decodes an action into one target per actuated joint, in DOF map order.
    ///
    /// Components outside the action limits are clamped first. Quaternions are normalized,
    /// and a zero quaternion or a zero axis decodes to the identity rotation.
    ///
    /// ## Parameters
    ///
    /// * 'dof_map' - The mapping from joints to simulator DOFs
    /// * 'raw' - The action vector produced by the policy
    ///
    /// ## Errors
    ///
    /// * [Error::ActionLengthMismatch] - Returned when `raw` does not have
    ///   [ActionDecoder::action_dim()] elements.
    pub fn decode(
        &self,
        dof_map: &SkeletonDofMap,
        raw: &[f64],
    ) -> Result<Vec<RotatingRadians>, Error> {
        let expected = self.action_dim(dof_map);
        if raw.len() != expected {
            return Err(Error::ActionLengthMismatch {
                expected,
                actual: raw.len(),
            });
        }

        let clamped: Vec<f64> = raw
            .iter()
            .map(|v| v.clamp(-self.max_action_magnitude, self.max_action_magnitude))
            .collect();

        clamped
            .chunks(self.mode.component_count())
            .map(|chunk| {
                AngleRepresentation::from_components(self.mode, chunk)
                    .map(|rotation| rotation.to_rotating_radians())
            })
            .collect()
    }

    /// Decodes an action into targets keyed by actuated joint name.
    ///
    /// ## Errors
    ///
    /// See [ActionDecoder::decode()].
    pub fn decode_to_map(
        &self,
        dof_map: &SkeletonDofMap,
        raw: &[f64],
    ) -> Result<HashMap<String, RotatingRadians>, Error> {
        let targets = self.decode(dof_map, raw)?;
        Ok(dof_map
            .joints()
            .iter()
            .map(|joint| joint.name().to_string())
            .zip(targets)
            .collect())
    }

    /// Returns the magnitude limit of the action components.
    pub fn max_action_magnitude(&self) -> f64 {
        self.max_action_magnitude
    }

    /// Returns the representation mode of the rotations in the action.
    pub fn mode(&self) -> RepresentationMode {
        self.mode
    }

    /// Creates a new [ActionDecoder] instance.
    ///
    /// ## Parameters
    ///
    /// * 'mode' - The encoding of the rotations in the action vector
    /// * 'max_action_magnitude' - The limit of every action component
    ///
    /// ## Errors
    ///
    /// * [Error::InvalidActionMagnitude] - Returned when `max_action_magnitude` is not a
    ///   positive finite number.
    pub fn new(mode: RepresentationMode, max_action_magnitude: f64) -> Result<Self, Error> {
        if !max_action_magnitude.is_finite() || max_action_magnitude <= 0.0 {
            return Err(Error::InvalidActionMagnitude {
                magnitude: max_action_magnitude,
            });
        }

        Ok(Self {
            mode,
            max_action_magnitude,
        })
    }
}
