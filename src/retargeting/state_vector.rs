//! Flattens the state of the simulated skeleton into the observation vector a policy reads.
//!
//! The observation is laid out as
//!
//! ```text
//! [q_translation (3), dq_translation (3), q_rotations (n * k), dq_rotations (n * k)]
//! ```
//!
//! where `n` is the number of joints including the root, the root rotation coming first
//! and the other joints following in DOF map order, and `k` is the number of components of
//! the configured [RepresentationMode].

extern crate nalgebra as na;

use std::{collections::HashMap, iter};

use na::{DVector, Vector3};

use crate::{
    rotation::{
        convention::RotatingRadians,
        representation::{AngleRepresentation, RepresentationMode},
    },
    simulation::skeleton_state::SkeletonState,
    skeleton::dof_map::{SkeletonDofMap, ROOT_ROTATION_DOFS, ROOT_TRANSLATION_DOFS},
    Error,
};

#[cfg(test)]
#[path = "state_vector_tests.rs"]
mod state_vector_tests;

/// The joint angles stored in a simulator DOF vector, split per joint.
///
/// Each joint window is expanded to a full rotating-frame 3-vector using the joint's axis
/// order, so unactuated axes are zero.
#[derive(Clone, Debug, PartialEq)]
pub struct SkeletonAngles {
    /// The root translation, DOFs [3, 6).
    translation: Vector3<f64>,

    /// The root rotation, DOFs [0, 3).
    root: RotatingRadians,

    /// The non-root joints in DOF map order.
    joints: Vec<RotatingRadians>,
}

impl SkeletonAngles {
    /// Splits a simulator DOF vector into per joint angles.
    ///
    /// The vector may hold positions or velocities. Velocities are expanded in the same
    /// way, so the result then holds angular rates rather than angles.
    ///
    /// ## Parameters
    ///
    /// * 'dof_map' - The mapping from joints to simulator DOFs
    /// * 'values' - A vector with one element per simulator DOF
    ///
    /// ## Errors
    ///
    /// * [Error::StateLengthMismatch] - Returned when `values` does not have one element per
    ///   simulator DOF.
    pub fn from_dof_vector(dof_map: &SkeletonDofMap, values: &DVector<f64>) -> Result<Self, Error> {
        if values.len() != dof_map.total_dofs() {
            return Err(Error::StateLengthMismatch {
                expected: dof_map.total_dofs(),
                actual: values.len(),
            });
        }

        let values = values.as_slice();
        let translation = Vector3::from_column_slice(&values[ROOT_TRANSLATION_DOFS]);
        let root = RotatingRadians::from_vector(Vector3::from_column_slice(
            &values[ROOT_ROTATION_DOFS],
        ));
        let joints = dof_map
            .joints()
            .iter()
            .map(|joint| {
                joint
                    .order()
                    .expand(&values[joint.window().range()])
                    .map(RotatingRadians::from_vector)
            })
            .collect::<Result<Vec<_>, Error>>()?;

        Ok(Self {
            translation,
            root,
            joints,
        })
    }

    /// Returns the root rotation followed by the non-root joints.
    pub fn rotations(&self) -> impl Iterator<Item = &RotatingRadians> {
        iter::once(&self.root).chain(self.joints.iter())
    }

    /// Returns the non-root joints in DOF map order.
    pub fn joints(&self) -> &[RotatingRadians] {
        &self.joints
    }

    /// Returns the root rotation.
    pub fn root(&self) -> &RotatingRadians {
        &self.root
    }

    /// Returns the angles of the non-root joints keyed by joint name.
    pub fn to_joint_map(&self, dof_map: &SkeletonDofMap) -> HashMap<String, RotatingRadians> {
        dof_map
            .joints()
            .iter()
            .zip(self.joints.iter())
            .map(|(joint, angles)| (joint.name().to_string(), *angles))
            .collect()
    }

    /// Returns the root translation.
    pub fn translation(&self) -> &Vector3<f64> {
        &self.translation
    }
}

/// Builds observation vectors in a fixed [RepresentationMode].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StateVectorBuilder {
    mode: RepresentationMode,
}

impl StateVectorBuilder {
    /// Flattens the skeleton state into an observation vector.
    ///
    /// ## Parameters
    ///
    /// * 'dof_map' - The mapping from joints to simulator DOFs
    /// * 'state' - The current state of the simulated skeleton
    ///
    /// ## Errors
    ///
    /// * [Error::StateLengthMismatch] - Returned when the state does not have one element
    ///   per simulator DOF.
    pub fn build(
        &self,
        dof_map: &SkeletonDofMap,
        state: &SkeletonState,
    ) -> Result<DVector<f64>, Error> {
        state.ensure_dof_count(dof_map.total_dofs())?;

        let q = SkeletonAngles::from_dof_vector(dof_map, state.positions())?;
        let dq = SkeletonAngles::from_dof_vector(dof_map, state.velocities())?;

        let mut buffer = Vec::with_capacity(self.observation_dim(dof_map));
        buffer.extend(q.translation().iter());
        buffer.extend(dq.translation().iter());
        for angles in q.rotations().chain(dq.rotations()) {
            AngleRepresentation::encode(self.mode, angles).extend_into(&mut buffer);
        }

        Ok(DVector::from_vec(buffer))
    }

    /// Returns the representation mode of the rotations in the observation.
    pub fn mode(&self) -> RepresentationMode {
        self.mode
    }

    /// Creates a new [StateVectorBuilder] instance.
    pub fn new(mode: RepresentationMode) -> Self {
        Self { mode }
    }

    /// Returns the length of the observation vectors built for the given skeleton.
    ///
    /// ## Example
    ///
    /// ```
    /// use mimic_retargeting::retargeting::state_vector::StateVectorBuilder;
    /// use mimic_retargeting::rotation::representation::RepresentationMode;
    /// use mimic_retargeting::skeleton::dof_map::SkeletonDofMap;
    /// use mimic_retargeting::skeleton::joint_spec::JointSpec;
    ///
    /// let names = ["rx", "ry", "rz", "tx", "ty", "tz", "neck_x", "neck_y"];
    /// let joints = [JointSpec::new("neck".to_string(), "xy".parse().unwrap())];
    /// let map = SkeletonDofMap::new(&names, &joints).unwrap();
    ///
    /// let builder = StateVectorBuilder::new(RepresentationMode::Quaternion);
    /// assert_eq!(6 + 2 * 2 * 4, builder.observation_dim(&map));
    /// ```
    pub fn observation_dim(&self, dof_map: &SkeletonDofMap) -> usize {
        2 * ROOT_TRANSLATION_DOFS.len()
            + 2 * (dof_map.joint_count() + 1) * self.mode.component_count()
    }
}
