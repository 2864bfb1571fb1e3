extern crate nalgebra as na;

use na::DVector;

use crate::Error;

#[cfg(test)]
#[path = "skeleton_state_tests.rs"]
mod skeleton_state_tests;

/// Stores the generalized positions and velocities of the simulated skeleton.
///
/// Both vectors have one element per simulator DOF. The first six elements belong to the
/// root: the rotation in rotating-frame Euler radians followed by the translation. Every
/// other element is a joint angle in radians or its rate of change.
#[derive(Clone, Debug, PartialEq)]
pub struct SkeletonState {
    /// The generalized positions, often called `q`.
    positions: DVector<f64>,

    /// The generalized velocities, often called `dq`.
    velocities: DVector<f64>,
}

impl SkeletonState {
    /// Returns the number of DOFs described by the state.
    pub fn dof_count(&self) -> usize {
        self.positions.len()
    }

    /// Checks that the state describes the given number of DOFs.
    ///
    /// ## Errors
    ///
    /// * [Error::StateLengthMismatch] - Returned when the number of DOFs differs.
    pub fn ensure_dof_count(&self, expected: usize) -> Result<(), Error> {
        if self.dof_count() != expected {
            return Err(Error::StateLengthMismatch {
                expected,
                actual: self.dof_count(),
            });
        }

        Ok(())
    }

    /// Creates a new [SkeletonState] instance
    ///
    /// ## Parameters
    ///
    /// * 'positions' - The generalized positions of the skeleton
    /// * 'velocities' - The generalized velocities of the skeleton
    ///
    /// ## Errors
    ///
    /// * [Error::StateLengthMismatch] - Returned when the velocities do not have the same
    ///   length as the positions.
    pub fn new(positions: DVector<f64>, velocities: DVector<f64>) -> Result<Self, Error> {
        if velocities.len() != positions.len() {
            return Err(Error::StateLengthMismatch {
                expected: positions.len(),
                actual: velocities.len(),
            });
        }

        Ok(Self {
            positions,
            velocities,
        })
    }

    /// Returns the generalized positions.
    pub fn positions(&self) -> &DVector<f64> {
        &self.positions
    }

    /// Returns the generalized velocities.
    pub fn velocities(&self) -> &DVector<f64> {
        &self.velocities
    }

    /// Creates a state with all positions and velocities set to zero.
    pub fn zeros(dof_count: usize) -> Self {
        Self {
            positions: DVector::zeros(dof_count),
            velocities: DVector::zeros(dof_count),
        }
    }
}
