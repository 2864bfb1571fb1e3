//! Defines the interface for the external simulator

extern crate nalgebra as na;

use crossbeam_channel::{Receiver, Sender};
use na::DVector;

use crate::Error;

use super::skeleton_state::SkeletonState;

/// Defines the interface for a physics simulator that hosts an articulated skeleton.
///
/// The retargeting pipeline never calls into the simulator directly. It sends position
/// and torque vectors, and receives [SkeletonState] updates, through channels. The
/// simulator owns its own thread and does not need to be thread safe itself.
pub trait SimulatedSkeleton {
    /// Returns the names of the skeleton DOFs, in DOF order.
    ///
    /// The first six DOFs belong to the root.
    fn dof_names(&self) -> Vec<String>;

    /// Returns the state of the skeleton before the first step.
    fn initial_state(&self) -> SkeletonState;

    /// Returns the [Sender] that sets the generalized positions of the skeleton
    /// directly, bypassing the dynamics.
    fn position_sender(&self) -> Result<Sender<DVector<f64>>, Error>;

    /// Returns the [Receiver] that delivers the state of the skeleton after every
    /// simulation step.
    fn state_receiver(&self) -> Result<Receiver<SkeletonState>, Error>;

    /// Returns the [Sender] that applies a torque vector and advances the simulation by
    /// one step.
    fn torque_sender(&self) -> Result<Sender<DVector<f64>>, Error>;
}
