#![warn(missing_docs)]

//! Motion retargeting and PD tracking for DeepMimic style imitation tasks.
//!
//! Converts motion capture frames (ASF/AMC, sequential Euler angles in degrees, per joint
//! axis orders) into the degree-of-freedom layout of a simulated skeleton (rotating-frame
//! Euler angles in radians) and computes the proportional-derivative torques that track
//! those targets. The physics engine, the policy and the mocap file parsers are external
//! collaborators.

use thiserror::Error;

/// Defines the crate configuration
pub mod config;

/// Provides the proportional-derivative controller and the policy action decoder
pub mod control;

/// Provides the motion clip and the frame cursor
pub mod motion;

/// Defines the spaces in which angle tracking errors are measured
pub mod number_space;

/// Provides the frame synchronizer and the state vector builder
pub mod retargeting;

/// Provides the rotation convention conversions and the angle representations
pub mod rotation;

/// Provides the mimic session that ties the retargeting pipeline to a simulator
pub mod session;

/// Defines the interface to the external simulator
pub mod simulation;

/// Provides the joint angle codec and the skeleton DOF map
pub mod skeleton;

/// Describes the class of failure an [Error] belongs to.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    /// The error was raised while setting up an environment. It is fatal and should abort
    /// the setup.
    Configuration,

    /// The error was raised because a frame, a state or an action had an unexpected shape.
    /// Retrying with the same input is futile.
    DataShape,

    /// The error was raised while talking to the simulator.
    Simulator,
}

/// Defines the different errors for the mimic retargeting crate.
#[derive(Debug, Error, PartialEq)]
#[non_exhaustive]
pub enum Error {
    /// Failed to receive the state of the simulated skeleton.
    #[error("Failed to receive the state of the simulated skeleton.")]
    FailedToReceiveSkeletonState,

    /// Failed to send a position vector to the simulated skeleton.
    #[error("Failed to send a position vector to the simulated skeleton.")]
    FailedToSendPositions,

    /// Failed to send a torque vector to the simulated skeleton.
    #[error("Failed to send a torque vector to the simulated skeleton.")]
    FailedToSendTorques,

    /// The number of angles does not match the number of axes in the axis order.
    #[error("Expected {expected} angle values for the axis order but got {actual}.")]
    AngleCountMismatch {
        /// The number of axes in the axis order
        expected: usize,
        /// The number of angle values that were provided
        actual: usize,
    },

    /// The policy action vector has the wrong length.
    #[error("Expected an action vector of length {expected} but got {actual}.")]
    ActionLengthMismatch {
        /// The action dimension of the environment
        expected: usize,
        /// The length of the provided action
        actual: usize,
    },

    /// Two joints claim overlapping DOF windows.
    #[error("The DOF windows of joints {first} and {second} overlap.")]
    OverlappingDofWindows {
        /// The joint that claimed the DOFs first
        first: String,
        /// The joint whose window overlaps
        second: String,
    },

    /// A joint DOF window runs past the end of the simulator DOF vector.
    #[error("The DOF window [{start}, {start} + {length}) of joint {joint} exceeds the {total} simulator DOFs.")]
    DofWindowOutOfRange {
        /// The name of the joint
        joint: String,
        /// The first DOF index of the window
        start: usize,
        /// The number of DOFs in the window
        length: usize,
        /// The total number of simulator DOFs
        total: usize,
    },

    /// The motion clip has no frames.
    #[error("The motion clip does not contain any frames.")]
    EmptyMotionClip,

    /// The per-DOF gain vector has the wrong length.
    #[error("Expected {expected} gain values but got {actual}.")]
    GainLengthMismatch {
        /// The number of simulator DOFs
        expected: usize,
        /// The number of gain values that were provided
        actual: usize,
    },

    /// The maximum action magnitude is not a positive finite number.
    #[error("The maximum action magnitude {magnitude} must be positive and finite.")]
    InvalidActionMagnitude {
        /// The configured magnitude
        magnitude: f64,
    },

    /// The axis order string is not a non-repeating sequence of 1 to 3 letters from {x, y, z}.
    #[error("The axis order '{order}' is invalid.")]
    InvalidAxisOrder {
        /// The offending order string
        order: String,
    },

    /// The root entry of a mocap frame does not hold 3 translation and 3 rotation values.
    #[error("The root entry of the mocap frame has {length} values, expected 6.")]
    InvalidRootEntry {
        /// The number of values in the root entry
        length: usize,
    },

    /// The simulation timestep is not strictly positive.
    #[error("The simulation timestep {dt} must be positive and finite.")]
    InvalidTimestep {
        /// The configured timestep in seconds
        dt: f64,
    },

    /// A joint in the mocap data has no axis order.
    #[error("No axis order is known for joint {joint}.")]
    MissingAxisOrder {
        /// The name of the joint
        joint: String,
    },

    /// The mocap frame is empty or does not start with the root entry.
    #[error("The mocap frame does not start with the root entry.")]
    MissingRootEntry,

    /// No simulator DOF name starts with the joint name.
    #[error("No simulator DOF name starts with joint name {joint}.")]
    MissingSimulatorDof {
        /// The name of the joint
        joint: String,
    },

    /// A joint in a frame carries the wrong number of values for its axis order.
    #[error("Joint {joint} expects {expected} values but the frame holds {actual}.")]
    JointAngleCountMismatch {
        /// The name of the joint
        joint: String,
        /// The number of DOFs of the joint
        expected: usize,
        /// The number of values in the frame
        actual: usize,
    },

    /// A vector read from or written to the simulator has the wrong length.
    #[error("Expected a vector of {expected} DOF values but got {actual}.")]
    StateLengthMismatch {
        /// The total number of simulator DOFs
        expected: usize,
        /// The length of the provided vector
        actual: usize,
    },

    /// The simulator has fewer DOFs than the six root DOFs.
    #[error("The simulator skeleton has {total} DOFs but the root alone needs 6.")]
    TooFewSimulatorDofs {
        /// The total number of simulator DOFs
        total: usize,
    },

    /// A joint is not part of the DOF map, or is missing from a joint angle map.
    #[error("Joint {joint} is unknown.")]
    UnknownJoint {
        /// The name of the joint
        joint: String,
    },
}

impl Error {
    /// Returns the class of failure this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::FailedToReceiveSkeletonState
            | Error::FailedToSendPositions
            | Error::FailedToSendTorques => ErrorKind::Simulator,

            Error::AngleCountMismatch { .. }
            | Error::OverlappingDofWindows { .. }
            | Error::DofWindowOutOfRange { .. }
            | Error::EmptyMotionClip
            | Error::GainLengthMismatch { .. }
            | Error::InvalidActionMagnitude { .. }
            | Error::InvalidAxisOrder { .. }
            | Error::InvalidTimestep { .. }
            | Error::MissingAxisOrder { .. }
            | Error::MissingSimulatorDof { .. }
            | Error::TooFewSimulatorDofs { .. } => ErrorKind::Configuration,

            Error::ActionLengthMismatch { .. }
            | Error::InvalidRootEntry { .. }
            | Error::MissingRootEntry
            | Error::JointAngleCountMismatch { .. }
            | Error::StateLengthMismatch { .. }
            | Error::UnknownJoint { .. } => ErrorKind::DataShape,
        }
    }
}
