//! Ties the retargeting pipeline to a simulated skeleton.
//!
//! A [MimicSession] owns everything one environment instance needs: the DOF map, the
//! motion clip and its cursor, the PD controller, the action decoder, the observation
//! builder and the channels to the simulator. Sessions share nothing, so several can run
//! side by side on different threads.

extern crate nalgebra as na;

use std::collections::HashMap;

use crossbeam_channel::{Receiver, Sender};
use na::DVector;
use tracing::{debug, info};

use crate::{
    config::MimicConfig,
    control::{
        action_decoder::ActionDecoder,
        pd_controller::{PdController, PdGains},
    },
    motion::clip::{FrameCursor, MotionClip},
    retargeting::{
        frame_sync::sync_frame_into,
        state_vector::{SkeletonAngles, StateVectorBuilder},
    },
    simulation::{simulator_interface::SimulatedSkeleton, skeleton_state::SkeletonState},
    skeleton::{dof_map::SkeletonDofMap, joint_spec::AxisOrder},
    Error,
};

#[cfg(test)]
#[path = "session_tests.rs"]
mod session_tests;

/// A single imitation environment driving one simulated skeleton.
pub struct MimicSession {
    config: MimicConfig,
    clip: MotionClip,
    cursor: FrameCursor,
    dof_map: SkeletonDofMap,
    controller: PdController,
    decoder: ActionDecoder,
    observer: StateVectorBuilder,

    /// The positions most recently derived from the motion clip.
    reference_positions: DVector<f64>,

    /// The latest state reported by the simulator.
    state: SkeletonState,

    /// The positions of the state before the latest one.
    previous_positions: DVector<f64>,

    position_sender: Sender<DVector<f64>>,
    torque_sender: Sender<DVector<f64>>,
    state_receiver: Receiver<SkeletonState>,
}

impl MimicSession {
    /// Returns the length of the action vectors [MimicSession::step()] accepts.
    pub fn action_dim(&self) -> usize {
        self.decoder.action_dim(&self.dof_map)
    }

    /// Returns the action decoder.
    pub fn action_decoder(&self) -> &ActionDecoder {
        &self.decoder
    }

    /// Returns the configuration of the session.
    pub fn config(&self) -> &MimicConfig {
        &self.config
    }

    /// Returns the mapping from joints to simulator DOFs.
    pub fn dof_map(&self) -> &SkeletonDofMap {
        &self.dof_map
    }

    /// Returns the current and the previous reference frame.
    pub fn frame_cursor(&self) -> &FrameCursor {
        &self.cursor
    }

    /// Creates a new [MimicSession].
    ///
    /// The DOF map is built from the first frame of the clip and the DOF names reported by
    /// the simulator.
    ///
    /// ## Parameters
    ///
    /// * 'config' - The settings of the environment
    /// * 'clip' - The reference motion
    /// * 'axis_orders' - The axis order of every non-root joint in the clip
    /// * 'simulator' - The simulator hosting the skeleton
    ///
    /// ## Errors
    ///
    /// * Any error returned by [MimicConfig::validate()].
    /// * Any error returned by [SkeletonDofMap::from_sample_frame()].
    /// * [Error::GainLengthMismatch] - Returned when a per DOF gain list does not match the
    ///   simulator DOF count.
    /// * [Error::StateLengthMismatch] - Returned when the initial state of the simulator
    ///   does not match its DOF names.
    /// * Any error returned by the simulator while handing out its channels.
    pub fn new<S: SimulatedSkeleton + ?Sized>(
        config: MimicConfig,
        clip: MotionClip,
        axis_orders: &HashMap<String, AxisOrder>,
        simulator: &S,
    ) -> Result<Self, Error> {
        config.validate()?;

        let dof_names = simulator.dof_names();
        let dof_map = SkeletonDofMap::from_sample_frame(&dof_names, clip.frame(0), axis_orders)?;
        let total_dofs = dof_map.total_dofs();

        let gains = PdGains::new(
            &config.proportional_gains,
            &config.derivative_gains,
            total_dofs,
        )?;
        let controller = PdController::new(gains, config.dt, config.error_space)?;
        let decoder = ActionDecoder::new(config.action_mode, config.max_action_magnitude)?;
        let observer = StateVectorBuilder::new(config.state_mode);

        let state = simulator.initial_state();
        state.ensure_dof_count(total_dofs)?;

        let session = Self {
            clip,
            cursor: FrameCursor::new(),
            reference_positions: DVector::zeros(total_dofs),
            previous_positions: state.positions().clone(),
            state,
            position_sender: simulator.position_sender()?,
            torque_sender: simulator.torque_sender()?,
            state_receiver: simulator.state_receiver()?,
            config,
            dof_map,
            controller,
            decoder,
            observer,
        };

        info!(
            joints = session.dof_map.joint_count(),
            dofs = total_dofs,
            frames = session.clip.len(),
            observation_dim = session.observation_dim(),
            action_dim = session.action_dim(),
            "Created mimic session"
        );

        Ok(session)
    }

    /// Returns the observation vector for the latest simulator state.
    ///
    /// ## Errors
    ///
    /// See [StateVectorBuilder::build()].
    pub fn observation(&self) -> Result<DVector<f64>, Error> {
        self.observer.build(&self.dof_map, &self.state)
    }

    /// Returns the length of the observation vectors.
    pub fn observation_dim(&self) -> usize {
        self.observer.observation_dim(&self.dof_map)
    }

    #[cfg_attr(test, mutants::skip)] // Cannot easily check mutations as this blocks on the simulator thread
    fn receive_state(&self) -> Result<SkeletonState, Error> {
        self.state_receiver
            .recv_timeout(self.config.state_timeout)
            .map_err(|_| Error::FailedToReceiveSkeletonState)
    }

    /// Returns the positions most recently derived from the motion clip.
    pub fn reference_positions(&self) -> &DVector<f64> {
        &self.reference_positions
    }

    /// Returns the latest state reported by the simulator.
    pub fn state(&self) -> &SkeletonState {
        &self.state
    }

    /// Applies a policy action for one simulation step.
    ///
    /// The action is decoded into joint targets, the PD controller computes the torques
    /// from the latest and the previous simulator state, and the torques are sent to the
    /// simulator. The call then blocks until the simulator reports the new state, or the
    /// configured timeout expires.
    ///
    /// ## Parameters
    ///
    /// * 'raw_action' - The action vector produced by the policy
    ///
    /// ## Errors
    ///
    /// * Any error returned by [ActionDecoder::decode()] or [PdController::torques()].
    /// * [Error::FailedToSendTorques] - Returned when the simulator is no longer listening.
    /// * [Error::FailedToReceiveSkeletonState] - Returned when no state arrives in time.
    /// * [Error::StateLengthMismatch] - Returned when the new state has the wrong number of
    ///   DOFs.
    pub fn step(&mut self, raw_action: &[f64]) -> Result<DVector<f64>, Error> {
        let targets = self.decoder.decode_to_map(&self.dof_map, raw_action)?;
        let current = SkeletonAngles::from_dof_vector(&self.dof_map, self.state.positions())?
            .to_joint_map(&self.dof_map);
        let past = SkeletonAngles::from_dof_vector(&self.dof_map, &self.previous_positions)?
            .to_joint_map(&self.dof_map);

        let torques = self
            .controller
            .torques(&self.dof_map, &targets, &current, &past)?;
        debug!(
            peak_torque = torques.amax(),
            "Sending torques to the simulator"
        );

        self.torque_sender
            .send(torques)
            .map_err(|_| Error::FailedToSendTorques)?;

        let next = self.receive_state()?;
        next.ensure_dof_count(self.dof_map.total_dofs())?;

        let previous = std::mem::replace(&mut self.state, next);
        self.previous_positions = previous.positions().clone();

        self.observation()
    }

    /// Moves the reference to the given frame of the clip and sets the simulated skeleton
    /// to it.
    ///
    /// The frame index wraps around at the end of the clip. Once the simulator has the
    /// new positions they become the latest state, at rest, and the previous state as
    /// well. The next [observation()](Self::observation) and [step()](Self::step) then
    /// start from the synced pose without reading the jump as a velocity.
    ///
    /// ## Errors
    ///
    /// * Any error returned by [sync_frame_into()].
    /// * [Error::FailedToSendPositions] - Returned when the simulator is no longer
    ///   listening.
    pub fn sync_reference(&mut self, frame_index: usize) -> Result<(), Error> {
        self.cursor.seek(frame_index, self.clip.len());
        let frame = self.clip.frame(self.cursor.current());
        sync_frame_into(&self.dof_map, frame, &mut self.reference_positions)?;

        debug!(
            frame = self.cursor.current(),
            past_frame = self.cursor.past(),
            "Synced reference frame"
        );

        self.position_sender
            .send(self.reference_positions.clone())
            .map_err(|_| Error::FailedToSendPositions)?;

        let velocities = DVector::zeros(self.reference_positions.len());
        self.state = SkeletonState::new(self.reference_positions.clone(), velocities)?;
        self.previous_positions = self.reference_positions.clone();

        Ok(())
    }
}
