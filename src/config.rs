//! Defines the settings of a mimic environment.

use std::time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    control::{action_decoder::DEFAULT_MAX_ACTION_MAGNITUDE, pd_controller::GainSchedule},
    number_space::NumberSpaceType,
    rotation::representation::RepresentationMode,
    Error,
};

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;

/// The proportional gain applied to every DOF when none is configured.
pub const DEFAULT_PROPORTIONAL_GAIN: f64 = 0.5;

/// The derivative gain applied to every DOF when none is configured.
pub const DEFAULT_DERIVATIVE_GAIN: f64 = 0.1;

/// The simulation timestep in seconds when none is configured.
pub const DEFAULT_TIMESTEP: f64 = 0.005;

/// Configuration of a single mimic environment.
///
/// Use the builder methods to change individual settings.
///
/// ```
/// use mimic_retargeting::config::MimicConfig;
/// use mimic_retargeting::rotation::representation::RepresentationMode;
///
/// let config = MimicConfig::default()
///     .with_action_mode(RepresentationMode::Quaternion)
///     .with_timestep(0.002);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MimicConfig {
    /// Encoding of the rotations in the observation vector.
    pub state_mode: RepresentationMode,

    /// Encoding of the rotations in the action vector.
    pub action_mode: RepresentationMode,

    /// Proportional gains of the PD controller.
    pub proportional_gains: GainSchedule,

    /// Derivative gains of the PD controller.
    pub derivative_gains: GainSchedule,

    /// Simulation timestep in seconds.
    pub dt: f64,

    /// Limit of every action component.
    pub max_action_magnitude: f64,

    /// Space in which the PD controller measures angle errors.
    pub error_space: NumberSpaceType,

    /// How long to wait for the simulator to report the state after a step.
    pub state_timeout: Duration,
}

impl Default for MimicConfig {
    fn default() -> Self {
        Self {
            state_mode: RepresentationMode::Euler,
            action_mode: RepresentationMode::Euler,
            proportional_gains: GainSchedule::Uniform(DEFAULT_PROPORTIONAL_GAIN),
            derivative_gains: GainSchedule::Uniform(DEFAULT_DERIVATIVE_GAIN),
            dt: DEFAULT_TIMESTEP,
            max_action_magnitude: DEFAULT_MAX_ACTION_MAGNITUDE,
            error_space: NumberSpaceType::LinearUnlimited,
            state_timeout: Duration::from_millis(1000),
        }
    }
}

impl MimicConfig {
    /// Validates the settings that do not depend on the skeleton.
    ///
    /// Per DOF gain lists are checked against the skeleton when the session is created.
    ///
    /// ## Errors
    ///
    /// * [Error::InvalidTimestep] - Returned when the timestep is not a positive finite
    ///   number.
    /// * [Error::InvalidActionMagnitude] - Returned when the action limit is not a positive
    ///   finite number.
    pub fn validate(&self) -> Result<(), Error> {
        if !self.dt.is_finite() || self.dt <= 0.0 {
            return Err(Error::InvalidTimestep { dt: self.dt });
        }

        if !self.max_action_magnitude.is_finite() || self.max_action_magnitude <= 0.0 {
            return Err(Error::InvalidActionMagnitude {
                magnitude: self.max_action_magnitude,
            });
        }

        Ok(())
    }

    /// Sets the encoding of the rotations in the action vector.
    pub fn with_action_mode(mut self, mode: RepresentationMode) -> Self {
        self.action_mode = mode;
        self
    }

    /// Sets the space in which angle errors are measured.
    pub fn with_error_space(mut self, error_space: NumberSpaceType) -> Self {
        self.error_space = error_space;
        self
    }

    /// Sets the PD gains.
    pub fn with_gains(mut self, proportional: GainSchedule, derivative: GainSchedule) -> Self {
        self.proportional_gains = proportional;
        self.derivative_gains = derivative;
        self
    }

    /// Sets the limit of every action component.
    pub fn with_max_action_magnitude(mut self, magnitude: f64) -> Self {
        self.max_action_magnitude = magnitude;
        self
    }

    /// Sets the encoding of the rotations in the observation vector.
    pub fn with_state_mode(mut self, mode: RepresentationMode) -> Self {
        self.state_mode = mode;
        self
    }

    /// Sets how long to wait for the simulator state after a step.
    pub fn with_state_timeout(mut self, timeout: Duration) -> Self {
        self.state_timeout = timeout;
        self
    }

    /// Sets the simulation timestep in seconds.
    pub fn with_timestep(mut self, dt: f64) -> Self {
        self.dt = dt;
        self
    }
}
