/// Provides the structure that describes the state of the simulated skeleton
pub mod skeleton_state;

/// Defines the interface for the external simulator
pub mod simulator_interface;
