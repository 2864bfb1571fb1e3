/// Provides the proportional-derivative torque controller
pub mod pd_controller;

/// Provides the decoding of policy actions into joint targets
pub mod action_decoder;
