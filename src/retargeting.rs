/// Provides the conversion of motion capture frames into simulator position vectors
pub mod frame_sync;

/// Provides the flattening of the skeleton state into an observation vector
pub mod state_vector;
