/// Provides the unit and convention tagged angle types and the conversions between them
pub mod convention;

/// Provides the Euler, quaternion and axis-angle encodings of joint rotations
pub mod representation;
