/// Provides the motion capture frames, the motion clip and the frame cursor
pub mod clip;
