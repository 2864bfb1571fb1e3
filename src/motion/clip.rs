//! Defines the in-memory form of a parsed AMC motion clip.

extern crate nalgebra as na;

use na::Vector3;

use crate::{
    rotation::convention::SequentialDegrees,
    skeleton::dof_map::{ROOT_DOF_COUNT, ROOT_JOINT_NAME},
    Error,
};

#[cfg(test)]
#[path = "clip_tests.rs"]
mod clip_tests;

/// A single frame of motion capture data.
///
/// The frame is an ordered list of (joint name, values) pairs in file order. The first
/// entry is the root, holding the translation followed by the sequential rotation in
/// degrees. Every other entry holds 1 to 3 angles in degrees, in the joint's axis order.
#[derive(Clone, Debug, PartialEq)]
pub struct MocapFrame {
    entries: Vec<(String, Vec<f64>)>,
}

impl MocapFrame {
    /// Returns all entries, root included, in file order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &[f64])> {
        self.entries
            .iter()
            .map(|(name, values)| (name.as_str(), values.as_slice()))
    }

    /// Returns the number of entries, root included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns a value indicating whether the frame has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the non-root entries in file order.
    pub fn joint_entries(&self) -> impl Iterator<Item = (&str, &[f64])> {
        self.entries().filter(|(name, _)| *name != ROOT_JOINT_NAME)
    }

    /// Creates a new [MocapFrame] from (joint name, values) pairs in file order.
    pub fn new(entries: Vec<(String, Vec<f64>)>) -> Self {
        Self { entries }
    }

    /// Returns the root entry of the frame.
    ///
    /// ## Errors
    ///
    /// * [Error::MissingRootEntry] - Returned when the frame is empty or its first entry is
    ///   not the root.
    /// * [Error::InvalidRootEntry] - Returned when the root entry does not hold exactly 6
    ///   values.
    pub fn root(&self) -> Result<RootPose, Error> {
        let (name, values) = self.entries.first().ok_or(Error::MissingRootEntry)?;
        if name != ROOT_JOINT_NAME {
            return Err(Error::MissingRootEntry);
        }

        if values.len() != ROOT_DOF_COUNT {
            return Err(Error::InvalidRootEntry {
                length: values.len(),
            });
        }

        Ok(RootPose {
            translation: Vector3::new(values[0], values[1], values[2]),
            rotation: SequentialDegrees::new(values[3], values[4], values[5]),
        })
    }
}

/// The root entry of a motion capture frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RootPose {
    translation: Vector3<f64>,
    rotation: SequentialDegrees,
}

impl RootPose {
    /// Returns the sequential rotation of the root in degrees.
    pub fn rotation(&self) -> &SequentialDegrees {
        &self.rotation
    }

    /// Returns the translation of the root.
    pub fn translation(&self) -> &Vector3<f64> {
        &self.translation
    }
}

/// An immutable, non-empty sequence of motion capture frames.
///
/// Frame indices wrap around, so the clip can be played back in a loop.
#[derive(Clone, Debug, PartialEq)]
pub struct MotionClip {
    frames: Vec<MocapFrame>,
}

impl MotionClip {
    /// Returns the frame at the given index, wrapping around at the end of the clip.
    pub fn frame(&self, index: usize) -> &MocapFrame {
        &self.frames[self.wrap(index)]
    }

    /// Returns the number of frames in the clip.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Returns a value indicating whether the clip holds no frames. This is always false
    /// because [MotionClip::new()] rejects an empty frame list.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Creates a new [MotionClip].
    ///
    /// ## Errors
    ///
    /// * [Error::EmptyMotionClip] - Returned when there are no frames.
    pub fn new(frames: Vec<MocapFrame>) -> Result<Self, Error> {
        if frames.is_empty() {
            return Err(Error::EmptyMotionClip);
        }

        Ok(Self { frames })
    }

    /// Returns the index of the frame that `index` refers to.
    pub fn wrap(&self, index: usize) -> usize {
        index % self.frames.len()
    }
}

/// Tracks the current and the previous reference frame of a playing clip.
///
/// Stepping to the next frame (wrapping around at the end of the clip) remembers the frame
/// that was current before. Jumping to any other frame resets the previous frame to the new
/// frame, so a jump never looks like motion between two unrelated frames.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct FrameCursor {
    current: usize,
    past: usize,
}

impl FrameCursor {
    /// Returns the current frame index.
    pub fn current(&self) -> usize {
        self.current
    }

    /// Creates a new cursor at frame 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the previous frame index.
    pub fn past(&self) -> usize {
        self.past
    }

    /// Moves the cursor to the given frame.
    ///
    /// ## Parameters
    ///
    /// * 'frame_index' - The new frame. Wrapped into the clip length.
    /// * 'clip_length' - The number of frames in the clip; must not be zero.
    pub fn seek(&mut self, frame_index: usize, clip_length: usize) {
        let next = frame_index % clip_length;
        if next == (self.current + 1) % clip_length {
            self.past = self.current;
        } else {
            self.past = next;
        }

        self.current = next;
    }
}
