//! Converts motion capture frames into simulator position vectors.
//!
//! A motion capture frame stores the root translation, the root rotation as sequential
//! Euler degrees and, for every other joint, 1 to 3 sequential Euler degrees in the joint's
//! axis order. The simulator wants the root rotation in DOFs [0, 3), the root translation
//! in DOFs [3, 6) and every joint's rotating-frame Euler radians in the joint's DOF window.

extern crate nalgebra as na;

use na::DVector;

use crate::{
    motion::clip::MocapFrame,
    rotation::convention::SequentialDegrees,
    skeleton::dof_map::{JointWindow, SkeletonDofMap, ROOT_ROTATION_DOFS, ROOT_TRANSLATION_DOFS},
    Error,
};

#[cfg(test)]
#[path = "frame_sync_tests.rs"]
mod frame_sync_tests;

/// Converts a motion capture frame into a new simulator position vector.
///
/// DOFs that no entry of the frame writes to are zero.
///
/// ## Parameters
///
/// * 'dof_map' - The mapping from joints to simulator DOFs
/// * 'frame' - The frame to convert
///
/// ## Errors
///
/// See [sync_frame_into()].
pub fn sync_frame(dof_map: &SkeletonDofMap, frame: &MocapFrame) -> Result<DVector<f64>, Error> {
    let mut positions = DVector::zeros(dof_map.total_dofs());
    sync_frame_into(dof_map, frame, &mut positions)?;
    Ok(positions)
}

/// Writes a motion capture frame into an existing simulator position vector.
///
/// Only the root DOFs and the windows of the joints present in the frame are written, all
/// other DOFs keep their value. The frame is fully validated before anything is written,
/// so on error `positions` is unchanged.
///
/// ## Parameters
///
/// * 'dof_map' - The mapping from joints to simulator DOFs
/// * 'frame' - The frame to convert
/// * 'positions' - The position vector to update, one element per simulator DOF
///
/// ## Errors
///
/// * [Error::StateLengthMismatch] - Returned when `positions` does not have one element per
///   simulator DOF.
/// * [Error::MissingRootEntry] - Returned when the frame does not start with the root.
/// * [Error::InvalidRootEntry] - Returned when the root entry does not hold 6 values.
/// * [Error::UnknownJoint] - Returned when a joint in the frame is not part of the map.
/// * [Error::JointAngleCountMismatch] - Returned when a joint carries the wrong number of
///   values for its axis order.
pub fn sync_frame_into(
    dof_map: &SkeletonDofMap,
    frame: &MocapFrame,
    positions: &mut DVector<f64>,
) -> Result<(), Error> {
    if positions.len() != dof_map.total_dofs() {
        return Err(Error::StateLengthMismatch {
            expected: dof_map.total_dofs(),
            actual: positions.len(),
        });
    }

    let root = frame.root()?;
    let joints = frame
        .joint_entries()
        .map(|(name, values)| {
            let joint = dof_map.joint(name)?;
            if values.len() != joint.spec().dof_count() {
                return Err(Error::JointAngleCountMismatch {
                    joint: name.to_string(),
                    expected: joint.spec().dof_count(),
                    actual: values.len(),
                });
            }

            Ok((joint, values))
        })
        .collect::<Result<Vec<(&JointWindow, &[f64])>, Error>>()?;

    for (index, value) in ROOT_TRANSLATION_DOFS.zip(root.translation().iter()) {
        positions[index] = *value;
    }

    let root_rotation = root.rotation().to_rotating_radians();
    for (index, value) in ROOT_ROTATION_DOFS.zip(root_rotation.as_vector().iter()) {
        positions[index] = *value;
    }

    for (joint, values) in joints {
        let expanded = SequentialDegrees::from_vector(joint.order().expand(values)?);
        let rotating = expanded.to_rotating_radians();
        let compressed = joint.order().compress(rotating.as_vector());
        for (index, value) in joint.window().range().zip(compressed) {
            positions[index] = value;
        }
    }

    Ok(())
}
