//! Defines the mapping from motion capture joints to the DOFs of the simulated skeleton.
//!
//! The simulator exposes its skeleton as a flat vector of DOFs, each with a name such as
//! `lfemur_x` or `lfemur_y`. A motion capture joint named `lfemur` with axis order `"xyz"`
//! owns the three contiguous DOFs starting at the first DOF whose name starts with
//! `lfemur`. The root is special: it always owns DOFs [0, 6), with the rotation in
//! [0, 3) and the translation in [3, 6).

use std::{collections::HashMap, fmt::Display, ops::Range};

use tracing::{debug, warn};

use crate::{
    motion::clip::MocapFrame,
    skeleton::joint_spec::{AxisOrder, JointSpec},
    Error,
};

#[cfg(test)]
#[path = "dof_map_tests.rs"]
mod dof_map_tests;

/// The name of the root joint in motion capture data.
pub const ROOT_JOINT_NAME: &str = "root";

/// The number of simulator DOFs owned by the root joint.
pub const ROOT_DOF_COUNT: usize = 6;

/// The simulator DOFs holding the root rotation, in rotating-frame Euler radians.
pub const ROOT_ROTATION_DOFS: Range<usize> = 0..3;

/// The simulator DOFs holding the root translation.
pub const ROOT_TRANSLATION_DOFS: Range<usize> = 3..6;

/// A contiguous, half-open range of simulator DOF indices.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct DofWindow {
    /// The index of the first DOF in the window.
    start: usize,

    /// The number of DOFs in the window.
    length: usize,
}

impl DofWindow {
    /// Returns the index one past the last DOF in the window.
    pub fn end(&self) -> usize {
        self.start + self.length
    }

    /// Returns the number of DOFs in the window.
    pub fn length(&self) -> usize {
        self.length
    }

    /// Creates a new [DofWindow] instance.
    ///
    /// ## Parameters
    ///
    /// * 'start' - The index of the first DOF in the window
    /// * 'length' - The number of DOFs in the window
    pub fn new(start: usize, length: usize) -> Self {
        Self { start, length }
    }

    /// Returns a value indicating whether the two windows share at least one DOF.
    pub fn overlaps(&self, other: &DofWindow) -> bool {
        self.start < other.end() && other.start < self.end()
    }

    /// Returns the window as an index range.
    pub fn range(&self) -> Range<usize> {
        self.start..self.end()
    }

    /// Returns the index of the first DOF in the window.
    pub fn start(&self) -> usize {
        self.start
    }
}

impl Display for DofWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {})", self.start, self.end())
    }
}

/// A joint together with the DOF window it occupies in the simulator.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct JointWindow {
    spec: JointSpec,
    window: DofWindow,
}

impl JointWindow {
    /// Returns the name of the joint.
    pub fn name(&self) -> &str {
        self.spec.name()
    }

    /// Returns the axis order of the joint.
    pub fn order(&self) -> &AxisOrder {
        self.spec.order()
    }

    /// Returns the joint description.
    pub fn spec(&self) -> &JointSpec {
        &self.spec
    }

    /// Returns the simulator DOFs the joint occupies.
    pub fn window(&self) -> &DofWindow {
        &self.window
    }
}

/// The immutable mapping from motion capture joints to simulator DOF windows.
///
/// Joints are kept in the order in which they were provided, which is the order in which
/// they appear in the motion capture frames. The root joint is not stored; its DOFs are
/// fixed to [0, 6).
#[derive(Clone, Debug, PartialEq)]
pub struct SkeletonDofMap {
    /// The non-root joints in motion capture order.
    joints: Vec<JointWindow>,

    /// Maps a joint name to its position in `joints`.
    index_of: HashMap<String, usize>,

    /// The total number of DOFs of the simulated skeleton.
    total_dofs: usize,
}

impl SkeletonDofMap {
    /// Returns the joint with the given name, if it is part of the map.
    pub fn get(&self, name: &str) -> Option<&JointWindow> {
        self.index_of.get(name).map(|i| &self.joints[*i])
    }

    /// Creates a map from the joints found in a sample motion capture frame.
    ///
    /// ## Parameters
    ///
    /// * 'dof_names' - The names of the simulator DOFs, in DOF order
    /// * 'frame' - A sample frame; its joint names and order define the map
    /// * 'axis_orders' - The axis order of every non-root joint, as given by the ASF skeleton
    ///
    /// ## Errors
    ///
    /// * [Error::MissingAxisOrder] - Returned when a joint in the frame has no axis order.
    /// * Any error returned by [SkeletonDofMap::new()].
    pub fn from_sample_frame<S: AsRef<str>>(
        dof_names: &[S],
        frame: &MocapFrame,
        axis_orders: &HashMap<String, AxisOrder>,
    ) -> Result<Self, Error> {
        let joints = frame
            .joint_entries()
            .map(|(name, _)| match axis_orders.get(name) {
                Some(order) => Ok(JointSpec::new(name.to_string(), order.clone())),
                None => Err(Error::MissingAxisOrder {
                    joint: name.to_string(),
                }),
            })
            .collect::<Result<Vec<_>, Error>>()?;

        Self::new(dof_names, &joints)
    }

    /// Returns a value indicating whether the root and the joints cover every simulator DOF.
    pub fn is_fully_covered(&self) -> bool {
        self.unmapped_dofs().is_empty()
    }

    /// Returns the number of non-root joints.
    pub fn joint_count(&self) -> usize {
        self.joints.len()
    }

    /// Returns the non-root joints in motion capture order.
    pub fn joints(&self) -> &[JointWindow] {
        &self.joints
    }

    /// Returns the joint with the given name.
    ///
    /// ## Errors
    ///
    /// * [Error::UnknownJoint] - Returned when the joint is not part of the map.
    pub fn joint(&self, name: &str) -> Result<&JointWindow, Error> {
        self.get(name).ok_or_else(|| Error::UnknownJoint {
            joint: name.to_string(),
        })
    }

    /// Creates a new [SkeletonDofMap].
    ///
    /// Every joint is assigned the window that starts at the first simulator DOF whose name
    /// starts with the joint name and that is as long as the joint's DOF count. A joint
    /// named [ROOT_JOINT_NAME] is skipped.
    ///
    /// ## Parameters
    ///
    /// * 'dof_names' - The names of the simulator DOFs, in DOF order
    /// * 'joints' - The motion capture joints, in frame order
    ///
    /// ## Errors
    ///
    /// * [Error::TooFewSimulatorDofs] - Returned when the simulator has fewer than 6 DOFs.
    /// * [Error::MissingSimulatorDof] - Returned when no DOF name starts with a joint name.
    /// * [Error::DofWindowOutOfRange] - Returned when a window runs past the last DOF.
    /// * [Error::OverlappingDofWindows] - Returned when a window overlaps the root window or
    ///   the window of another joint.
    pub fn new<S: AsRef<str>>(dof_names: &[S], joints: &[JointSpec]) -> Result<Self, Error> {
        let total_dofs = dof_names.len();
        if total_dofs < ROOT_DOF_COUNT {
            return Err(Error::TooFewSimulatorDofs { total: total_dofs });
        }

        let root_window = DofWindow::new(0, ROOT_DOF_COUNT);
        let mut windows: Vec<JointWindow> = Vec::with_capacity(joints.len());
        let mut index_of = HashMap::with_capacity(joints.len());
        for spec in joints.iter().filter(|j| j.name() != ROOT_JOINT_NAME) {
            let start = dof_names
                .iter()
                .position(|dof| dof.as_ref().starts_with(spec.name()))
                .ok_or_else(|| Error::MissingSimulatorDof {
                    joint: spec.name().to_string(),
                })?;

            let window = DofWindow::new(start, spec.dof_count());
            if window.end() > total_dofs {
                return Err(Error::DofWindowOutOfRange {
                    joint: spec.name().to_string(),
                    start,
                    length: window.length(),
                    total: total_dofs,
                });
            }

            if window.overlaps(&root_window) {
                return Err(Error::OverlappingDofWindows {
                    first: ROOT_JOINT_NAME.to_string(),
                    second: spec.name().to_string(),
                });
            }

            if let Some(other) = windows.iter().find(|w| w.window.overlaps(&window)) {
                return Err(Error::OverlappingDofWindows {
                    first: other.name().to_string(),
                    second: spec.name().to_string(),
                });
            }

            debug!(
                joint = spec.name(),
                window = %window,
                order = %spec.order(),
                "Mapped joint to simulator DOFs"
            );

            index_of.insert(spec.name().to_string(), windows.len());
            windows.push(JointWindow {
                spec: spec.clone(),
                window,
            });
        }

        let result = Self {
            joints: windows,
            index_of,
            total_dofs,
        };

        let unmapped = result.unmapped_dofs();
        if !unmapped.is_empty() {
            warn!(
                unmapped = ?unmapped,
                "Simulator DOFs without a motion capture joint will not be actuated"
            );
        }

        Ok(result)
    }

    /// Returns the total number of DOFs of the simulated skeleton.
    pub fn total_dofs(&self) -> usize {
        self.total_dofs
    }

    /// Returns the simulator DOF indices that belong neither to the root nor to a joint.
    pub fn unmapped_dofs(&self) -> Vec<usize> {
        let mut covered = vec![false; self.total_dofs];
        covered[..ROOT_DOF_COUNT].fill(true);
        for joint in &self.joints {
            covered[joint.window.range()].fill(true);
        }

        covered
            .iter()
            .enumerate()
            .filter(|(_, c)| !**c)
            .map(|(i, _)| i)
            .collect()
    }
}
