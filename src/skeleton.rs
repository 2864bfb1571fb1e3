/// Provides the axis orders of joints and the joint angle codec
pub mod joint_spec;

/// Provides the mapping from joint names to simulator DOF windows
pub mod dof_map;
