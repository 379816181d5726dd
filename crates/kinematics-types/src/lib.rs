//! Shared types for the kinematics solver loader.
//!
//! The model module holds the articulated-structure data the loader
//! navigates (links, joint groups, the group handle arena); the solver
//! module holds the contract every pluggable solver implementation
//! satisfies, along with the process-wide defaults.

pub mod model;
pub mod solver;

pub use model::{GroupId, JointGroup, Link, RobotModel, RobotModelBuilder};
pub use solver::{
	KinematicsSolver, SolverError, SolverRef, DEFAULT_ROBOT_DESCRIPTION,
	DEFAULT_SEARCH_RESOLUTION, DEFAULT_SOLVER_TIMEOUT,
};
