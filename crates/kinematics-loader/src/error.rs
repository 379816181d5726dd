//! Allocation outcome taxonomy. These are values, not faults: a group
//! without a usable solver is a valid steady state.

use kinematics_types::GroupId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AllocationError {
	/// The plugin registry could not be constructed; the whole
	/// subsystem is disabled and every allocation fails fast.
	#[error("kinematics plugin registry is unavailable")]
	RegistryUnavailable,

	/// The handle does not belong to the bound model.
	#[error("unknown group handle {0:?}")]
	UnknownGroup(GroupId),

	/// The group has no links to anchor a solver on.
	#[error("group '{0}' has no links")]
	DegenerateGroup(String),

	/// No candidate list is configured for the group. A normal,
	/// non-fatal outcome: the group simply has no solver.
	#[error("no kinematics solver configured for group '{0}'")]
	NotConfigured(String),

	/// Every configured candidate failed to load or initialize.
	#[error("no usable kinematics solver for group '{group}' ({attempts} candidate(s) tried)")]
	Exhausted { group: String, attempts: usize },
}

impl AllocationError {
	/// Whether this outcome means "no solver for this group" rather
	/// than a fault worth surfacing loudly.
	pub fn is_benign(&self) -> bool {
		matches!(self, Self::NotConfigured(_))
	}
}
