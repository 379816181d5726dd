//! The contract every pluggable kinematics solver satisfies.

use crate::model::RobotModel;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Search resolution used for candidates the configuration does not
/// cover explicitly.
pub const DEFAULT_SEARCH_RESOLUTION: f64 = 0.1;

/// Intrinsic solver timeout of a group, in seconds.
pub const DEFAULT_SOLVER_TIMEOUT: f64 = 5.0;

/// Identifier used for the legacy initialization protocol when none is
/// configured.
pub const DEFAULT_ROBOT_DESCRIPTION: &str = "robot_description";

#[derive(Debug, Error)]
pub enum SolverError {
	#[error("initialization failed: {0}")]
	Initialization(String),

	#[error("initialization protocol not supported by this solver")]
	UnsupportedProtocol,

	#[error("unknown tip link '{0}'")]
	UnknownTipLink(String),
}

/// An interchangeable kinematics solver implementation.
///
/// Only the lifecycle is part of this system: instances are created by
/// name through the plugin registry, initialized through one of the two
/// protocols below, given their operating timeout, and then handed out
/// as opaque [`SolverRef`]s. The numerical solving itself is the
/// implementation's business.
pub trait KinematicsSolver: Send + Sync {
	/// Initialize against a live robot model. Preferred protocol: the
	/// model reference it carries is already validated.
	fn initialize(
		&mut self,
		model: &RobotModel,
		group: &str,
		base_link: &str,
		tip_links: &[String],
		search_resolution: f64,
	) -> Result<(), SolverError>;

	/// Legacy initialization keyed by the robot-description identifier
	/// instead of a live model. Kept for implementations that only
	/// understand this form.
	fn initialize_from_description(
		&mut self,
		robot_description: &str,
		group: &str,
		base_link: &str,
		tip_links: &[String],
		search_resolution: f64,
	) -> Result<(), SolverError>;

	/// Operating timeout, in seconds, for the solver's own future
	/// operations. Not a bound on allocation.
	fn set_default_timeout(&mut self, seconds: f64);

	fn group_name(&self) -> &str;

	fn base_link(&self) -> &str;

	fn tip_links(&self) -> &[String];

	fn search_resolution(&self) -> f64;

	fn default_timeout(&self) -> f64;
}

/// Solver handles show up in logs and assertions; render the
/// initialization state instead of nothing.
impl fmt::Debug for dyn KinematicsSolver {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("KinematicsSolver")
			.field("group", &self.group_name())
			.field("base_link", &self.base_link())
			.field("tip_links", &self.tip_links())
			.field("search_resolution", &self.search_resolution())
			.finish()
	}
}

/// Shared handle to an initialized solver. `Arc::strong_count == 1`
/// is the cache's sole-ownership test.
pub type SolverRef = Arc<dyn KinematicsSolver>;
