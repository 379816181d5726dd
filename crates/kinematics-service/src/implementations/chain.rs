//! Minimal built-in solver covering the lifecycle contract.

use kinematics_types::{
	KinematicsSolver, RobotModel, SolverError, DEFAULT_SOLVER_TIMEOUT,
};

/// Records the chain it was configured for. Under the live-model
/// protocol it rejects tip links the model does not know; the legacy
/// protocol has no model to check against and accepts. The numerical
/// IK itself lives in external plugins.
pub struct ChainSolver {
	group: String,
	base_link: String,
	tip_links: Vec<String>,
	search_resolution: f64,
	default_timeout: f64,
}

impl ChainSolver {
	pub const PLUGIN_NAME: &'static str = "builtin/ChainSolver";

	pub fn new() -> Self {
		Self {
			group: String::new(),
			base_link: String::new(),
			tip_links: Vec::new(),
			search_resolution: 0.0,
			default_timeout: DEFAULT_SOLVER_TIMEOUT,
		}
	}

	fn record(&mut self, group: &str, base_link: &str, tip_links: &[String], resolution: f64) {
		self.group = group.to_string();
		self.base_link = base_link.to_string();
		self.tip_links = tip_links.to_vec();
		self.search_resolution = resolution;
	}
}

impl Default for ChainSolver {
	fn default() -> Self {
		Self::new()
	}
}

impl KinematicsSolver for ChainSolver {
	fn initialize(
		&mut self,
		model: &RobotModel,
		group: &str,
		base_link: &str,
		tip_links: &[String],
		search_resolution: f64,
	) -> Result<(), SolverError> {
		if tip_links.is_empty() {
			return Err(SolverError::Initialization(format!(
				"no tip links for group '{}'",
				group
			)));
		}
		for tip in tip_links {
			if model.link(tip).is_none() {
				return Err(SolverError::UnknownTipLink(tip.clone()));
			}
		}
		self.record(group, base_link, tip_links, search_resolution);
		Ok(())
	}

	fn initialize_from_description(
		&mut self,
		_robot_description: &str,
		group: &str,
		base_link: &str,
		tip_links: &[String],
		search_resolution: f64,
	) -> Result<(), SolverError> {
		if tip_links.is_empty() {
			return Err(SolverError::Initialization(format!(
				"no tip links for group '{}'",
				group
			)));
		}
		self.record(group, base_link, tip_links, search_resolution);
		Ok(())
	}

	fn set_default_timeout(&mut self, seconds: f64) {
		self.default_timeout = seconds;
	}

	fn group_name(&self) -> &str {
		&self.group
	}

	fn base_link(&self) -> &str {
		&self.base_link
	}

	fn tip_links(&self) -> &[String] {
		&self.tip_links
	}

	fn search_resolution(&self) -> f64 {
		self.search_resolution
	}

	fn default_timeout(&self) -> f64 {
		self.default_timeout
	}
}
