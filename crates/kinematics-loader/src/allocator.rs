//! Per-group solver allocation: candidate search with two-protocol
//! initialization fallback.

use crate::error::AllocationError;
use crate::tips::choose_tip_frames;
use kinematics_config::GroupSolverConfig;
use kinematics_registry::SolverPluginRegistry;
use kinematics_types::{
	GroupId, JointGroup, KinematicsSolver, RobotModel, SolverError, SolverRef,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{debug, error, info};

/// Ordered initialization strategies; the first that succeeds wins.
/// The live-model protocol goes first because it carries an already
/// validated model reference; the description-keyed protocol remains
/// for solvers that only understand the legacy form.
const INIT_PROTOCOLS: [InitProtocol; 2] = [InitProtocol::LiveModel, InitProtocol::Description];

#[derive(Debug, Clone, Copy)]
enum InitProtocol {
	LiveModel,
	Description,
}

impl InitProtocol {
	#[allow(clippy::too_many_arguments)]
	fn initialize(
		self,
		solver: &mut dyn KinematicsSolver,
		model: &RobotModel,
		robot_description: &str,
		group: &str,
		base_link: &str,
		tip_links: &[String],
		search_resolution: f64,
	) -> Result<(), SolverError> {
		match self {
			Self::LiveModel => {
				solver.initialize(model, group, base_link, tip_links, search_resolution)
			}
			Self::Description => solver.initialize_from_description(
				robot_description,
				group,
				base_link,
				tip_links,
				search_resolution,
			),
		}
	}
}

/// Tries the configured candidate solvers for a group in priority
/// order and returns the first one that initializes.
pub struct SolverAllocator {
	robot_description: String,
	/// `None` when registry construction failed; every allocation then
	/// fails fast instead of crashing.
	registry: Option<Arc<SolverPluginRegistry>>,
	groups: HashMap<String, GroupSolverConfig>,
	/// The plugin-instantiation path is not assumed safe for
	/// concurrent invocation; one lock serializes it across all
	/// groups and callers.
	instantiation_lock: Mutex<()>,
}

impl SolverAllocator {
	pub fn new(
		robot_description: impl Into<String>,
		registry: Option<Arc<SolverPluginRegistry>>,
		groups: HashMap<String, GroupSolverConfig>,
	) -> Self {
		Self {
			robot_description: robot_description.into(),
			registry,
			groups,
			instantiation_lock: Mutex::new(()),
		}
	}

	/// Allocate and initialize a solver for `group_id`. Candidates are
	/// tried strictly in configuration order; the first success wins
	/// and no later candidate is evaluated.
	pub fn allocate(
		&self,
		model: &RobotModel,
		group_id: GroupId,
	) -> Result<SolverRef, AllocationError> {
		let Some(registry) = &self.registry else {
			error!("Invalid kinematics plugin registry. Cannot allocate solvers.");
			return Err(AllocationError::RegistryUnavailable);
		};
		let Some(group) = model.group(group_id) else {
			error!("Unknown group handle {:?}. Cannot allocate a kinematics solver.", group_id);
			return Err(AllocationError::UnknownGroup(group_id));
		};
		if group.links().is_empty() {
			error!(
				"No links specified for group '{}'. Cannot allocate a kinematics solver.",
				group.name()
			);
			return Err(AllocationError::DegenerateGroup(group.name().to_string()));
		}

		info!("Trying to allocate a kinematics solver for group '{}'", group.name());

		let Some(config) = self.groups.get(group.name()) else {
			info!("No kinematics solver configured for group '{}'", group.name());
			return Err(AllocationError::NotConfigured(group.name().to_string()));
		};

		let base_link = base_link_name(model, group);

		let _guard = self
			.instantiation_lock
			.lock()
			.unwrap_or_else(PoisonError::into_inner);

		let mut attempts = 0;
		for (i, candidate) in config.solvers.iter().enumerate() {
			attempts += 1;
			let mut solver = match registry.create(candidate) {
				Ok(solver) => solver,
				Err(err) => {
					error!(
						"The kinematics plugin '{}' failed to load for group '{}': {}",
						candidate,
						group.name(),
						err
					);
					continue;
				}
			};

			let tip_links = choose_tip_frames(group, &config.tip_links);
			// padded during configuration resolution, so this index exists
			let search_resolution = config.search_resolutions[i];

			let mut initialized = false;
			for protocol in INIT_PROTOCOLS {
				match protocol.initialize(
					solver.as_mut(),
					model,
					&self.robot_description,
					group.name(),
					&base_link,
					&tip_links,
					search_resolution,
				) {
					Ok(()) => {
						initialized = true;
						break;
					}
					Err(err) => debug!(
						"{:?} initialization of '{}' failed for group '{}': {}",
						protocol,
						candidate,
						group.name(),
						err
					),
				}
			}
			if !initialized {
				// discard the instance before trying the next candidate
				error!(
					"Kinematics solver of type '{}' could not be initialized for group '{}'",
					candidate,
					group.name()
				);
				continue;
			}

			solver.set_default_timeout(config.timeout.unwrap_or_else(|| group.default_timeout()));
			info!(
				"Successfully allocated and initialized a kinematics solver of type '{}' with \
				 search resolution {} for group '{}'",
				candidate,
				search_resolution,
				group.name()
			);
			return Ok(Arc::from(solver));
		}

		info!(
			"No usable kinematics solver was found for group '{}'. \
			 Did you load the kinematics configuration for this group?",
			group.name()
		);
		Err(AllocationError::Exhausted {
			group: group.name().to_string(),
			attempts,
		})
	}

	/// Log every configured candidate and its search resolution.
	pub fn status(&self) {
		for config in self.groups.values() {
			for (solver, resolution) in config.solvers.iter().zip(&config.search_resolutions) {
				info!(
					"Solver for group '{}': '{}' (search resolution = {})",
					config.name, solver, resolution
				);
			}
		}
	}
}

/// The structural parent of the chain's first link anchors the solver;
/// chains attached directly to the root are anchored on the model
/// frame. Exactly one leading '/' is stripped since solvers expect
/// relative-style frame names.
fn base_link_name(model: &RobotModel, group: &JointGroup) -> String {
	let base = group
		.links()
		.first()
		.and_then(|first| model.link(first))
		.and_then(|link| link.parent())
		.unwrap_or_else(|| model.model_frame());
	base.strip_prefix('/').unwrap_or(base).to_string()
}
