//! Kinematics solver plugin loading, allocation, and caching.
//!
//! For each named group of a robot model this crate picks a solver
//! implementation from the configured candidate list (first one that
//! initializes wins, with a two-protocol initialization fallback),
//! selects the tip frames the solver plans for, and caches one
//! instance per group. A cached instance is handed back out only while
//! the cache is its sole owner; a still-shared instance is replaced by
//! a fresh allocation instead.

pub mod allocator;
pub mod cache;
mod error;
pub mod tips;

#[cfg(test)]
pub(crate) mod test_support;

pub use allocator::SolverAllocator;
pub use cache::SolverCache;
pub use error::AllocationError;
pub use tips::choose_tip_frames;

use kinematics_config::{GroupSolverConfig, KinematicsConfig};
use kinematics_registry::{RegistryError, SolverPluginRegistry};
use kinematics_types::{GroupId, RobotModel, SolverRef, DEFAULT_ROBOT_DESCRIPTION};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{error, info};

/// Callable bound to one model's resolved configuration: maps a group
/// handle to a solver instance or an allocation outcome.
pub type SolverAllocatorFn =
	Arc<dyn Fn(GroupId) -> Result<SolverRef, AllocationError> + Send + Sync>;

/// Allocator and cache pair bound to one model.
struct BoundLoader {
	model: Arc<RobotModel>,
	allocator: SolverAllocator,
	cache: SolverCache,
}

impl BoundLoader {
	fn allocate_cached(&self, group: GroupId) -> Result<SolverRef, AllocationError> {
		self.cache
			.get_or_allocate(group, || self.allocator.allocate(&self.model, group))
	}
}

/// Entry point for callers: wires the resolved per-group configuration
/// into the allocator/cache pair and exposes it as a single solver
/// factory per model.
pub struct KinematicsPluginLoader {
	robot_description: String,
	config: KinematicsConfig,
	/// `None` after a failed registry construction; allocation then
	/// fails fast instead of crashing.
	registry: Option<Arc<SolverPluginRegistry>>,
	bound: Mutex<Option<Arc<BoundLoader>>>,
}

impl KinematicsPluginLoader {
	/// `registry` may carry the error of a failed registry
	/// construction; the loader still constructs, but every allocation
	/// reports the subsystem as unavailable.
	pub fn new(
		robot_description: impl Into<String>,
		config: KinematicsConfig,
		registry: Result<SolverPluginRegistry, RegistryError>,
	) -> Self {
		let registry = match registry {
			Ok(registry) => Some(Arc::new(registry)),
			Err(err) => {
				error!("Unable to construct the kinematics plugin registry: {}", err);
				None
			}
		};
		let mut robot_description = robot_description.into();
		if robot_description.is_empty() {
			robot_description = DEFAULT_ROBOT_DESCRIPTION.to_string();
		}
		Self {
			robot_description,
			config,
			registry,
			bound: Mutex::new(None),
		}
	}

	/// The solver factory bound to `model`'s resolved configuration.
	///
	/// Built on first call (groups missing from the configuration
	/// receive the default solver, when one is configured); every
	/// later call returns the same bound factory.
	pub fn solver_allocator(&self, model: &Arc<RobotModel>) -> SolverAllocatorFn {
		let mut bound = self.bound.lock().unwrap_or_else(PoisonError::into_inner);
		let bound = bound.get_or_insert_with(|| {
			info!("Configuring kinematics solvers");
			let resolved = self
				.config
				.with_default_entries(model.groups().map(|(_, group)| group.name()));
			let groups: HashMap<String, GroupSolverConfig> = resolved
				.groups()
				.cloned()
				.map(|group| (group.name.clone(), group))
				.collect();
			Arc::new(BoundLoader {
				model: Arc::clone(model),
				allocator: SolverAllocator::new(
					&self.robot_description,
					self.registry.clone(),
					groups,
				),
				cache: SolverCache::new(),
			})
		});
		let bound = Arc::clone(bound);
		Arc::new(move |group| bound.allocate_cached(group))
	}

	/// Report, for every configured group, the chosen candidates and
	/// their search resolutions. Read-only.
	pub fn status(&self) {
		let bound = self
			.bound
			.lock()
			.unwrap_or_else(PoisonError::into_inner)
			.clone();
		match bound {
			Some(bound) => bound.allocator.status(),
			None => info!("Loader function was never requested"),
		}
	}

	pub fn robot_description(&self) -> &str {
		&self.robot_description
	}
}
