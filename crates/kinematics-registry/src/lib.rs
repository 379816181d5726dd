//! Name-keyed registry of kinematics solver factories.
//!
//! Stands in for a dynamic class loader: every solver implementation
//! registers an explicit constructor under its plugin name at startup,
//! and the allocator requests fresh instances by configured name. The
//! registry may be queried repeatedly; each `create` call produces a
//! new, uninitialized instance.

use kinematics_types::KinematicsSolver;
use std::collections::HashMap;
use thiserror::Error;
use tracing::debug;

/// Constructor for one solver implementation.
pub type SolverFactory = Box<dyn Fn() -> Box<dyn KinematicsSolver> + Send + Sync>;

#[derive(Debug, Error)]
pub enum RegistryError {
	#[error("unknown kinematics plugin '{0}'")]
	UnknownPlugin(String),

	#[error("kinematics plugin '{0}' is already registered")]
	DuplicatePlugin(String),

	#[error("unable to construct the kinematics plugin registry: {0}")]
	Construction(String),
}

/// Registry of solver constructors keyed by plugin name.
#[derive(Default)]
pub struct SolverPluginRegistry {
	factories: HashMap<String, SolverFactory>,
}

impl SolverPluginRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	/// Register a constructor under `name`.
	pub fn register<F>(&mut self, name: impl Into<String>, factory: F) -> Result<(), RegistryError>
	where
		F: Fn() -> Box<dyn KinematicsSolver> + Send + Sync + 'static,
	{
		let name = name.into();
		if self.factories.contains_key(&name) {
			return Err(RegistryError::DuplicatePlugin(name));
		}
		debug!("Registering kinematics plugin '{}'", name);
		self.factories.insert(name, Box::new(factory));
		Ok(())
	}

	/// Construct a fresh, uninitialized instance of the named plugin.
	pub fn create(&self, name: &str) -> Result<Box<dyn KinematicsSolver>, RegistryError> {
		let factory = self
			.factories
			.get(name)
			.ok_or_else(|| RegistryError::UnknownPlugin(name.to_string()))?;
		Ok(factory())
	}

	pub fn plugin_names(&self) -> Vec<&str> {
		self.factories.keys().map(String::as_str).collect()
	}
}
