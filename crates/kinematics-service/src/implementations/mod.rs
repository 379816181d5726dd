//! Built-in solver implementations, registered explicitly at startup.

mod chain;

pub use chain::ChainSolver;

use kinematics_registry::{RegistryError, SolverPluginRegistry};

/// Registry with every built-in implementation registered.
pub fn default_registry() -> Result<SolverPluginRegistry, RegistryError> {
	let mut registry = SolverPluginRegistry::new();
	registry.register(ChainSolver::PLUGIN_NAME, || Box::new(ChainSolver::new()))?;
	Ok(registry)
}
