//! Configuration loading and resolution.

use crate::types::{GroupSolverConfig, KinematicsConfig, RawKinematicsConfig};
use crate::ConfigError;
use kinematics_types::DEFAULT_SEARCH_RESOLUTION;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{info, warn};

/// Loads the kinematics configuration from TOML.
pub struct ConfigLoader;

impl ConfigLoader {
	pub fn from_file<P: AsRef<Path>>(path: P) -> Result<KinematicsConfig, ConfigError> {
		let path = path.as_ref();
		info!("Loading kinematics configuration from {:?}", path);

		let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
			path: path.display().to_string(),
			source,
		})?;
		Self::from_toml(&contents)
	}

	pub fn from_toml(contents: &str) -> Result<KinematicsConfig, ConfigError> {
		let raw: RawKinematicsConfig =
			toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))?;
		resolve(raw)
	}
}

/// Turn the raw on-disk form into the resolved configuration: merge
/// deprecated fields, validate values, and pad search resolutions up
/// to the candidate count.
fn resolve(raw: RawKinematicsConfig) -> Result<KinematicsConfig, ConfigError> {
	// a zero or negative default counts as unset
	let default_search_resolution = match raw.default_search_resolution {
		Some(res) if res > f64::EPSILON => res,
		_ => DEFAULT_SEARCH_RESOLUTION,
	};

	let mut groups = BTreeMap::new();
	for (name, group) in raw.groups {
		if group.attempts.is_some() {
			warn!(
				"Kinematics solvers don't support an attempt count anymore, only a timeout. \
				 Please remove 'attempts' from group '{}'.",
				name
			);
		}

		let mut tip_links = Vec::new();
		if let Some(tip) = group.tip_link {
			warn!(
				"'tip_link' is deprecated in favor of the 'tip_links' array (group '{}')",
				name
			);
			tip_links.push(tip);
		}
		tip_links.extend(group.tip_links);

		if group.solvers.is_empty() {
			warn!("No kinematics solvers specified for group '{}'", name);
			continue;
		}

		for res in &group.search_resolutions {
			if *res <= 0.0 {
				return Err(ConfigError::Validation(format!(
					"search resolution for group '{}' must be positive, got {}",
					name, res
				)));
			}
		}
		if let Some(timeout) = group.timeout {
			if timeout <= 0.0 {
				return Err(ConfigError::Validation(format!(
					"timeout for group '{}' must be positive, got {}",
					name, timeout
				)));
			}
		}

		// every candidate gets a resolution, even when the file names fewer
		let mut search_resolutions = group.search_resolutions;
		while search_resolutions.len() < group.solvers.len() {
			search_resolutions.push(default_search_resolution);
		}

		for solver in &group.solvers {
			info!("Using kinematics solver '{}' for group '{}'", solver, name);
		}

		groups.insert(
			name.clone(),
			GroupSolverConfig {
				name,
				solvers: group.solvers,
				search_resolutions,
				tip_links,
				timeout: group.timeout,
			},
		);
	}

	Ok(KinematicsConfig::new(
		groups,
		raw.default_solver,
		default_search_resolution,
		raw.default_timeout,
	))
}
