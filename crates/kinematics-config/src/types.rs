//! Configuration types: the raw on-disk form and the resolved form.

use crate::serde_helpers::{float_or_seq, string_or_seq};
use kinematics_types::DEFAULT_SEARCH_RESOLUTION;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::info;

/// On-disk form of the kinematics configuration.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawKinematicsConfig {
	/// Search resolution for candidates the file does not cover.
	#[serde(default)]
	pub default_search_resolution: Option<f64>,
	/// Solver assigned to model groups that have no `[groups]` entry.
	#[serde(default)]
	pub default_solver: Option<String>,
	/// Timeout for default-solver entries, in seconds.
	#[serde(default)]
	pub default_timeout: Option<f64>,
	#[serde(default)]
	pub groups: BTreeMap<String, RawGroupConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawGroupConfig {
	/// Candidate solver names in priority order; accepts an array or a
	/// whitespace-separated string.
	#[serde(default, deserialize_with = "string_or_seq")]
	pub solvers: Vec<String>,
	/// One entry per candidate; a scalar applies to the first
	/// candidate only, missing trailing entries are filled with the
	/// default resolution.
	#[serde(default, deserialize_with = "float_or_seq")]
	pub search_resolutions: Vec<f64>,
	/// Explicit tip links, overriding the last link of the chain.
	#[serde(default)]
	pub tip_links: Vec<String>,
	/// Deprecated singular spelling of `tip_links`.
	#[serde(default)]
	pub tip_link: Option<String>,
	/// Solver timeout in seconds.
	#[serde(default)]
	pub timeout: Option<f64>,
	/// Obsolete knob; solvers only honor a timeout now.
	#[serde(default)]
	pub attempts: Option<u32>,
}

/// Resolved configuration for one group.
#[derive(Debug, Clone, Serialize)]
pub struct GroupSolverConfig {
	pub name: String,
	/// Candidate solver names in priority order.
	pub solvers: Vec<String>,
	/// Search resolution per candidate; always at least as long as
	/// `solvers` after resolution.
	pub search_resolutions: Vec<f64>,
	/// Explicit tip links; empty means "use the chain's last link".
	pub tip_links: Vec<String>,
	/// Solver timeout in seconds; `None` falls back to the group's
	/// intrinsic default.
	pub timeout: Option<f64>,
}

/// The resolved kinematics configuration for all groups.
#[derive(Debug, Clone, Serialize)]
pub struct KinematicsConfig {
	groups: BTreeMap<String, GroupSolverConfig>,
	default_solver: Option<String>,
	default_search_resolution: f64,
	default_timeout: Option<f64>,
}

impl Default for KinematicsConfig {
	fn default() -> Self {
		Self {
			groups: BTreeMap::new(),
			default_solver: None,
			default_search_resolution: DEFAULT_SEARCH_RESOLUTION,
			default_timeout: None,
		}
	}
}

impl KinematicsConfig {
	pub(crate) fn new(
		groups: BTreeMap<String, GroupSolverConfig>,
		default_solver: Option<String>,
		default_search_resolution: f64,
		default_timeout: Option<f64>,
	) -> Self {
		Self {
			groups,
			default_solver,
			default_search_resolution,
			default_timeout,
		}
	}

	pub fn group(&self, name: &str) -> Option<&GroupSolverConfig> {
		self.groups.get(name)
	}

	pub fn groups(&self) -> impl Iterator<Item = &GroupSolverConfig> {
		self.groups.values()
	}

	pub fn default_solver(&self) -> Option<&str> {
		self.default_solver.as_deref()
	}

	pub fn default_search_resolution(&self) -> f64 {
		self.default_search_resolution
	}

	/// Copy of this configuration with a synthesized single-candidate
	/// entry for every named group missing from the file, when a
	/// default solver is configured.
	pub fn with_default_entries<'a>(
		&self,
		group_names: impl IntoIterator<Item = &'a str>,
	) -> KinematicsConfig {
		let mut resolved = self.clone();
		let Some(default_solver) = &self.default_solver else {
			return resolved;
		};
		for name in group_names {
			if resolved.groups.contains_key(name) {
				continue;
			}
			info!(
				"Using default kinematics solver '{}' for group '{}'",
				default_solver, name
			);
			resolved.groups.insert(
				name.to_string(),
				GroupSolverConfig {
					name: name.to_string(),
					solvers: vec![default_solver.clone()],
					search_resolutions: vec![self.default_search_resolution],
					tip_links: Vec::new(),
					timeout: self.default_timeout,
				},
			);
		}
		resolved
	}
}
