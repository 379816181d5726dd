//! Per-group kinematics solver configuration.
//!
//! Resolves the on-disk TOML form into [`KinematicsConfig`]: candidate
//! solver names per group in priority order, search resolutions padded
//! to the candidate count, optional tip-link overrides, and timeouts.
//! Absence of an entry for a group is valid and means "no solver
//! configured for this group".

mod loader;
mod serde_helpers;
mod types;

pub use loader::ConfigLoader;
pub use types::{GroupSolverConfig, KinematicsConfig};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
	#[error("failed to read {path}: {source}")]
	Io {
		path: String,
		#[source]
		source: std::io::Error,
	},

	#[error("failed to parse kinematics configuration: {0}")]
	Parse(String),

	#[error("invalid kinematics configuration: {0}")]
	Validation(String),
}
