//! Small TOML description for wiring a robot model from the command
//! line. A convenience input format, not a structural-description
//! parser.

use anyhow::{Context, Result};
use kinematics_types::RobotModel;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct ModelFile {
	name: String,
	#[serde(default = "default_model_frame")]
	model_frame: String,
	#[serde(default)]
	links: Vec<LinkEntry>,
	#[serde(default)]
	groups: Vec<GroupEntry>,
}

fn default_model_frame() -> String {
	"world".to_string()
}

#[derive(Debug, Deserialize)]
struct LinkEntry {
	name: String,
	#[serde(default)]
	parent: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GroupEntry {
	name: String,
	/// Chain order, root end first.
	links: Vec<String>,
	/// Intrinsic solver timeout in seconds.
	#[serde(default)]
	default_timeout: Option<f64>,
}

pub fn load_model(path: &Path) -> Result<RobotModel> {
	let contents = std::fs::read_to_string(path)
		.with_context(|| format!("Failed to read model file {:?}", path))?;
	parse_model(&contents)
}

pub fn parse_model(contents: &str) -> Result<RobotModel> {
	let file: ModelFile = toml::from_str(contents).context("Failed to parse model file")?;

	let mut builder = RobotModel::builder(&file.name).model_frame(&file.model_frame);
	for link in &file.links {
		builder = builder.link(&link.name, link.parent.as_deref());
	}
	for group in &file.groups {
		builder = match group.default_timeout {
			Some(timeout) => {
				builder.group_with_timeout(&group.name, group.links.iter().cloned(), timeout)
			}
			None => builder.group(&group.name, group.links.iter().cloned()),
		};
	}
	Ok(builder.build())
}
