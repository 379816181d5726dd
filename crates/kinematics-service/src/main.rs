use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use kinematics_config::{ConfigLoader, KinematicsConfig};
use kinematics_loader::KinematicsPluginLoader;
use kinematics_types::RobotModel;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod implementations;
mod model_file;

#[derive(Parser)]
#[command(name = "kinematics-service")]
#[command(about = "Kinematics solver plugin loader", long_about = None)]
struct Cli {
	#[command(subcommand)]
	command: Option<Commands>,

	/// Kinematics configuration (per-group solver candidates)
	#[arg(short, long, value_name = "FILE", default_value = "config/kinematics.toml")]
	config: PathBuf,

	/// Robot model description
	#[arg(short, long, value_name = "FILE", default_value = "config/model.toml")]
	model: PathBuf,

	/// Identifier handed to solvers that use the legacy
	/// description-keyed initialization
	#[arg(long, default_value = "robot_description")]
	robot_description: String,

	#[arg(long, env = "KINEMATICS_LOG_LEVEL", default_value = "info")]
	log_level: String,

	/// Emit machine-readable JSON where supported
	#[arg(long)]
	json: bool,
}

#[derive(Subcommand)]
enum Commands {
	/// Report the configured solver candidates per group
	Status,
	/// Allocate a solver for every group in the model
	Allocate,
}

fn main() -> Result<()> {
	let cli = Cli::parse();
	setup_tracing(&cli.log_level)?;

	match cli.command {
		Some(Commands::Status) => status(&cli),
		Some(Commands::Allocate) | None => allocate(&cli),
	}
}

fn setup_tracing(level: &str) -> Result<()> {
	let filter = EnvFilter::try_new(level).context("Invalid log level")?;
	tracing_subscriber::fmt().with_env_filter(filter).init();
	Ok(())
}

fn load_inputs(cli: &Cli) -> Result<(Arc<RobotModel>, KinematicsConfig)> {
	let config = ConfigLoader::from_file(&cli.config)
		.context("Failed to load the kinematics configuration")?;
	let model = Arc::new(
		model_file::load_model(&cli.model).context("Failed to load the robot model")?,
	);
	info!(
		"Loaded model '{}' with {} group(s)",
		model.name(),
		model.groups().count()
	);
	Ok((model, config))
}

/// The view the loader actually binds: groups absent from the
/// configuration get their default-solver entry synthesized here too,
/// so reporting and allocation cannot disagree.
fn resolved_config(config: &KinematicsConfig, model: &RobotModel) -> KinematicsConfig {
	config.with_default_entries(model.groups().map(|(_, group)| group.name()))
}

fn status(cli: &Cli) -> Result<()> {
	let (model, config) = load_inputs(cli)?;

	if cli.json {
		let resolved = resolved_config(&config, &model);
		println!("{}", serde_json::to_string_pretty(&resolved)?);
		return Ok(());
	}

	let registry = implementations::default_registry();
	let loader =
		KinematicsPluginLoader::new(cli.robot_description.clone(), config, registry);
	// binding resolves default-solver entries so status sees them
	let _factory = loader.solver_allocator(&model);
	loader.status();
	Ok(())
}

fn allocate(cli: &Cli) -> Result<()> {
	let (model, config) = load_inputs(cli)?;
	let registry = implementations::default_registry();
	let loader =
		KinematicsPluginLoader::new(cli.robot_description.clone(), config, registry);
	let factory = loader.solver_allocator(&model);

	for (id, group) in model.groups() {
		match factory(id) {
			Ok(solver) => info!(
				"Group '{}': solver ready (base '{}', tips [{}], resolution {}, timeout {}s)",
				group.name(),
				solver.base_link(),
				solver.tip_links().join(", "),
				solver.search_resolution(),
				solver.default_timeout()
			),
			Err(err) if err.is_benign() => info!("Group '{}': {}", group.name(), err),
			Err(err) => warn!("Group '{}': {}", group.name(), err),
		}
	}

	loader.status();
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn the_reported_view_includes_synthesized_default_entries() {
		let config = ConfigLoader::from_toml(
			r#"
			default_solver = "builtin/ChainSolver"

			[groups.arm]
			solvers = "custom/ArmSolver"
			"#,
		)
		.unwrap();
		let model = model_file::parse_model(
			r#"
			name = "demo"

			[[links]]
			name = "base"

			[[links]]
			name = "tool"
			parent = "base"

			[[groups]]
			name = "arm"
			links = ["base", "tool"]

			[[groups]]
			name = "gripper"
			links = ["tool"]
			"#,
		)
		.unwrap();

		let resolved = resolved_config(&config, &model);

		// the unconfigured group gets the default solver, the
		// configured one is untouched
		assert_eq!(
			resolved.group("gripper").unwrap().solvers,
			["builtin/ChainSolver"]
		);
		assert_eq!(resolved.group("arm").unwrap().solvers, ["custom/ArmSolver"]);

		let rendered = serde_json::to_string_pretty(&resolved).unwrap();
		assert!(rendered.contains("gripper"));
		assert!(rendered.contains("builtin/ChainSolver"));
	}
}
