//! Scripted solvers and probed registries shared by the unit tests.

use kinematics_config::GroupSolverConfig;
use kinematics_registry::SolverPluginRegistry;
use kinematics_types::{
	KinematicsSolver, RobotModel, SolverError, SolverRef, DEFAULT_SOLVER_TIMEOUT,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// What a scripted solver does per initialization protocol.
#[derive(Debug, Clone, Copy)]
pub struct Script {
	pub live_ok: bool,
	pub legacy_ok: bool,
}

pub const ALWAYS_OK: Script = Script {
	live_ok: true,
	legacy_ok: true,
};

pub const NEVER_OK: Script = Script {
	live_ok: false,
	legacy_ok: false,
};

pub const LEGACY_ONLY: Script = Script {
	live_ok: false,
	legacy_ok: true,
};

/// Solver whose initialization outcome follows a [`Script`] and whose
/// protocol invocations are appended to a shared event log as
/// `"<plugin>:live:<group>"` / `"<plugin>:description:<id>"`.
pub struct ScriptedSolver {
	plugin_name: String,
	script: Script,
	events: Arc<Mutex<Vec<String>>>,
	group: String,
	base_link: String,
	tip_links: Vec<String>,
	search_resolution: f64,
	default_timeout: f64,
}

impl ScriptedSolver {
	pub fn new(plugin_name: &str, script: Script, events: Arc<Mutex<Vec<String>>>) -> Self {
		Self {
			plugin_name: plugin_name.to_string(),
			script,
			events,
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

impl KinematicsSolver for ScriptedSolver {
	fn initialize(
		&mut self,
		_model: &RobotModel,
		group: &str,
		base_link: &str,
		tip_links: &[String],
		search_resolution: f64,
	) -> Result<(), SolverError> {
		self.events
			.lock()
			.unwrap()
			.push(format!("{}:live:{}", self.plugin_name, group));
		if !self.script.live_ok {
			return Err(SolverError::Initialization("scripted live failure".into()));
		}
		self.record(group, base_link, tip_links, search_resolution);
		Ok(())
	}

	fn initialize_from_description(
		&mut self,
		robot_description: &str,
		group: &str,
		base_link: &str,
		tip_links: &[String],
		search_resolution: f64,
	) -> Result<(), SolverError> {
		self.events
			.lock()
			.unwrap()
			.push(format!("{}:description:{}", self.plugin_name, robot_description));
		if !self.script.legacy_ok {
			return Err(SolverError::Initialization(
				"scripted legacy failure".into(),
			));
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

/// Shared observation point for registry factories.
#[derive(Default)]
pub struct RegistryProbe {
	created: Arc<AtomicUsize>,
	created_names: Arc<Mutex<Vec<String>>>,
	events: Arc<Mutex<Vec<String>>>,
}

impl RegistryProbe {
	/// Number of factory invocations (instantiation attempts).
	pub fn created(&self) -> usize {
		self.created.load(Ordering::SeqCst)
	}

	/// Plugin names in instantiation order.
	pub fn created_names(&self) -> Vec<String> {
		self.created_names.lock().unwrap().clone()
	}

	/// Initialization-protocol events in invocation order.
	pub fn events(&self) -> Vec<String> {
		self.events.lock().unwrap().clone()
	}
}

/// Registry whose factories build [`ScriptedSolver`]s and report into
/// `probe`.
pub fn registry_with(plugins: &[(&str, Script)], probe: &RegistryProbe) -> SolverPluginRegistry {
	let mut registry = SolverPluginRegistry::new();
	for (name, script) in plugins {
		let plugin_name = name.to_string();
		let script = *script;
		let created = Arc::clone(&probe.created);
		let created_names = Arc::clone(&probe.created_names);
		let events = Arc::clone(&probe.events);
		registry
			.register(*name, move || {
				created.fetch_add(1, Ordering::SeqCst);
				created_names.lock().unwrap().push(plugin_name.clone());
				Box::new(ScriptedSolver::new(&plugin_name, script, Arc::clone(&events)))
			})
			.unwrap();
	}
	registry
}

/// A lone, uninitialized scripted solver handle for cache tests.
pub fn scripted_solver_ref(script: Script) -> SolverRef {
	Arc::new(ScriptedSolver::new(
		"standalone",
		script,
		Arc::new(Mutex::new(Vec::new())),
	))
}

/// Five-link arm: world frame `/world`, chain base → shoulder →
/// forearm → wrist → tool. Groups: `arm` (intrinsic timeout 0.7),
/// `whole_body` (anchored on the model frame), `no_links`.
pub fn arm_model() -> RobotModel {
	RobotModel::builder("demo_arm")
		.model_frame("/world")
		.link("base", None)
		.link("shoulder", Some("base"))
		.link("forearm", Some("shoulder"))
		.link("wrist", Some("forearm"))
		.link("tool", Some("wrist"))
		.group_with_timeout("arm", ["shoulder", "forearm", "wrist", "tool"], 0.7)
		.group("whole_body", ["base", "shoulder", "forearm", "wrist", "tool"])
		.group("no_links", Vec::<String>::new())
		.build()
}

/// Group config with one default-resolution entry per candidate, no
/// tip override, and no explicit timeout.
pub fn group_config(name: &str, solvers: &[&str]) -> GroupSolverConfig {
	GroupSolverConfig {
		name: name.to_string(),
		solvers: solvers.iter().map(|s| s.to_string()).collect(),
		search_resolutions: vec![0.1; solvers.len()],
		tip_links: Vec::new(),
		timeout: None,
	}
}
