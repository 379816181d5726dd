//! Articulated robot model: links, joint groups, and group handles.

use std::collections::HashMap;

/// Opaque, stable handle for a joint group.
///
/// Issued once per group by the owning [`RobotModel`] arena. The solver
/// cache keys on this handle rather than on the printable group name,
/// so two structurally distinct groups never collide even when a
/// configuration error gives them the same name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupId(usize);

/// A single link of the articulated structure.
#[derive(Debug, Clone)]
pub struct Link {
	name: String,
	/// Structural parent link above this link's parent joint; `None`
	/// for a root link attached directly to the model frame.
	parent: Option<String>,
}

impl Link {
	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn parent(&self) -> Option<&str> {
		self.parent.as_deref()
	}
}

/// A named, ordered subset of the model's links for which a solver may
/// be configured. Links are stored in chain order, root end first.
#[derive(Debug, Clone)]
pub struct JointGroup {
	name: String,
	links: Vec<String>,
	default_timeout: f64,
}

impl JointGroup {
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Link names in chain order.
	pub fn links(&self) -> &[String] {
		&self.links
	}

	/// Terminal link of the chain, farthest from the chain root.
	pub fn last_link(&self) -> Option<&str> {
		self.links.last().map(String::as_str)
	}

	/// Intrinsic solver timeout for the group, in seconds. Used when
	/// the configuration carries no explicit timeout.
	pub fn default_timeout(&self) -> f64 {
		self.default_timeout
	}
}

/// The articulated structure the loader navigates.
///
/// Parsing a structural description format is out of scope here;
/// models are assembled through [`RobotModelBuilder`].
#[derive(Debug)]
pub struct RobotModel {
	name: String,
	model_frame: String,
	links: Vec<Link>,
	link_index: HashMap<String, usize>,
	groups: Vec<JointGroup>,
	group_index: HashMap<String, GroupId>,
}

impl RobotModel {
	pub fn builder(name: impl Into<String>) -> RobotModelBuilder {
		RobotModelBuilder::new(name)
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	/// The model's overall reference frame.
	pub fn model_frame(&self) -> &str {
		&self.model_frame
	}

	pub fn link(&self, name: &str) -> Option<&Link> {
		self.link_index.get(name).map(|&i| &self.links[i])
	}

	pub fn group(&self, id: GroupId) -> Option<&JointGroup> {
		self.groups.get(id.0)
	}

	/// The stable handle for a group name. The same name always yields
	/// the same handle for the lifetime of the model.
	pub fn group_id(&self, name: &str) -> Option<GroupId> {
		self.group_index.get(name).copied()
	}

	pub fn groups(&self) -> impl Iterator<Item = (GroupId, &JointGroup)> {
		self.groups
			.iter()
			.enumerate()
			.map(|(i, group)| (GroupId(i), group))
	}
}

/// Builder for [`RobotModel`]. Later definitions of a link or group
/// with an existing name replace the earlier one.
pub struct RobotModelBuilder {
	name: String,
	model_frame: String,
	links: Vec<Link>,
	link_index: HashMap<String, usize>,
	groups: Vec<JointGroup>,
	group_index: HashMap<String, GroupId>,
}

impl RobotModelBuilder {
	fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			model_frame: String::from("world"),
			links: Vec::new(),
			link_index: HashMap::new(),
			groups: Vec::new(),
			group_index: HashMap::new(),
		}
	}

	pub fn model_frame(mut self, frame: impl Into<String>) -> Self {
		self.model_frame = frame.into();
		self
	}

	pub fn link(mut self, name: impl Into<String>, parent: Option<&str>) -> Self {
		let link = Link {
			name: name.into(),
			parent: parent.map(str::to_string),
		};
		match self.link_index.get(&link.name) {
			Some(&i) => self.links[i] = link,
			None => {
				self.link_index.insert(link.name.clone(), self.links.len());
				self.links.push(link);
			}
		}
		self
	}

	pub fn group(
		self,
		name: impl Into<String>,
		links: impl IntoIterator<Item = impl Into<String>>,
	) -> Self {
		self.group_with_timeout(name, links, crate::solver::DEFAULT_SOLVER_TIMEOUT)
	}

	pub fn group_with_timeout(
		mut self,
		name: impl Into<String>,
		links: impl IntoIterator<Item = impl Into<String>>,
		default_timeout: f64,
	) -> Self {
		let group = JointGroup {
			name: name.into(),
			links: links.into_iter().map(Into::into).collect(),
			default_timeout,
		};
		match self.group_index.get(&group.name) {
			Some(&id) => self.groups[id.0] = group,
			None => {
				let id = GroupId(self.groups.len());
				self.group_index.insert(group.name.clone(), id);
				self.groups.push(group);
			}
		}
		self
	}

	pub fn build(self) -> RobotModel {
		RobotModel {
			name: self.name,
			model_frame: self.model_frame,
			links: self.links,
			link_index: self.link_index,
			groups: self.groups,
			group_index: self.group_index,
		}
	}
}
