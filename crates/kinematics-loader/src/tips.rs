//! Tip frame selection for a planning group.

use kinematics_types::JointGroup;
use tracing::{error, info};

/// Decide which, and how many, tip frames a group's solver plans for.
///
/// A non-empty configured override wins; otherwise the last link of
/// the group's chain is used. An empty result means the group is
/// degenerate; it is reported, and the caller decides how to proceed.
pub fn choose_tip_frames(group: &JointGroup, override_tips: &[String]) -> Vec<String> {
	let tips: Vec<String> = if !override_tips.is_empty() {
		info!(
			"Choosing tip frames of the kinematics solver for group '{}' from the configured override",
			group.name()
		);
		override_tips.to_vec()
	} else {
		info!(
			"Choosing the tip frame of the kinematics solver for group '{}' from the last link in the chain",
			group.name()
		);
		group.last_link().map(str::to_string).into_iter().collect()
	};

	if tips.is_empty() {
		error!("Error choosing tip frame(s) for group '{}'", group.name());
	} else {
		info!("Planning group '{}' has tip(s): {}", group.name(), tips.join(", "));
	}
	tips
}
