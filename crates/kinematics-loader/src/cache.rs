//! Group-keyed solver cache with a sole-ownership hand-out policy.

use crate::error::AllocationError;
use kinematics_types::{GroupId, SolverRef};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::debug;

/// At most one live solver instance per group.
///
/// The loader is queried twice per group in normal operation: once to
/// probe whether a solver can be had at all, and once to obtain the
/// instance actually used. Handing the probe's instance to the second
/// call avoids reallocating, but only while nobody else holds it: an
/// instance that is still shared may carry caller-visible state and is
/// never handed out twice.
#[derive(Default)]
pub struct SolverCache {
	instances: Mutex<HashMap<GroupId, Option<SolverRef>>>,
}

impl SolverCache {
	pub fn new() -> Self {
		Self::default()
	}

	/// Hand out the cached instance for `group` when the cache is its
	/// sole owner, transferring it to the caller and leaving the slot
	/// empty. Otherwise allocate through `alloc`, cache the fresh
	/// instance, and return it. A failed allocation leaves the slot
	/// empty, so the next request retries.
	pub fn get_or_allocate<F>(
		&self,
		group: GroupId,
		alloc: F,
	) -> Result<SolverRef, AllocationError>
	where
		F: FnOnce() -> Result<SolverRef, AllocationError>,
	{
		// bookkeeping is independent of the allocator's instantiation
		// lock; held across the allocation so the check-and-replace
		// sequence stays atomic
		let mut instances = self
			.instances
			.lock()
			.unwrap_or_else(PoisonError::into_inner);
		let slot = instances.entry(group).or_insert(None);

		if let Some(cached) = slot.take() {
			if Arc::strong_count(&cached) == 1 {
				// pass on the uniquely held instance; the emptied slot
				// forces a fresh allocation next time
				debug!("Handing out the cached kinematics solver for group {:?}", group);
				return Ok(cached);
			}
			// a previous caller still holds it; replace below
			debug!(
				"Cached kinematics solver for group {:?} is still in use; allocating a new one",
				group
			);
		}

		let fresh = alloc()?;
		*slot = Some(fresh.clone());
		Ok(fresh)
	}
}
