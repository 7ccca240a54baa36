//! Sorting state.
//!
//! The unsorted case is `Option::<SortSpec>::None` rather than a third
//! direction variant, so [`SortDirection`] stays a two-value enum.
//! Key, direction, and comparator are always replaced together.

use crate::columns::RecordComparator;
use crate::events::{Subscribers, Subscription};
use parking_lot::RwLock;
use std::sync::Arc;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
	/// Ascending order
	Ascending,
	/// Descending order
	Descending,
}

impl SortDirection {
	/// Returns the opposite direction.
	pub fn toggle(&self) -> Self {
		match self {
			Self::Ascending => Self::Descending,
			Self::Descending => Self::Ascending,
		}
	}

	/// Query-parameter spelling ("asc" / "desc").
	pub fn as_query(&self) -> &'static str {
		match self {
			Self::Ascending => "asc",
			Self::Descending => "desc",
		}
	}
}

/// A sort key and direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
	/// Column key to sort by
	pub key: String,
	/// Direction to sort in
	pub direction: SortDirection,
}

impl SortSpec {
	/// Creates a sort spec.
	pub fn new(key: impl Into<String>, direction: SortDirection) -> Self {
		Self {
			key: key.into(),
			direction,
		}
	}

	/// The direction a header click on `key` should produce, given the
	/// current sort: selecting a new key (or an unsorted/descending state)
	/// yields ascending; clicking the ascending key flips to descending.
	pub fn toggled(current: Option<&SortSpec>, key: &str) -> SortDirection {
		match current {
			Some(spec) if spec.key == key && spec.direction == SortDirection::Ascending => {
				SortDirection::Descending
			}
			_ => SortDirection::Ascending,
		}
	}
}

/// Change event carrying the new sort (None = unsorted).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortChange {
	/// The sort after the mutation
	pub sort: Option<SortSpec>,
}

struct SortState<R> {
	sort: Option<SortSpec>,
	comparator: Option<RecordComparator<R>>,
	generation: u64,
}

/// Sorting state handle for records of type `R`.
///
/// Like [`PaginationState`](crate::pagination::PaginationState), clones share
/// the same state and subscriber list.
pub struct SortingState<R> {
	state: Arc<RwLock<SortState<R>>>,
	subscribers: Subscribers<SortChange>,
}

impl<R> SortingState<R> {
	/// Creates an unsorted state.
	pub fn new() -> Self {
		Self {
			state: Arc::new(RwLock::new(SortState {
				sort: None,
				comparator: None,
				generation: 0,
			})),
			subscribers: Subscribers::new(),
		}
	}

	/// The current sort, or `None` when unsorted.
	pub fn current(&self) -> Option<SortSpec> {
		self.state.read().sort.clone()
	}

	/// The active comparator, if any.
	pub fn comparator(&self) -> Option<RecordComparator<R>> {
		self.state.read().comparator.clone()
	}

	/// Monotonic counter, bumped by every applied [`set_sort`](Self::set_sort).
	/// Lets a buffering strategy detect that its buffer order is stale.
	pub fn generation(&self) -> u64 {
		self.state.read().generation
	}

	/// Subscribes to sort changes.
	pub fn subscribe<F>(&self, receiver: F) -> Subscription
	where
		F: Fn(&SortChange) + Send + Sync + 'static,
	{
		self.subscribers.subscribe(receiver)
	}

	/// Removes a subscription.
	pub fn unsubscribe(&self, subscription: Subscription) {
		self.subscribers.unsubscribe(subscription)
	}

	/// Replaces key, direction, and comparator atomically; notifies once.
	///
	/// Re-setting an identical spec without a comparator override is a no-op
	/// and emits nothing. Returns true when the sort changed.
	pub fn set_sort(&self, spec: SortSpec, comparator: Option<RecordComparator<R>>) -> bool {
		{
			let mut state = self.state.write();
			if state.sort.as_ref() == Some(&spec) && comparator.is_none() {
				return false;
			}
			state.sort = Some(spec.clone());
			state.comparator = comparator;
			state.generation += 1;
		}
		self.subscribers.emit(&SortChange { sort: Some(spec) });
		true
	}
}

impl<R> Clone for SortingState<R> {
	fn clone(&self) -> Self {
		Self {
			state: Arc::clone(&self.state),
			subscribers: self.subscribers.clone(),
		}
	}
}

impl<R> Default for SortingState<R> {
	fn default() -> Self {
		Self::new()
	}
}

impl<R> std::fmt::Debug for SortingState<R> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("SortingState")
			.field("sort", &self.current())
			.finish_non_exhaustive()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use parking_lot::Mutex;

	#[test]
	fn toggle_cycles_ascending_descending_ascending() {
		let mut current: Option<SortSpec> = None;
		let mut seen = Vec::new();
		for _ in 0..3 {
			let dir = SortSpec::toggled(current.as_ref(), "name");
			current = Some(SortSpec::new("name", dir));
			seen.push(dir);
		}
		assert_eq!(
			seen,
			vec![
				SortDirection::Ascending,
				SortDirection::Descending,
				SortDirection::Ascending
			]
		);
	}

	#[test]
	fn selecting_a_new_key_starts_ascending() {
		let current = Some(SortSpec::new("name", SortDirection::Descending));
		assert_eq!(SortSpec::toggled(current.as_ref(), "age"), SortDirection::Ascending);
	}

	#[test]
	fn set_sort_notifies_once_and_is_idempotent() {
		let state: SortingState<()> = SortingState::new();
		let events = Arc::new(Mutex::new(Vec::new()));
		state.subscribe({
			let events = Arc::clone(&events);
			move |change: &SortChange| events.lock().push(change.clone())
		});

		assert!(state.set_sort(SortSpec::new("name", SortDirection::Ascending), None));
		assert!(!state.set_sort(SortSpec::new("name", SortDirection::Ascending), None));
		assert_eq!(events.lock().len(), 1);
	}
}
