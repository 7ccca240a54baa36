//! Pagination state.
//!
//! [`PaginationState`] is a cheaply cloneable handle (all clones share the
//! same fields and subscriber list). Every mutation settles the derived
//! fields first, releases its lock, and then emits a single batched
//! [`PaginationChange`] naming exactly the fields that changed.

use crate::error::{GridError, Result};
use crate::events::{Subscribers, Subscription};
use parking_lot::RwLock;
use std::sync::Arc;

/// Default page size when a configuration does not specify one.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// A consistent snapshot of all pagination fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSnapshot {
	/// Records per page; 0 means unbounded (all records in one page)
	pub page_size: usize,
	/// Zero-based index of the current page
	pub current_page: usize,
	/// Derived: total number of pages
	pub total_pages: usize,
	/// Total records in the underlying data set
	pub total_records: usize,
}

impl PageSnapshot {
	/// Recomputes `total_pages` and clamps `current_page`, returning which
	/// of the two derived fields actually moved.
	fn settle(&mut self) -> (bool, bool) {
		let total_pages = if self.total_records == 0 {
			0
		} else if self.page_size == 0 {
			1
		} else {
			self.total_records.div_ceil(self.page_size)
		};
		let pages_changed = total_pages != self.total_pages;
		self.total_pages = total_pages;

		let clamped = self.current_page.min(self.total_pages.max(1) - 1);
		let page_changed = clamped != self.current_page;
		self.current_page = clamped;

		(pages_changed, page_changed)
	}
}

/// The set of fields touched by one mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ChangedFields {
	/// `current_page` changed
	pub current_page: bool,
	/// `page_size` changed
	pub page_size: bool,
	/// `total_pages` changed
	pub total_pages: bool,
	/// `total_records` changed
	pub total_records: bool,
}

impl ChangedFields {
	/// True when any field changed.
	pub fn any(&self) -> bool {
		self.current_page || self.page_size || self.total_pages || self.total_records
	}

	/// True when the visible window must be recomputed.
	pub fn page_affecting(&self) -> bool {
		self.current_page || self.page_size || self.total_pages
	}
}

/// Batched change event: the fields that changed plus the settled state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationChange {
	/// Which fields changed in this mutation
	pub changed: ChangedFields,
	/// The state after the mutation
	pub state: PageSnapshot,
}

/// Navigation target for paginator controls.
///
/// Resolution is pure arithmetic over a [`PageSnapshot`]; fast-forward
/// targets saturate at the first/last page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageTarget {
	/// Jump to page 0
	First,
	/// One page back, saturating at 0
	Prev,
	/// One page forward, saturating at the last page
	Next,
	/// Jump to the last page
	Last,
	/// An explicit zero-based page index
	Index(usize),
}

impl PageTarget {
	/// Resolves this target to a concrete page index under `state`.
	pub fn resolve(&self, state: &PageSnapshot) -> usize {
		let last = state.total_pages.max(1) - 1;
		match self {
			PageTarget::First => 0,
			PageTarget::Prev => state.current_page.saturating_sub(1),
			PageTarget::Next => (state.current_page + 1).min(last),
			PageTarget::Last => last,
			PageTarget::Index(index) => *index,
		}
	}
}

/// Pagination state handle.
///
/// Mutations are validated synchronously; a rejected mutation leaves state
/// unchanged and emits nothing. Setting a field to its current value is a
/// no-op and emits nothing.
#[derive(Debug, Clone)]
pub struct PaginationState {
	state: Arc<RwLock<PageSnapshot>>,
	subscribers: Subscribers<PaginationChange>,
}

impl PaginationState {
	/// Creates a state with the given page size, positioned on page 0 of an
	/// empty (not yet loaded) record set.
	pub fn new(page_size: usize) -> Self {
		Self {
			state: Arc::new(RwLock::new(PageSnapshot {
				page_size,
				current_page: 0,
				total_pages: 0,
				total_records: 0,
			})),
			subscribers: Subscribers::new(),
		}
	}

	/// A consistent snapshot of all fields.
	pub fn snapshot(&self) -> PageSnapshot {
		*self.state.read()
	}

	/// Records per page (0 = unbounded).
	pub fn page_size(&self) -> usize {
		self.state.read().page_size
	}

	/// Zero-based current page index.
	pub fn current_page(&self) -> usize {
		self.state.read().current_page
	}

	/// Derived total page count.
	pub fn total_pages(&self) -> usize {
		self.state.read().total_pages
	}

	/// Total records in the underlying data set.
	pub fn total_records(&self) -> usize {
		self.state.read().total_records
	}

	/// Subscribes to batched change events.
	pub fn subscribe<F>(&self, receiver: F) -> Subscription
	where
		F: Fn(&PaginationChange) + Send + Sync + 'static,
	{
		self.subscribers.subscribe(receiver)
	}

	/// Removes a subscription.
	pub fn unsubscribe(&self, subscription: Subscription) {
		self.subscribers.unsubscribe(subscription)
	}

	/// Moves to the given zero-based page.
	///
	/// Rejects indexes at or beyond `max(total_pages, 1)` with
	/// [`GridError::InvalidPage`] and leaves state unchanged.
	pub fn set_current_page(&self, page: usize) -> Result<ChangedFields> {
		let mut changed = ChangedFields::default();
		{
			let mut state = self.state.write();
			if page >= state.total_pages.max(1) {
				return Err(GridError::InvalidPage {
					index: page,
					total_pages: state.total_pages,
				});
			}
			if page == state.current_page {
				return Ok(changed);
			}
			state.current_page = page;
			changed.current_page = true;
		}
		self.emit(changed);
		Ok(changed)
	}

	/// Moves to a [`PageTarget`], clamping fast-forward targets.
	pub fn set_page_target(&self, target: PageTarget) -> Result<ChangedFields> {
		let index = target.resolve(&self.snapshot());
		self.set_current_page(index)
	}

	/// Changes the page size and recomputes the derived fields.
	///
	/// A page size of 0 collapses the collection to a single unbounded page.
	pub fn set_page_size(&self, page_size: usize) -> ChangedFields {
		let mut changed = ChangedFields::default();
		{
			let mut state = self.state.write();
			if page_size == state.page_size {
				return changed;
			}
			state.page_size = page_size;
			changed.page_size = true;
			let (pages, page) = state.settle();
			changed.total_pages = pages;
			changed.current_page = page;
		}
		self.emit(changed);
		changed
	}

	/// Sets the total record count.
	///
	/// This is the one mutation a paging strategy performs when the data set
	/// size becomes known. Recomputes `total_pages` and clamps
	/// `current_page`.
	pub fn set_total_records(&self, total_records: usize) -> ChangedFields {
		let mut changed = ChangedFields::default();
		{
			let mut state = self.state.write();
			if total_records == state.total_records {
				return changed;
			}
			state.total_records = total_records;
			changed.total_records = true;
			let (pages, page) = state.settle();
			changed.total_pages = pages;
			changed.current_page = page;
		}
		self.emit(changed);
		changed
	}

	/// The run of page indexes a paginator should display, at most `window`
	/// wide and centred on the current page where possible.
	pub fn page_window(&self, window: usize) -> std::ops::Range<usize> {
		let state = self.snapshot();
		if state.total_pages == 0 || window == 0 {
			return 0..0;
		}
		let start = state
			.current_page
			.saturating_sub(window / 2)
			.min(state.total_pages.saturating_sub(window));
		let end = (start + window).min(state.total_pages);
		start..end
	}

	fn emit(&self, changed: ChangedFields) {
		if changed.any() {
			let state = self.snapshot();
			tracing::trace!(?changed, ?state, "pagination changed");
			self.subscribers.emit(&PaginationChange { changed, state });
		}
	}
}

impl Default for PaginationState {
	fn default() -> Self {
		Self::new(DEFAULT_PAGE_SIZE)
	}
}
