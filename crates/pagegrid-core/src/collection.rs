//! The pageable collection.
//!
//! [`PageableCollection`] owns exactly one [`PaginationState`], one
//! [`SortingState`], and one strategy instance, and keeps its visible window
//! consistent with them. All user mutation goes through the collection's call
//! surface; the state handles are exposed read-mostly so views can subscribe
//! to their change events directly.

use crate::columns::{Column, RecordComparator};
use crate::error::{GridError, Result};
use crate::events::{Subscribers, Subscription};
use crate::pagination::{DEFAULT_PAGE_SIZE, PageTarget, PaginationState};
use crate::sorting::{SortDirection, SortSpec, SortingState};
use crate::source::DataSource;
use crate::strategy::{ClientSidePaging, PagingStrategy, ServerSidePaging};
use parking_lot::RwLock;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

/// Which paging strategy a collection is built with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PagingMode {
	/// Buffer the full data set locally and slice pages in-process
	#[default]
	ClientSide,
	/// Delegate every page/sort change to the remote source
	ServerSide,
}

/// Collection refresh phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshPhase {
	/// The visible window matches the current state
	Idle,
	/// At least one page/sort recompute is in flight
	Refreshing,
}

/// Events emitted by a [`PageableCollection`].
#[derive(Debug, Clone)]
pub enum CollectionEvent<R> {
	/// The visible window was replaced
	Reset {
		/// The new visible window
		records: Vec<R>,
	},
	/// The refresh phase changed
	Phase(RefreshPhase),
}

/// What became of one refresh request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
	/// The response was applied to the visible window
	Applied,
	/// A newer request was issued while this one was in flight; the stale
	/// response was dropped
	Superseded,
}

/// Construction-time configuration for a [`PageableCollection`].
///
/// Replaces registry-style wiring with an explicit value: data source, paging
/// mode, column definitions, and initial page size all arrive here, and
/// [`build`](Self::build) validates the required pieces up front.
pub struct CollectionConfig<R> {
	source: Option<Arc<dyn DataSource<R>>>,
	mode: PagingMode,
	columns: Vec<Column<R>>,
	page_size: usize,
}

impl<R: Clone + Send + Sync + 'static> CollectionConfig<R> {
	/// Starts an empty configuration (client-side mode, default page size).
	pub fn new() -> Self {
		Self {
			source: None,
			mode: PagingMode::default(),
			columns: Vec::new(),
			page_size: DEFAULT_PAGE_SIZE,
		}
	}

	/// Sets the data source. Required.
	pub fn source(mut self, source: Arc<dyn DataSource<R>>) -> Self {
		self.source = Some(source);
		self
	}

	/// Selects the paging strategy.
	pub fn mode(mut self, mode: PagingMode) -> Self {
		self.mode = mode;
		self
	}

	/// Sets the initial page size (0 = unbounded).
	pub fn page_size(mut self, page_size: usize) -> Self {
		self.page_size = page_size;
		self
	}

	/// Appends one column definition. At least one is required.
	pub fn column(mut self, column: Column<R>) -> Self {
		self.columns.push(column);
		self
	}

	/// Appends several column definitions.
	pub fn columns(mut self, columns: impl IntoIterator<Item = Column<R>>) -> Self {
		self.columns.extend(columns);
		self
	}

	/// Validates the configuration and builds the collection.
	///
	/// A missing data source or an empty column set is fatal here, before any
	/// state exists.
	pub fn build(self) -> Result<PageableCollection<R>> {
		let source = self
			.source
			.ok_or_else(|| GridError::Config("a data source is required".into()))?;
		if self.columns.is_empty() {
			return Err(GridError::Config(
				"at least one column definition is required".into(),
			));
		}
		let strategy: Arc<dyn PagingStrategy<R>> = match self.mode {
			PagingMode::ClientSide => Arc::new(ClientSidePaging::new(source)),
			PagingMode::ServerSide => Arc::new(ServerSidePaging::new(source)),
		};
		Ok(PageableCollection {
			pagination: PaginationState::new(self.page_size),
			sorting: SortingState::new(),
			strategy,
			columns: Arc::from(self.columns),
			visible: Arc::new(RwLock::new(Vec::new())),
			subscribers: Subscribers::new(),
			issued: Arc::new(AtomicU64::new(0)),
			in_flight: Arc::new(AtomicUsize::new(0)),
		})
	}
}

impl<R: Clone + Send + Sync + 'static> Default for CollectionConfig<R> {
	fn default() -> Self {
		Self::new()
	}
}

impl<R> std::fmt::Debug for CollectionConfig<R> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("CollectionConfig")
			.field("mode", &self.mode)
			.field("columns", &self.columns.len())
			.field("page_size", &self.page_size)
			.field("has_source", &self.source.is_some())
			.finish()
	}
}

/// An observable, pageable, sortable window over a record set.
///
/// Cheap to clone; clones share all state. Mutations are async because a
/// refresh may suspend on the data source, but every state-change
/// notification is delivered synchronously, in mutation order, before the
/// mutating call returns from the respective state update.
pub struct PageableCollection<R> {
	pagination: PaginationState,
	sorting: SortingState<R>,
	strategy: Arc<dyn PagingStrategy<R>>,
	columns: Arc<[Column<R>]>,
	visible: Arc<RwLock<Vec<R>>>,
	subscribers: Subscribers<CollectionEvent<R>>,
	// Monotonic refresh sequence: the newest issued request wins.
	issued: Arc<AtomicU64>,
	in_flight: Arc<AtomicUsize>,
}

impl<R: Clone + Send + Sync + 'static> PageableCollection<R> {
	/// Performs the strategy's up-front load and the first refresh.
	pub async fn load(&self) -> Result<()> {
		self.strategy.load(&self.pagination).await?;
		self.refresh().await?;
		Ok(())
	}

	/// Moves to the given zero-based page and refreshes the window.
	///
	/// Out-of-range pages are rejected before any mutation; callers resolving
	/// paginator clicks should go through [`set_page_target`](Self::set_page_target),
	/// which clamps fast-forward targets.
	pub async fn set_current_page(&self, page: usize) -> Result<()> {
		let changed = self.pagination.set_current_page(page)?;
		if changed.page_affecting() {
			self.refresh().await?;
		}
		Ok(())
	}

	/// Resolves a [`PageTarget`] and moves there.
	pub async fn set_page_target(&self, target: PageTarget) -> Result<()> {
		let changed = self.pagination.set_page_target(target)?;
		if changed.page_affecting() {
			self.refresh().await?;
		}
		Ok(())
	}

	/// Changes the page size (0 = unbounded) and refreshes the window.
	pub async fn set_page_size(&self, page_size: usize) -> Result<()> {
		let changed = self.pagination.set_page_size(page_size);
		if changed.page_affecting() {
			self.refresh().await?;
		}
		Ok(())
	}

	/// Sorts by a column, deriving the comparator from its value extractor.
	///
	/// Rejects unknown and non-sortable columns.
	pub async fn set_sort(&self, key: &str, direction: SortDirection) -> Result<()> {
		let column = self
			.columns
			.iter()
			.find(|c| c.key() == key)
			.ok_or_else(|| GridError::InvalidSort(format!("unknown column '{key}'")))?;
		if !column.is_sortable() {
			return Err(GridError::InvalidSort(format!(
				"column '{key}' is not sortable"
			)));
		}
		let spec = SortSpec::new(key, direction);
		// Re-issuing the active sort is a no-op, like set_current_page to the
		// current page: the column-derived comparator cannot have changed.
		if self.sorting.current().as_ref() == Some(&spec) {
			return Ok(());
		}
		let comparator = column.comparator_for(direction);
		self.install_sort(spec, comparator).await
	}

	/// Sorts with an explicit comparator override instead of the column
	/// default.
	pub async fn set_sort_with(
		&self,
		key: &str,
		direction: SortDirection,
		comparator: RecordComparator<R>,
	) -> Result<()> {
		self.install_sort(SortSpec::new(key, direction), comparator)
			.await
	}

	/// Cycles the sort for a column-header click: unsorted/descending (or a
	/// different key) goes ascending; ascending flips to descending.
	pub async fn toggle_sort(&self, key: &str) -> Result<()> {
		let direction = SortSpec::toggled(self.sorting.current().as_ref(), key);
		self.set_sort(key, direction).await
	}

	async fn install_sort(&self, spec: SortSpec, comparator: RecordComparator<R>) -> Result<()> {
		if self.sorting.set_sort(spec, Some(comparator)) {
			self.strategy.apply_sort(&self.sorting);
			self.refresh().await?;
		}
		Ok(())
	}

	/// Recomputes the visible window through the strategy.
	///
	/// Refreshes may overlap (server strategy); the response of the most
	/// recently issued request is the only one applied. Stale responses are
	/// dropped, never partially applied.
	pub async fn refresh(&self) -> Result<RefreshOutcome> {
		let seq = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
		if self.in_flight.fetch_add(1, Ordering::SeqCst) == 0 {
			self.subscribers
				.emit(&CollectionEvent::Phase(RefreshPhase::Refreshing));
		}
		let result = self.run_refresh(seq).await;
		if self.in_flight.fetch_sub(1, Ordering::SeqCst) == 1 {
			self.subscribers
				.emit(&CollectionEvent::Phase(RefreshPhase::Idle));
		}
		result
	}

	async fn run_refresh(&self, seq: u64) -> Result<RefreshOutcome> {
		loop {
			let requested = self.pagination.current_page();
			let fetch = self.strategy.page(&self.pagination, &self.sorting).await?;
			if self.issued.load(Ordering::SeqCst) != seq {
				tracing::debug!(seq, "dropping superseded page response");
				return Ok(RefreshOutcome::Superseded);
			}
			// Only the newest request may touch pagination: applying the count
			// here keeps a superseded response from clamping or re-deriving
			// anything after a newer response settled.
			self.pagination.set_total_records(fetch.total_records);
			// A shrunken record count may have clamped the current page out
			// from under the request; fetch the clamped page before settling.
			if self.pagination.current_page() != requested {
				continue;
			}
			*self.visible.write() = fetch.records.clone();
			self.subscribers.emit(&CollectionEvent::Reset {
				records: fetch.records,
			});
			return Ok(RefreshOutcome::Applied);
		}
	}

	/// The records currently exposed to rendering.
	pub fn visible_records(&self) -> Vec<R> {
		self.visible.read().clone()
	}

	/// The pagination state handle.
	pub fn pagination(&self) -> &PaginationState {
		&self.pagination
	}

	/// The sorting state handle.
	pub fn sorting(&self) -> &SortingState<R> {
		&self.sorting
	}

	/// The column definitions.
	pub fn columns(&self) -> &[Column<R>] {
		&self.columns
	}

	/// Current refresh phase.
	pub fn phase(&self) -> RefreshPhase {
		if self.in_flight.load(Ordering::SeqCst) > 0 {
			RefreshPhase::Refreshing
		} else {
			RefreshPhase::Idle
		}
	}

	/// Subscribes to reset and phase events.
	pub fn subscribe<F>(&self, receiver: F) -> Subscription
	where
		F: Fn(&CollectionEvent<R>) + Send + Sync + 'static,
	{
		self.subscribers.subscribe(receiver)
	}

	/// Removes a subscription.
	pub fn unsubscribe(&self, subscription: Subscription) {
		self.subscribers.unsubscribe(subscription)
	}
}

impl<R> Clone for PageableCollection<R> {
	fn clone(&self) -> Self {
		Self {
			pagination: self.pagination.clone(),
			sorting: self.sorting.clone(),
			strategy: Arc::clone(&self.strategy),
			columns: Arc::clone(&self.columns),
			visible: Arc::clone(&self.visible),
			subscribers: self.subscribers.clone(),
			issued: Arc::clone(&self.issued),
			in_flight: Arc::clone(&self.in_flight),
		}
	}
}

impl<R> std::fmt::Debug for PageableCollection<R> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("PageableCollection")
			.field("pagination", &self.pagination)
			.field("sorting", &self.sorting)
			.field("visible", &self.visible.read().len())
			.finish_non_exhaustive()
	}
}
