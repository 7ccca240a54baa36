//! Client-side (fully buffered) paging.

use crate::error::{GridError, Result};
use crate::pagination::{PageSnapshot, PaginationState};
use crate::sorting::SortingState;
use crate::source::DataSource;
use crate::strategy::{PageFetch, PagingStrategy};
use async_trait::async_trait;
use parking_lot::{Mutex, RwLock};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::oneshot;

enum LoadState {
	NotLoaded,
	Loading(Vec<oneshot::Sender<bool>>),
	Ready,
}

enum Role {
	Loader,
	Waiter(oneshot::Receiver<bool>),
	Done,
}

/// Strategy that buffers the entire data set locally.
///
/// One [`fetch_all`](DataSource::fetch_all) populates the buffer; page
/// requests slice it in-process and sort requests re-sort it in place
/// (stably). Page or sort requests issued before the load completes are
/// deferred on a readiness gate and replayed exactly once after it opens;
/// none executes against partial data. A failed load reopens the gate so the
/// same request can be retried.
pub struct ClientSidePaging<R> {
	source: Arc<dyn DataSource<R>>,
	buffer: RwLock<Vec<R>>,
	load_state: Mutex<LoadState>,
	// Sort generation already applied to the buffer.
	sorted_generation: AtomicU64,
}

impl<R: Clone + Send + Sync + 'static> ClientSidePaging<R> {
	/// Creates the strategy over the given source.
	pub fn new(source: Arc<dyn DataSource<R>>) -> Self {
		Self {
			source,
			buffer: RwLock::new(Vec::new()),
			load_state: Mutex::new(LoadState::NotLoaded),
			sorted_generation: AtomicU64::new(0),
		}
	}

	/// Slice of the buffer for the snapshot's page, or the whole buffer when
	/// the page size is 0. An index at or beyond the last page yields an
	/// empty window.
	fn slice(buffer: &[R], state: &PageSnapshot) -> Vec<R> {
		if state.page_size == 0 {
			return buffer.to_vec();
		}
		let start = state.current_page * state.page_size;
		if start >= buffer.len() {
			return Vec::new();
		}
		let end = (start + state.page_size).min(buffer.len());
		buffer[start..end].to_vec()
	}

	fn sync_sort(&self, sorting: &SortingState<R>) {
		let generation = sorting.generation();
		if self.sorted_generation.load(Ordering::Acquire) == generation {
			return;
		}
		if let Some(cmp) = sorting.comparator() {
			// Vec::sort_by is stable: equal keys keep their relative order.
			self.buffer.write().sort_by(|a, b| cmp(a, b));
		}
		self.sorted_generation.store(generation, Ordering::Release);
	}
}

#[async_trait]
impl<R: Clone + Send + Sync + 'static> PagingStrategy<R> for ClientSidePaging<R> {
	async fn load(&self, pagination: &PaginationState) -> Result<()> {
		let role = {
			let mut state = self.load_state.lock();
			match &mut *state {
				LoadState::NotLoaded => {
					*state = LoadState::Loading(Vec::new());
					Role::Loader
				}
				LoadState::Loading(waiters) => {
					let (tx, rx) = oneshot::channel();
					waiters.push(tx);
					Role::Waiter(rx)
				}
				LoadState::Ready => Role::Done,
			}
		};

		match role {
			Role::Done => Ok(()),
			Role::Waiter(rx) => match rx.await {
				Ok(true) => Ok(()),
				_ => Err(GridError::Fetch("initial load failed".into())),
			},
			Role::Loader => {
				let fetched = self.source.fetch_all().await;
				let (outcome, waiters) = {
					let mut state = self.load_state.lock();
					let waiters = match std::mem::replace(&mut *state, LoadState::NotLoaded) {
						LoadState::Loading(waiters) => waiters,
						_ => Vec::new(),
					};
					match fetched {
						Ok(records) => {
							let count = records.len();
							*self.buffer.write() = records;
							// Fresh buffer contents are unsorted; a sort applied
							// before readiness must be re-applied by the next
							// page request.
							self.sorted_generation.store(0, Ordering::Release);
							*state = LoadState::Ready;
							(Ok(count), waiters)
						}
						// Gate stays reopened so the load can be retried.
						Err(err) => (Err(err), waiters),
					}
				};
				match outcome {
					Ok(count) => {
						tracing::debug!(records = count, "full data set buffered");
						pagination.set_total_records(count);
						for waiter in waiters {
							let _ = waiter.send(true);
						}
						Ok(())
					}
					Err(err) => {
						tracing::warn!(error = %err, "initial load failed");
						for waiter in waiters {
							let _ = waiter.send(false);
						}
						Err(err)
					}
				}
			}
		}
	}

	async fn page(
		&self,
		pagination: &PaginationState,
		sorting: &SortingState<R>,
	) -> Result<PageFetch<R>> {
		// Defers until the buffer is ready; replays this request exactly once.
		self.load(pagination).await?;
		self.sync_sort(sorting);
		let snapshot = pagination.snapshot();
		let buffer = self.buffer.read();
		Ok(PageFetch {
			records: Self::slice(&buffer, &snapshot),
			total_records: buffer.len(),
		})
	}

	fn apply_sort(&self, sorting: &SortingState<R>) {
		self.sync_sort(sorting);
	}
}

impl<R> std::fmt::Debug for ClientSidePaging<R> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("ClientSidePaging")
			.field("buffered", &self.buffer.read().len())
			.finish_non_exhaustive()
	}
}
