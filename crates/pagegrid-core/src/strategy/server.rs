//! Server-side (delegated) paging.

use crate::error::Result;
use crate::pagination::PaginationState;
use crate::sorting::SortingState;
use crate::source::{DataSource, PageQuery};
use crate::strategy::{PageFetch, PagingStrategy};
use async_trait::async_trait;
use std::sync::Arc;

/// Strategy that delegates page and sort selection to the remote source.
///
/// Every page/size/sort change maps to exactly one fetch; the response is
/// trusted verbatim for both the page content and the total record count, and
/// no local slicing or sorting happens. Staleness of overlapping responses is
/// not this strategy's concern: the collection drops superseded results by
/// request sequence number, which is also why the total count travels back in
/// the [`PageFetch`] instead of being written into pagination here.
pub struct ServerSidePaging<R> {
	source: Arc<dyn DataSource<R>>,
}

impl<R: Send + Sync + 'static> ServerSidePaging<R> {
	/// Creates the strategy over the given source.
	pub fn new(source: Arc<dyn DataSource<R>>) -> Self {
		Self { source }
	}
}

#[async_trait]
impl<R: Send + Sync + 'static> PagingStrategy<R> for ServerSidePaging<R> {
	async fn load(&self, _pagination: &PaginationState) -> Result<()> {
		// Nothing to prepare: the first page fetch establishes the count.
		Ok(())
	}

	async fn page(
		&self,
		pagination: &PaginationState,
		sorting: &SortingState<R>,
	) -> Result<PageFetch<R>> {
		let query = PageQuery::new(&pagination.snapshot(), sorting.current().as_ref());
		tracing::debug!(
			page = query.current_page,
			page_size = query.page_size,
			sort = query.sort.as_deref(),
			"fetching page from source"
		);
		let response = self.source.fetch_page(&query).await?;
		Ok(PageFetch {
			records: response.records,
			total_records: response.total_count,
		})
	}

	fn apply_sort(&self, _sorting: &SortingState<R>) {
		// The next page fetch carries the sort parameters.
	}
}

impl<R> std::fmt::Debug for ServerSidePaging<R> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("ServerSidePaging").finish_non_exhaustive()
	}
}
