//! Paging strategies.
//!
//! A strategy answers "give me the current page under the current sort",
//! either from a locally buffered full copy of the data set
//! ([`ClientSidePaging`]) or by delegating each request to the remote source
//! ([`ServerSidePaging`]). Strategies are selected at construction time via
//! [`PagingMode`](crate::collection::PagingMode); the collection only talks to
//! the trait.
//!
//! A page answer carries the authoritative record count alongside the records
//! rather than writing it into shared state itself: the collection applies
//! the count only after its staleness check, so a superseded response cannot
//! touch pagination. The one direct mutation a strategy performs is the
//! client strategy's
//! [`PaginationState::set_total_records`](crate::pagination::PaginationState::set_total_records)
//! when its one-time full load completes.

mod client;
mod server;

pub use client::ClientSidePaging;
pub use server::ServerSidePaging;

use crate::error::Result;
use crate::pagination::PaginationState;
use crate::sorting::SortingState;
use async_trait::async_trait;

/// One strategy answer: page content plus the record count it was computed
/// against.
#[derive(Debug, Clone)]
pub struct PageFetch<R> {
	/// The records of the requested page
	pub records: Vec<R>,
	/// Total records in the data set at the time of the fetch
	pub total_records: usize,
}

/// The pluggable algorithm behind a pageable collection.
#[async_trait]
pub trait PagingStrategy<R>: Send + Sync {
	/// Performs any up-front work: the client strategy fetches and buffers
	/// the full data set; the server strategy has nothing to prepare.
	async fn load(&self, pagination: &PaginationState) -> Result<()>;

	/// Produces the current page under the current sort.
	///
	/// The returned records become the collection's visible window verbatim;
	/// the strategy is responsible for any slicing. The returned count is
	/// applied to pagination by the collection, never by the strategy.
	async fn page(
		&self,
		pagination: &PaginationState,
		sorting: &SortingState<R>,
	) -> Result<PageFetch<R>>;

	/// Reacts to a sort change that does not require a fetch (the client
	/// strategy re-sorts its buffer; the server strategy does nothing, the
	/// next page fetch carries the sort parameters).
	fn apply_sort(&self, sorting: &SortingState<R>);
}
