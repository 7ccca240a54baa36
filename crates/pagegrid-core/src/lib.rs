//! Reactive pagination/sorting core for table widgets.
//!
//! This crate keeps a visible window of records consistent with a
//! [`PaginationState`], a [`SortingState`], and a pluggable [`PagingStrategy`],
//! delivering synchronous, ordered change notifications to subscribers.
//! Rendering is deliberately out of scope: a view layer subscribes to the
//! collection and the state handles and redraws from the snapshots it is
//! handed.
//!
//! # Architecture
//!
//! - [`PaginationState`]: page size, current page, derived total pages; clamps
//!   and recomputes on every mutation and emits one batched change event.
//! - [`SortingState`]: sort key + direction with an optional comparator
//!   override; column-header toggling cycles direction.
//! - [`PagingStrategy`]: answers "give me page N under sort S" either from a
//!   locally buffered copy of the full record set ([`ClientSidePaging`]) or by
//!   delegating every page/sort change to a remote fetch ([`ServerSidePaging`]).
//! - [`PageableCollection`]: owns one of each, orchestrates refreshes, and
//!   resolves overlapping in-flight fetches by request sequence number
//!   (last request wins).
//!
//! # Example
//!
//! ```ignore
//! use pagegrid_core::{CollectionConfig, Column, PagingMode, SortDirection};
//!
//! let collection = CollectionConfig::new()
//!     .source(source)
//!     .mode(PagingMode::ClientSide)
//!     .page_size(10)
//!     .column(Column::new("name", |u: &User| u.name.as_str().into()))
//!     .build()?;
//!
//! collection.load().await?;
//! collection.set_current_page(2).await?;
//! collection.toggle_sort("name").await?;
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::broken_intra_doc_links)]

pub mod collection;
pub mod columns;
pub mod error;
pub mod events;
pub mod pagination;
pub mod sorting;
pub mod source;
pub mod strategy;
pub mod value;

pub use collection::{
	CollectionConfig, CollectionEvent, PageableCollection, PagingMode, RefreshOutcome, RefreshPhase,
};
pub use columns::{Column, RecordComparator};
pub use error::{GridError, Result};
pub use events::{Subscribers, Subscription};
pub use pagination::{
	ChangedFields, DEFAULT_PAGE_SIZE, PageSnapshot, PageTarget, PaginationChange, PaginationState,
};
pub use sorting::{SortChange, SortDirection, SortSpec, SortingState};
pub use source::{DataSource, InMemorySource, PageQuery, PageResponse};
pub use strategy::{ClientSidePaging, PageFetch, PagingStrategy, ServerSidePaging};
pub use value::CellValue;
