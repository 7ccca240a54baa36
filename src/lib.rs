//! Pagegrid: reactive pagination and sorting for table widgets.
//!
//! This facade re-exports the whole of [`pagegrid_core`]; enable the `http`
//! feature to also pull in the reqwest-backed data source from
//! [`pagegrid_http`].
//!
//! ```ignore
//! use pagegrid::{CollectionConfig, Column, PagingMode};
//!
//! let collection = CollectionConfig::new()
//!     .source(source)
//!     .mode(PagingMode::ServerSide)
//!     .page_size(25)
//!     .column(Column::new("name", |u: &User| u.name.as_str().into()))
//!     .build()?;
//! collection.load().await?;
//! ```

pub use pagegrid_core::*;

#[cfg(feature = "http")]
pub use pagegrid_http::HttpDataSource;
