//! Error types for pagegrid

use thiserror::Error;

/// Errors produced by the collection, states, and strategies.
///
/// Validation and configuration errors are synchronous and leave state
/// unchanged; fetch errors leave the pagination fields and the visible window
/// at their last-known-good values. All three are recoverable by the caller
/// (corrected input, or re-issuing the same request).
#[derive(Debug, Error)]
pub enum GridError {
	/// Requested page index is outside the valid range
	#[error("Invalid page index {index}: collection has {total_pages} page(s)")]
	InvalidPage {
		/// The rejected page index
		index: usize,
		/// Total pages at the time of the request
		total_pages: usize,
	},

	/// Sort request names an unknown or non-sortable column
	#[error("Invalid sort: {0}")]
	InvalidSort(String),

	/// A required construction parameter is missing or unusable
	#[error("Configuration error: {0}")]
	Config(String),

	/// A page or initial-load fetch failed
	#[error("Fetch failed: {0}")]
	Fetch(String),
}

/// Result type for pagegrid operations
pub type Result<T> = std::result::Result<T, GridError>;
