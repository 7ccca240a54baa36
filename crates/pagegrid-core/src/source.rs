//! Data sources and the page-fetch wire shapes.
//!
//! A [`DataSource`] is the single suspension point in the system: strategies
//! call it and everything else is synchronous. The client-side strategy uses
//! [`DataSource::fetch_all`] once; the server-side strategy issues one
//! [`DataSource::fetch_page`] per page/size/sort change.

use crate::columns::Column;
use crate::error::Result;
use crate::pagination::PageSnapshot;
use crate::sorting::SortSpec;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Query parameters for one page fetch.
///
/// Serializes to the widget's query-string vocabulary:
/// `currentPage`, `pageSize`, `sort`, `dir`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageQuery {
	/// Zero-based page index to fetch
	pub current_page: usize,
	/// Records per page; 0 asks for the whole set
	pub page_size: usize,
	/// Sort key, if sorted
	#[serde(skip_serializing_if = "Option::is_none")]
	pub sort: Option<String>,
	/// Sort direction ("asc" / "desc"), if sorted
	#[serde(skip_serializing_if = "Option::is_none")]
	pub dir: Option<String>,
}

impl PageQuery {
	/// Builds the query for the given pagination snapshot and sort.
	pub fn new(state: &PageSnapshot, sort: Option<&SortSpec>) -> Self {
		Self {
			current_page: state.current_page,
			page_size: state.page_size,
			sort: sort.map(|s| s.key.clone()),
			dir: sort.map(|s| s.direction.as_query().to_string()),
		}
	}
}

/// One page of records plus the authoritative total count.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse<R> {
	/// The page content, already sorted and sliced by the source
	pub records: Vec<R>,
	/// Total records in the data set
	pub total_count: usize,
}

/// An external source of records.
#[async_trait]
pub trait DataSource<R>: Send + Sync {
	/// Fetches the entire, unfiltered record set.
	async fn fetch_all(&self) -> Result<Vec<R>>;

	/// Fetches one page. The source is trusted for both the page content and
	/// the total count.
	async fn fetch_page(&self, query: &PageQuery) -> Result<PageResponse<R>>;
}

/// An in-memory source, mostly useful for demos and tests.
///
/// For page fetches it behaves like a well-behaved remote backend: it sorts a
/// copy of its records by the column named in the query, slices the page, and
/// reports the total count.
pub struct InMemorySource<R> {
	records: Vec<R>,
	columns: Vec<Column<R>>,
}

impl<R: Clone + Send + Sync + 'static> InMemorySource<R> {
	/// Creates a source over the given records.
	pub fn new(records: Vec<R>) -> Self {
		Self {
			records,
			columns: Vec::new(),
		}
	}

	/// Supplies column definitions so page fetches can honor sort parameters.
	/// Sort keys without a matching column are ignored.
	pub fn with_columns(mut self, columns: Vec<Column<R>>) -> Self {
		self.columns = columns;
		self
	}

	fn sorted(&self, query: &PageQuery) -> Vec<R> {
		let mut records = self.records.clone();
		if let (Some(key), Some(dir)) = (&query.sort, &query.dir) {
			if let Some(column) = self.columns.iter().find(|c| c.key() == key.as_str()) {
				let direction = if dir == "desc" {
					crate::sorting::SortDirection::Descending
				} else {
					crate::sorting::SortDirection::Ascending
				};
				let cmp = column.comparator_for(direction);
				records.sort_by(|a, b| cmp(a, b));
			}
		}
		records
	}
}

#[async_trait]
impl<R: Clone + Send + Sync + 'static> DataSource<R> for InMemorySource<R> {
	async fn fetch_all(&self) -> Result<Vec<R>> {
		Ok(self.records.clone())
	}

	async fn fetch_page(&self, query: &PageQuery) -> Result<PageResponse<R>> {
		let records = self.sorted(query);
		let total_count = records.len();
		let page = if query.page_size == 0 {
			records
		} else {
			let start = query.current_page * query.page_size;
			if start >= total_count {
				Vec::new()
			} else {
				records[start..(start + query.page_size).min(total_count)].to_vec()
			}
		};
		Ok(PageResponse {
			records: page,
			total_count,
		})
	}
}

impl<R> std::fmt::Debug for InMemorySource<R> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("InMemorySource")
			.field("records", &self.records.len())
			.field("columns", &self.columns.len())
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::sorting::SortDirection;

	#[test]
	fn query_serializes_with_widget_parameter_names() {
		let state = PageSnapshot {
			page_size: 20,
			current_page: 2,
			total_pages: 5,
			total_records: 100,
		};
		let sort = SortSpec::new("name", SortDirection::Descending);
		let query = PageQuery::new(&state, Some(&sort));

		let encoded = serde_json::to_value(&query).unwrap();
		assert_eq!(
			encoded,
			serde_json::json!({
				"currentPage": 2,
				"pageSize": 20,
				"sort": "name",
				"dir": "desc"
			})
		);
	}

	#[test]
	fn unsorted_query_omits_sort_parameters() {
		let state = PageSnapshot {
			page_size: 10,
			current_page: 0,
			total_pages: 1,
			total_records: 3,
		};
		let encoded = serde_json::to_value(PageQuery::new(&state, None)).unwrap();
		assert_eq!(
			encoded,
			serde_json::json!({ "currentPage": 0, "pageSize": 10 })
		);
	}

	#[test]
	fn response_parses_total_count_field() {
		let payload = r#"{"records": [1, 2, 3], "totalCount": 42}"#;
		let response: PageResponse<i64> = serde_json::from_str(payload).unwrap();
		assert_eq!(response.records, vec![1, 2, 3]);
		assert_eq!(response.total_count, 42);
	}
}
