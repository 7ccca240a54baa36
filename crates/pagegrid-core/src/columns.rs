//! Column definitions.
//!
//! A [`Column`] describes how to read one field out of a record: an identifier
//! key, a display label, behavior flags, and an extractor returning a typed
//! [`CellValue`]. The extractor doubles as the source of the default sort
//! comparator. Rendering is not handled here; a view layer decides what to do
//! with labels and values.

use crate::sorting::SortDirection;
use crate::value::CellValue;
use std::sync::Arc;

/// Comparator over two records, total order.
pub type RecordComparator<R> = Arc<dyn Fn(&R, &R) -> std::cmp::Ordering + Send + Sync>;

/// A column definition for records of type `R`.
///
/// # Example
///
/// ```
/// use pagegrid_core::Column;
///
/// struct User {
///     name: String,
/// }
///
/// let col = Column::new("name", |u: &User| u.name.as_str().into())
///     .with_label("User Name")
///     .editable(false);
/// assert_eq!(col.key(), "name");
/// assert_eq!(col.label(), "User Name");
/// ```
pub struct Column<R> {
	key: String,
	label: String,
	sortable: bool,
	editable: bool,
	renderable: bool,
	extract: Arc<dyn Fn(&R) -> CellValue + Send + Sync>,
}

impl<R> Column<R> {
	/// Creates a column with the given key and value extractor.
	///
	/// The label defaults to the key; all behavior flags default to true.
	pub fn new<F>(key: impl Into<String>, extract: F) -> Self
	where
		F: Fn(&R) -> CellValue + Send + Sync + 'static,
	{
		let key = key.into();
		Self {
			label: key.clone(),
			key,
			sortable: true,
			editable: true,
			renderable: true,
			extract: Arc::new(extract),
		}
	}

	/// Sets the display label.
	pub fn with_label(mut self, label: impl Into<String>) -> Self {
		self.label = label.into();
		self
	}

	/// Sets whether the column can be sorted.
	pub fn sortable(mut self, sortable: bool) -> Self {
		self.sortable = sortable;
		self
	}

	/// Sets whether cells in this column may be edited.
	pub fn editable(mut self, editable: bool) -> Self {
		self.editable = editable;
		self
	}

	/// Sets whether the column should be rendered at all.
	pub fn renderable(mut self, renderable: bool) -> Self {
		self.renderable = renderable;
		self
	}

	/// The column key, used as the sort identifier.
	pub fn key(&self) -> &str {
		&self.key
	}

	/// The display label.
	pub fn label(&self) -> &str {
		&self.label
	}

	/// Whether the column can be sorted.
	pub fn is_sortable(&self) -> bool {
		self.sortable
	}

	/// Whether cells may be edited.
	pub fn is_editable(&self) -> bool {
		self.editable
	}

	/// Whether the column should be rendered.
	pub fn is_renderable(&self) -> bool {
		self.renderable
	}

	/// Extracts this column's value from a record.
	pub fn value(&self, record: &R) -> CellValue {
		(self.extract)(record)
	}

	/// Builds the default comparator for this column and direction.
	///
	/// Compares extracted [`CellValue`]s; equal values compare as equal, so a
	/// stable sort preserves their relative order.
	pub fn comparator_for(&self, direction: SortDirection) -> RecordComparator<R>
	where
		R: 'static,
	{
		let extract = Arc::clone(&self.extract);
		Arc::new(move |a: &R, b: &R| {
			let ord = extract(a).cmp(&extract(b));
			match direction {
				SortDirection::Ascending => ord,
				SortDirection::Descending => ord.reverse(),
			}
		})
	}
}

impl<R> Clone for Column<R> {
	fn clone(&self) -> Self {
		Self {
			key: self.key.clone(),
			label: self.label.clone(),
			sortable: self.sortable,
			editable: self.editable,
			renderable: self.renderable,
			extract: Arc::clone(&self.extract),
		}
	}
}

impl<R> std::fmt::Debug for Column<R> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Column")
			.field("key", &self.key)
			.field("label", &self.label)
			.field("sortable", &self.sortable)
			.field("editable", &self.editable)
			.field("renderable", &self.renderable)
			.finish_non_exhaustive()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::cmp::Ordering;

	struct Row {
		n: i64,
	}

	#[test]
	fn label_defaults_to_key() {
		let col = Column::new("n", |r: &Row| r.n.into());
		assert_eq!(col.label(), "n");
		assert!(col.is_sortable());
		assert!(col.is_editable());
		assert!(col.is_renderable());
	}

	#[test]
	fn comparator_respects_direction() {
		let col = Column::new("n", |r: &Row| r.n.into());
		let asc = col.comparator_for(SortDirection::Ascending);
		let desc = col.comparator_for(SortDirection::Descending);
		let (a, b) = (Row { n: 1 }, Row { n: 2 });

		assert_eq!(asc(&a, &b), Ordering::Less);
		assert_eq!(desc(&a, &b), Ordering::Greater);
		assert_eq!(asc(&a, &a), Ordering::Equal);
	}
}
