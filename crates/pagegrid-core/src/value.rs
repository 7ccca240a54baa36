//! Typed cell values used by default sort comparators.

use std::cmp::Ordering;

/// A typed value extracted from a record field.
///
/// Values carry a total order so a column extractor alone is enough to derive
/// a sort comparator: same-kind values compare naturally, numbers compare
/// across `Int`/`Float`, and otherwise kinds compare by a fixed rank
/// (`Null < Bool < numbers < Text`). Floats use `total_cmp`, so NaN does not
/// break the ordering.
#[derive(Debug, Clone)]
pub enum CellValue {
	/// Absent value; sorts before everything else
	Null,
	/// Boolean value (`false < true`)
	Bool(bool),
	/// Signed integer value
	Int(i64),
	/// Floating-point value
	Float(f64),
	/// Text value, compared lexicographically
	Text(String),
}

impl CellValue {
	fn rank(&self) -> u8 {
		match self {
			CellValue::Null => 0,
			CellValue::Bool(_) => 1,
			CellValue::Int(_) | CellValue::Float(_) => 2,
			CellValue::Text(_) => 3,
		}
	}
}

impl PartialEq for CellValue {
	fn eq(&self, other: &Self) -> bool {
		self.cmp(other) == Ordering::Equal
	}
}

impl Eq for CellValue {}

impl PartialOrd for CellValue {
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		Some(self.cmp(other))
	}
}

impl Ord for CellValue {
	fn cmp(&self, other: &Self) -> Ordering {
		use CellValue::*;
		match (self, other) {
			(Null, Null) => Ordering::Equal,
			(Bool(a), Bool(b)) => a.cmp(b),
			(Int(a), Int(b)) => a.cmp(b),
			(Float(a), Float(b)) => a.total_cmp(b),
			(Int(a), Float(b)) => (*a as f64).total_cmp(b),
			(Float(a), Int(b)) => a.total_cmp(&(*b as f64)),
			(Text(a), Text(b)) => a.cmp(b),
			_ => self.rank().cmp(&other.rank()),
		}
	}
}

impl From<i64> for CellValue {
	fn from(v: i64) -> Self {
		CellValue::Int(v)
	}
}

impl From<i32> for CellValue {
	fn from(v: i32) -> Self {
		CellValue::Int(v as i64)
	}
}

impl From<usize> for CellValue {
	fn from(v: usize) -> Self {
		CellValue::Int(v as i64)
	}
}

impl From<f64> for CellValue {
	fn from(v: f64) -> Self {
		CellValue::Float(v)
	}
}

impl From<bool> for CellValue {
	fn from(v: bool) -> Self {
		CellValue::Bool(v)
	}
}

impl From<String> for CellValue {
	fn from(v: String) -> Self {
		CellValue::Text(v)
	}
}

impl From<&str> for CellValue {
	fn from(v: &str) -> Self {
		CellValue::Text(v.to_string())
	}
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
	fn from(v: Option<T>) -> Self {
		v.map(Into::into).unwrap_or(CellValue::Null)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn same_kind_ordering() {
		assert!(CellValue::Int(1) < CellValue::Int(2));
		assert!(CellValue::Text("a".into()) < CellValue::Text("b".into()));
		assert!(CellValue::Bool(false) < CellValue::Bool(true));
	}

	#[test]
	fn numeric_cross_kind_ordering() {
		assert!(CellValue::Int(1) < CellValue::Float(1.5));
		assert!(CellValue::Float(2.5) > CellValue::Int(2));
		assert_eq!(CellValue::Int(3), CellValue::Float(3.0));
	}

	#[test]
	fn null_sorts_first() {
		assert!(CellValue::Null < CellValue::Bool(false));
		assert!(CellValue::Null < CellValue::Text(String::new()));
	}

	#[test]
	fn nan_has_a_defined_position() {
		// total_cmp puts NaN above all other floats
		assert!(CellValue::Float(f64::NAN) > CellValue::Float(f64::INFINITY));
		assert_eq!(CellValue::Float(f64::NAN), CellValue::Float(f64::NAN));
	}

	#[test]
	fn option_conversion() {
		assert_eq!(CellValue::from(None::<i64>), CellValue::Null);
		assert_eq!(CellValue::from(Some(7i64)), CellValue::Int(7));
	}
}
