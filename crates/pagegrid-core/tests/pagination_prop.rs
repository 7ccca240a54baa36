//! Property tests for the pagination arithmetic.

use pagegrid_core::{PageTarget, PaginationState};
use proptest::prelude::*;

proptest! {
	#[test]
	fn total_pages_is_the_minimal_cover(page_size in 0usize..50, records in 0usize..1000) {
		let state = PaginationState::new(page_size);
		state.set_total_records(records);
		let pages = state.total_pages();

		if records == 0 {
			prop_assert_eq!(pages, 0);
		} else if page_size == 0 {
			prop_assert_eq!(pages, 1);
		} else {
			// Enough pages to hold every record, and no spare page.
			prop_assert!(pages * page_size >= records);
			prop_assert!((pages - 1) * page_size < records);
		}
	}

	#[test]
	fn current_page_never_escapes_range(
		records in 0usize..500,
		shrunk in 0usize..500,
		page in 0usize..100,
	) {
		let state = PaginationState::new(10);
		state.set_total_records(records);
		let _ = state.set_current_page(page);
		state.set_total_records(shrunk);
		prop_assert!(state.current_page() < state.total_pages().max(1));
	}

	#[test]
	fn page_window_is_bounded_and_contains_current(
		records in 0usize..500,
		window in 1usize..12,
	) {
		let state = PaginationState::new(10);
		state.set_total_records(records);
		let _ = state.set_page_target(PageTarget::Last);

		let run = state.page_window(window);
		prop_assert!(run.end <= state.total_pages());
		prop_assert!(run.len() <= window);
		if state.total_pages() > 0 {
			prop_assert!(run.contains(&state.current_page()));
		}
	}
}
