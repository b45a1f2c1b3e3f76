/// Tracks the selected row of the results list.
///
/// The cursor has two states: empty (no selection, exactly when the list has
/// no rows) and positioned on a valid index. Selection arithmetic wraps in
/// both directions, and every list mutation must re-clamp the cursor as part
/// of its postcondition rather than as a separate maintenance step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Cursor {
	selected: Option<usize>,
}

impl Cursor {
	pub(crate) fn selected(&self) -> Option<usize> {
		self.selected
	}

	/// Select the top row, or nothing when the list is empty.
	pub(crate) fn select_first(&mut self, count: usize) {
		self.selected = if count == 0 { None } else { Some(0) };
	}

	/// Move the selection by `delta` rows, wrapping past either end.
	///
	/// A no-op while the list is empty. `rem_euclid` keeps the wrap correct
	/// even when a page jump is larger than the list itself.
	pub(crate) fn shift(&mut self, count: usize, delta: isize) {
		if count == 0 {
			self.selected = None;
			return;
		}
		let current = self.selected.unwrap_or(0) as isize;
		let next = (current + delta).rem_euclid(count as isize);
		self.selected = Some(next as usize);
	}

	/// Restore the selection invariant after a mutation changed the row count.
	pub(crate) fn clamp(&mut self, count: usize) {
		self.selected = match (self.selected, count) {
			(_, 0) => None,
			(None, _) => Some(0),
			(Some(index), count) => Some(index % count),
		};
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn select_first_positions_only_non_empty_lists() {
		let mut cursor = Cursor::default();
		cursor.select_first(0);
		assert_eq!(cursor.selected(), None);
		cursor.select_first(3);
		assert_eq!(cursor.selected(), Some(0));
	}

	#[test]
	fn shift_wraps_in_both_directions() {
		let mut cursor = Cursor::default();
		cursor.select_first(3);

		cursor.shift(3, -1);
		assert_eq!(cursor.selected(), Some(2));
		cursor.shift(3, 1);
		assert_eq!(cursor.selected(), Some(0));
	}

	#[test]
	fn a_full_cycle_returns_to_the_start() {
		let mut cursor = Cursor::default();
		cursor.select_first(3);
		cursor.shift(3, 1);

		for _ in 0..3 {
			cursor.shift(3, 1);
		}
		assert_eq!(cursor.selected(), Some(1));
	}

	#[test]
	fn page_jumps_larger_than_the_list_still_wrap() {
		let mut cursor = Cursor::default();
		cursor.select_first(3);

		cursor.shift(3, 7);
		assert_eq!(cursor.selected(), Some(1));
		cursor.shift(3, -8);
		assert_eq!(cursor.selected(), Some(2));
	}

	#[test]
	fn shift_on_an_empty_list_is_a_no_op() {
		let mut cursor = Cursor::default();
		cursor.shift(0, 1);
		assert_eq!(cursor.selected(), None);
	}

	#[test]
	fn clamp_restores_the_selection_invariant() {
		let mut cursor = Cursor::default();
		cursor.select_first(5);
		cursor.shift(5, 4);

		cursor.clamp(2);
		assert_eq!(cursor.selected(), Some(0));
		cursor.clamp(0);
		assert_eq!(cursor.selected(), None);
		cursor.clamp(4);
		assert_eq!(cursor.selected(), Some(0));
	}
}
