use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::Serialize;
use tracing::warn;

use blink_plugin_api::{Candidate, SourceKey};

use super::cursor::Cursor;
use super::merge::merge_batch;
use super::patch::{self, ListPatch};
use super::store::CandidateStore;
use super::{ROW_HEIGHT, TOP_MARGIN};

/// Sizing knobs for the results list.
#[derive(Debug, Clone, Copy)]
pub struct ListConfig {
	/// Rows a page-jump navigation moves by. Clamped to at least 1.
	pub page_size: usize,
	/// Rows the surrounding shell is expected to show at once. Affects only
	/// the reported height hint, never the list contents.
	pub max_visible: usize,
}

impl Default for ListConfig {
	fn default() -> Self {
		Self {
			page_size: 6,
			max_visible: 6,
		}
	}
}

/// Read-only view of the list captured at one revision.
#[derive(Debug, Clone, Serialize)]
pub struct ResultsSnapshot {
	/// Rows in display order, best first.
	pub rows: Vec<Candidate>,
	/// Selected row index, absent exactly when `rows` is empty.
	pub selected: Option<usize>,
	/// Whether the shell should show the list at all.
	pub visible: bool,
	/// Monotonic change counter; unchanged between snapshots means unchanged state.
	pub revision: u64,
}

struct ListState {
	store: CandidateStore,
	cursor: Cursor,
	visible: bool,
	revision: u64,
	last_patch: ListPatch,
}

/// Ranked result list fed concurrently by source producers.
///
/// All mutations serialize on one internal lock, so batches arriving from
/// different producer threads apply atomically and never interleave. Reads
/// take the same lock briefly, which keeps a consumer from ever observing a
/// half-applied patch. No collaborator code runs while the lock is held and
/// no other lock is ever taken under it, so the list cannot deadlock against
/// its callers.
pub struct ResultsList {
	state: Mutex<ListState>,
	page_size: usize,
	max_visible: usize,
}

impl Default for ResultsList {
	fn default() -> Self {
		Self::new(ListConfig::default())
	}
}

impl ResultsList {
	/// Create an empty, hidden list.
	#[must_use]
	pub fn new(config: ListConfig) -> Self {
		Self {
			state: Mutex::new(ListState {
				store: CandidateStore::new(),
				cursor: Cursor::default(),
				visible: false,
				revision: 0,
				last_patch: ListPatch::default(),
			}),
			page_size: config.page_size.max(1),
			max_visible: config.max_visible.max(1),
		}
	}

	/// Merge a complete replacement batch from `source` into the list.
	///
	/// Candidates missing an identity key are dropped individually; the rest
	/// of the batch still applies. A non-empty result selects the top row and
	/// shows the list, an empty one hides it. Never fails.
	pub fn add_batch(&self, source: SourceKey, candidates: Vec<Candidate>) {
		let accepted = sanitize(source, candidates);
		let mut state = self.lock();
		let merged = merge_batch(state.store.rows(), source, accepted);
		let applied = patch::apply(state.store.rows_mut(), merged);
		let count = state.store.len();
		state.cursor.select_first(count);
		finish_mutation(&mut state, applied);
	}

	/// Delete every candidate `source` contributed.
	pub fn remove_source(&self, source: SourceKey) {
		self.add_batch(source, Vec::new());
	}

	/// Keep only `source`'s candidates, dropping every other source's rows.
	pub fn retain_source(&self, source: SourceKey) {
		let mut state = self.lock();
		let kept: Vec<Candidate> = state.store.rows_for(source).cloned().collect();
		let applied = patch::apply(state.store.rows_mut(), kept);
		let count = state.store.len();
		state.cursor.clamp(count);
		finish_mutation(&mut state, applied);
	}

	/// Empty the list and reset the cursor.
	pub fn clear(&self) {
		let mut state = self.lock();
		let applied = patch::apply(state.store.rows_mut(), Vec::new());
		state.cursor.clamp(0);
		finish_mutation(&mut state, applied);
	}

	/// Move the selection down one row, wrapping at the bottom.
	pub fn select_next(&self) {
		self.shift(1);
	}

	/// Move the selection up one row, wrapping at the top.
	pub fn select_prev(&self) {
		self.shift(-1);
	}

	/// Jump the selection one page down.
	pub fn select_next_page(&self) {
		self.shift(self.page_size as isize);
	}

	/// Jump the selection one page up.
	pub fn select_prev_page(&self) {
		self.shift(-(self.page_size as isize));
	}

	/// Select the top row if the list is non-empty.
	pub fn select_first(&self) {
		let mut state = self.lock();
		let count = state.store.len();
		state.cursor.select_first(count);
		state.revision += 1;
	}

	fn shift(&self, delta: isize) {
		let mut state = self.lock();
		let count = state.store.len();
		state.cursor.shift(count, delta);
		state.revision += 1;
	}

	/// Number of rows currently in the list.
	#[must_use]
	pub fn len(&self) -> usize {
		self.lock().store.len()
	}

	/// Returns `true` when the list holds no rows.
	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.lock().store.is_empty()
	}

	/// Selected row index, absent exactly when the list is empty.
	#[must_use]
	pub fn selected(&self) -> Option<usize> {
		self.lock().cursor.selected()
	}

	/// Clone of the selected candidate, if any.
	#[must_use]
	pub fn selected_candidate(&self) -> Option<Candidate> {
		let state = self.lock();
		let index = state.cursor.selected()?;
		state.store.rows().get(index).cloned()
	}

	/// Whether the shell should show the list.
	#[must_use]
	pub fn visible(&self) -> bool {
		self.lock().visible
	}

	/// Top margin hint for the shell; collapses while the list is hidden.
	#[must_use]
	pub fn margin(&self) -> u16 {
		if self.visible() { TOP_MARGIN } else { 0 }
	}

	/// Height hint for the shell window.
	#[must_use]
	pub fn max_height(&self) -> u32 {
		self.max_visible as u32 * ROW_HEIGHT
	}

	/// Rows a page-jump moves by.
	#[must_use]
	pub fn page_size(&self) -> usize {
		self.page_size
	}

	/// Capture a consistent view of the whole list.
	#[must_use]
	pub fn snapshot(&self) -> ResultsSnapshot {
		let state = self.lock();
		ResultsSnapshot {
			rows: state.store.rows().to_vec(),
			selected: state.cursor.selected(),
			visible: state.visible,
			revision: state.revision,
		}
	}

	/// The mutations applied by the most recent list change.
	#[must_use]
	pub fn last_patch(&self) -> ListPatch {
		self.lock().last_patch.clone()
	}

	fn lock(&self) -> MutexGuard<'_, ListState> {
		self.state.lock().unwrap_or_else(PoisonError::into_inner)
	}
}

fn finish_mutation(state: &mut ListState, applied: ListPatch) {
	state.visible = !state.store.is_empty();
	state.revision += 1;
	state.last_patch = applied;
	debug_assert!(state.store.is_sorted());
}

fn sanitize(source: SourceKey, candidates: Vec<Candidate>) -> Vec<Candidate> {
	candidates
		.into_iter()
		.filter_map(|mut candidate| {
			if !candidate.is_well_formed() {
				warn!(
					source = source.id(),
					title = %candidate.title,
					"dropping candidate without an identity key"
				);
				return None;
			}
			candidate.source = source;
			Some(candidate)
		})
		.collect()
}
