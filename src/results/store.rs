use blink_plugin_api::{Candidate, SourceKey};

/// Ordered sequence of candidates, globally sorted by descending score.
///
/// Candidates with equal scores keep the relative order their insertions
/// established; [`insertion_index`] is the single place that tie-break is
/// defined.
#[derive(Debug, Default)]
pub(crate) struct CandidateStore {
	rows: Vec<Candidate>,
}

/// First position in `rows` whose score is strictly lower than `score`.
///
/// Inserting at this position keeps the sequence sorted and places a new
/// candidate after every existing candidate of equal score, making insertion
/// order the tie-break among equals.
pub(crate) fn insertion_index(rows: &[Candidate], score: i32) -> usize {
	rows.iter()
		.position(|row| row.score < score)
		.unwrap_or(rows.len())
}

impl CandidateStore {
	pub(crate) fn new() -> Self {
		Self::default()
	}

	pub(crate) fn len(&self) -> usize {
		self.rows.len()
	}

	pub(crate) fn is_empty(&self) -> bool {
		self.rows.is_empty()
	}

	pub(crate) fn rows(&self) -> &[Candidate] {
		&self.rows
	}

	/// Mutable access for the patch applier; callers must restore the
	/// descending-score invariant before releasing the mutation lock.
	pub(crate) fn rows_mut(&mut self) -> &mut Vec<Candidate> {
		&mut self.rows
	}

	/// Rows currently contributed by `source`, in list order.
	pub(crate) fn rows_for(&self, source: SourceKey) -> impl Iterator<Item = &Candidate> {
		self.rows.iter().filter(move |row| row.source == source)
	}

	/// Whether the descending-score invariant currently holds.
	pub(crate) fn is_sorted(&self) -> bool {
		self.rows
			.windows(2)
			.all(|pair| pair[0].score >= pair[1].score)
	}
}
