use blink_plugin_api::{Candidate, SourceKey};

use super::store::insertion_index;

/// Compute the full ordered sequence that results from merging a replacement
/// batch from `source` into `existing`.
///
/// Rows from other sources are never touched. Rows from `source` that the
/// batch still names (same identity key) survive as the same logical
/// candidate: their display fields are refreshed in place, and only the ones
/// whose score actually changed are repositioned. Rows the batch dropped are
/// removed, and batch candidates with no existing counterpart are inserted at
/// the position their score ranks them, in batch order, after the rescored
/// ones. Repeating the same batch therefore leaves both contents and order
/// untouched.
pub(crate) fn merge_batch(
	existing: &[Candidate],
	source: SourceKey,
	batch: Vec<Candidate>,
) -> Vec<Candidate> {
	let mut rows: Vec<Candidate> = existing
		.iter()
		.filter(|row| {
			row.source != source || batch.iter().any(|new| new.identity == row.identity)
		})
		.cloned()
		.collect();

	let mut fresh = Vec::new();
	for new in batch {
		let matched = rows
			.iter()
			.position(|row| row.source == source && row.identity == new.identity);
		match matched {
			Some(index) => {
				let row = &mut rows[index];
				let rescored = row.score != new.score;
				row.title = new.title;
				row.subtitle = new.subtitle;
				row.icon = new.icon;
				if rescored {
					let mut row = rows.remove(index);
					row.score = new.score;
					let at = insertion_index(&rows, row.score);
					rows.insert(at, row);
				}
			}
			None => fresh.push(new),
		}
	}

	for candidate in fresh {
		let at = insertion_index(&rows, candidate.score);
		rows.insert(at, candidate);
	}

	rows
}

#[cfg(test)]
mod tests {
	use super::*;
	use blink_plugin_api::SourceDescriptor;

	static FILE_DESCRIPTOR: SourceDescriptor = SourceDescriptor {
		id: "file-search",
		name: "Files",
		description: "",
		action_keyword: None,
	};

	static CALC_DESCRIPTOR: SourceDescriptor = SourceDescriptor {
		id: "calc",
		name: "Calculator",
		description: "",
		action_keyword: None,
	};

	fn files() -> SourceKey {
		SourceKey::from_descriptor(&FILE_DESCRIPTOR)
	}

	fn calc() -> SourceKey {
		SourceKey::from_descriptor(&CALC_DESCRIPTOR)
	}

	fn candidate(source: SourceKey, identity: &str, score: i32) -> Candidate {
		Candidate::new(source, identity, identity, score)
	}

	fn identities(rows: &[Candidate]) -> Vec<&str> {
		rows.iter().map(|row| row.identity.as_str()).collect()
	}

	#[test]
	fn first_batch_fills_an_empty_store_in_score_order() {
		let merged = merge_batch(
			&[],
			files(),
			vec![candidate(files(), "a", 10), candidate(files(), "b", 5)],
		);
		assert_eq!(identities(&merged), vec!["a", "b"]);
	}

	#[test]
	fn other_sources_interleave_by_score() {
		let existing = merge_batch(
			&[],
			files(),
			vec![candidate(files(), "a", 10), candidate(files(), "b", 5)],
		);
		let merged = merge_batch(&existing, calc(), vec![candidate(calc(), "c", 8)]);
		assert_eq!(identities(&merged), vec!["a", "c", "b"]);
	}

	#[test]
	fn rescored_rows_move_and_dropped_rows_vanish() {
		let mut existing = merge_batch(
			&[],
			files(),
			vec![candidate(files(), "a", 10), candidate(files(), "b", 5)],
		);
		existing = merge_batch(&existing, calc(), vec![candidate(calc(), "c", 8)]);

		let merged = merge_batch(&existing, files(), vec![candidate(files(), "a", 3)]);
		assert_eq!(identities(&merged), vec!["c", "a"]);
		assert_eq!(merged[1].score, 3);
	}

	#[test]
	fn matched_rows_refresh_display_fields_in_place() {
		let existing = merge_batch(&[], files(), vec![candidate(files(), "a", 10)]);
		let update = vec![
			Candidate::new(files(), "a", "new title", 10).with_subtitle("new subtitle"),
		];

		let merged = merge_batch(&existing, files(), update);
		assert_eq!(merged.len(), 1);
		assert_eq!(merged[0].title, "new title");
		assert_eq!(merged[0].subtitle, "new subtitle");
		assert_eq!(merged[0].score, 10);
	}

	#[test]
	fn repeating_a_batch_changes_nothing() {
		let batch = vec![
			candidate(files(), "a", 10),
			candidate(files(), "b", 10),
			candidate(files(), "c", 2),
		];
		let mut rows = merge_batch(&[], files(), batch.clone());
		rows = merge_batch(&rows, calc(), vec![candidate(calc(), "x", 10)]);

		let repeated = merge_batch(&rows, files(), batch);
		assert_eq!(identities(&repeated), identities(&rows));
	}

	#[test]
	fn equal_scores_across_sources_keep_insertion_order() {
		let mut rows = merge_batch(&[], files(), vec![candidate(files(), "x", 5)]);
		rows = merge_batch(&rows, calc(), vec![candidate(calc(), "y", 5)]);
		assert_eq!(identities(&rows), vec!["x", "y"]);
	}

	#[test]
	fn empty_batch_removes_the_source_entirely() {
		let mut rows = merge_batch(&[], files(), vec![candidate(files(), "a", 10)]);
		rows = merge_batch(&rows, calc(), vec![candidate(calc(), "c", 8)]);

		let merged = merge_batch(&rows, files(), Vec::new());
		assert_eq!(identities(&merged), vec!["c"]);
	}

	#[test]
	fn fresh_insertions_follow_batch_order_among_equal_scores() {
		let merged = merge_batch(
			&[],
			files(),
			vec![
				candidate(files(), "first", 7),
				candidate(files(), "second", 7),
				candidate(files(), "third", 7),
			],
		);
		assert_eq!(identities(&merged), vec!["first", "second", "third"]);
	}
}
