use blink_plugin_api::Candidate;

/// One visible mutation applied to the live list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatchOp {
	/// The slot now holds a different logical candidate.
	Replace(usize),
	/// The slot kept its candidate but the score changed.
	Rescore(usize),
	/// A row was appended at the index.
	Append(usize),
	/// `removed` rows were cut from the tail starting at `start`.
	Truncate { start: usize, removed: usize },
}

/// Record of the mutations one reconciliation applied.
#[derive(Debug, Clone, Default)]
pub struct ListPatch {
	ops: Vec<PatchOp>,
}

impl ListPatch {
	/// Operations in application order.
	#[must_use]
	pub fn ops(&self) -> &[PatchOp] {
		&self.ops
	}

	/// Whether the reconciliation changed anything at all.
	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.ops.is_empty()
	}

	/// Number of structural row mutations: replaced slots, appended rows and
	/// truncated rows. In-place rescores are not structural.
	#[must_use]
	pub fn structural_ops(&self) -> usize {
		self.ops
			.iter()
			.map(|op| match op {
				PatchOp::Replace(_) | PatchOp::Append(_) => 1,
				PatchOp::Rescore(_) => 0,
				PatchOp::Truncate { removed, .. } => *removed,
			})
			.sum()
	}

	fn push(&mut self, op: PatchOp) {
		self.ops.push(op);
	}
}

/// Reconcile `rows` in place until it equals `target`, touching only slots
/// that actually differ.
///
/// Slots whose logical candidate is unchanged are refreshed in place instead
/// of being replaced, so an unaffected leading prefix never produces a
/// replace. The structural operation count is bounded by the two sequence
/// lengths combined.
pub(crate) fn apply(rows: &mut Vec<Candidate>, target: Vec<Candidate>) -> ListPatch {
	let old_len = rows.len();
	let new_len = target.len();
	let common = old_len.min(new_len);
	let mut patch = ListPatch::default();

	for (index, new_row) in target.into_iter().enumerate() {
		if index < common {
			let old_row = &mut rows[index];
			if old_row.same_result(&new_row) {
				if old_row.score != new_row.score {
					patch.push(PatchOp::Rescore(index));
				}
				old_row.score = new_row.score;
				old_row.title = new_row.title;
				old_row.subtitle = new_row.subtitle;
				old_row.icon = new_row.icon;
			} else {
				*old_row = new_row;
				patch.push(PatchOp::Replace(index));
			}
		} else {
			rows.push(new_row);
			patch.push(PatchOp::Append(index));
		}
	}

	if new_len < old_len {
		rows.truncate(new_len);
		patch.push(PatchOp::Truncate {
			start: new_len,
			removed: old_len - new_len,
		});
	}

	patch
}

#[cfg(test)]
mod tests {
	use super::*;
	use blink_plugin_api::{SourceDescriptor, SourceKey};

	static TEST_DESCRIPTOR: SourceDescriptor = SourceDescriptor {
		id: "patch-test",
		name: "Patch test",
		description: "",
		action_keyword: None,
	};

	fn candidate(identity: &str, score: i32) -> Candidate {
		Candidate::new(
			SourceKey::from_descriptor(&TEST_DESCRIPTOR),
			identity,
			identity,
			score,
		)
	}

	#[test]
	fn identical_sequences_produce_no_ops() {
		let mut rows = vec![candidate("a", 9), candidate("b", 4)];
		let target = rows.clone();

		let patch = apply(&mut rows, target);
		assert!(patch.is_empty());
		assert_eq!(rows.len(), 2);
	}

	#[test]
	fn unchanged_prefix_is_never_replaced() {
		let mut rows = vec![candidate("a", 9), candidate("b", 4)];
		let target = vec![candidate("a", 9), candidate("c", 3)];

		let patch = apply(&mut rows, target);
		assert_eq!(patch.ops(), &[PatchOp::Replace(1)]);
		assert_eq!(rows[1].identity, "c");
	}

	#[test]
	fn score_only_changes_rescore_in_place() {
		let mut rows = vec![candidate("a", 9)];
		let target = vec![candidate("a", 2)];

		let patch = apply(&mut rows, target);
		assert_eq!(patch.ops(), &[PatchOp::Rescore(0)]);
		assert_eq!(patch.structural_ops(), 0);
		assert_eq!(rows[0].score, 2);
	}

	#[test]
	fn longer_target_appends_the_tail() {
		let mut rows = vec![candidate("a", 9)];
		let target = vec![candidate("a", 9), candidate("b", 5), candidate("c", 1)];

		let patch = apply(&mut rows, target);
		assert_eq!(patch.ops(), &[PatchOp::Append(1), PatchOp::Append(2)]);
		assert_eq!(rows.len(), 3);
	}

	#[test]
	fn shorter_target_truncates_the_tail() {
		let mut rows = vec![candidate("a", 9), candidate("b", 5), candidate("c", 1)];
		let target = vec![candidate("a", 9)];

		let patch = apply(&mut rows, target);
		assert_eq!(
			patch.ops(),
			&[PatchOp::Truncate {
				start: 1,
				removed: 2,
			}]
		);
		assert_eq!(rows.len(), 1);
	}

	#[test]
	fn structural_ops_never_exceed_combined_lengths() {
		let mut rows = vec![candidate("a", 9), candidate("b", 5), candidate("c", 1)];
		let old_len = rows.len();
		let target = vec![candidate("d", 10), candidate("e", 8)];
		let new_len = target.len();

		let patch = apply(&mut rows, target);
		assert!(patch.structural_ops() <= old_len + new_len);
		assert_eq!(rows.len(), new_len);
	}
}
