use std::io::{self, Write};

use anyhow::Result;

use crate::workflow::QueryOutcome;

/// Print the outcome as a human readable listing.
pub(crate) fn print_plain(outcome: &QueryOutcome) {
	if !outcome.settled {
		eprintln!("warning: some sources were still streaming when the wait expired");
	}

	if outcome.snapshot.rows.is_empty() {
		println!("no results for '{}'", outcome.query);
		return;
	}

	for (index, row) in outcome.snapshot.rows.iter().enumerate() {
		let marker = if outcome.snapshot.selected == Some(index) {
			'>'
		} else {
			' '
		};
		if row.subtitle.is_empty() {
			println!("{marker} [{:>4}] {}  ({})", row.score, row.title, row.source.id());
		} else {
			println!(
				"{marker} [{:>4}] {}  {}  ({})",
				row.score,
				row.title,
				row.subtitle,
				row.source.id()
			);
		}
	}
}

/// Print the outcome as pretty JSON on stdout.
pub(crate) fn print_json(outcome: &QueryOutcome) -> Result<()> {
	let mut stdout = io::stdout().lock();
	serde_json::to_writer_pretty(&mut stdout, outcome)?;
	writeln!(stdout)?;
	Ok(())
}
