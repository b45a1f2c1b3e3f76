use std::path::PathBuf;

/// Validated configuration consumed by the search workflow.
#[derive(Debug, Clone)]
pub(crate) struct ResolvedConfig {
	/// Rows a page-jump navigation moves by.
	pub(crate) page_size: usize,
	/// Rows the shell is expected to show at once.
	pub(crate) max_visible: usize,
	/// Root directory served by the files source.
	pub(crate) root: PathBuf,
	/// Source identifiers to enable, or `None` for every built-in.
	pub(crate) enabled: Option<Vec<String>>,
}

impl ResolvedConfig {
	/// Whether the source registered under `id` should be enabled.
	pub(crate) fn source_enabled(&self, id: &str) -> bool {
		match &self.enabled {
			Some(ids) => ids.iter().any(|enabled| enabled == id),
			None => true,
		}
	}
}
