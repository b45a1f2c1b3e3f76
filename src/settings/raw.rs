use std::path::PathBuf;
use std::{env, fs};

use anyhow::{Context, Result, ensure};
use serde::Deserialize;

use super::resolved::ResolvedConfig;
use crate::cli::CliArgs;

const DEFAULT_PAGE_SIZE: usize = 6;
const DEFAULT_MAX_VISIBLE: usize = 6;

/// Mirror of the configuration file representation before CLI overrides and
/// validation are applied.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct RawConfig {
	results: ResultsSection,
	sources: SourcesSection,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct ResultsSection {
	page_size: Option<usize>,
	max_visible: Option<usize>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct SourcesSection {
	enabled: Option<Vec<String>>,
	root: Option<PathBuf>,
}

impl RawConfig {
	/// Apply CLI overrides on top of the raw configuration values.
	pub(super) fn apply_cli_overrides(&mut self, cli: &CliArgs) {
		if cli.page_size.is_some() {
			self.results.page_size = cli.page_size;
		}
		if cli.max_visible.is_some() {
			self.results.max_visible = cli.max_visible;
		}
		if cli.root.is_some() {
			self.sources.root = cli.root.clone();
		}
		if !cli.sources.is_empty() {
			self.sources.enabled = Some(cli.sources.clone());
		}
	}

	/// Convert the raw configuration into a [`ResolvedConfig`], validating and
	/// filling defaults where required.
	pub(super) fn resolve(self) -> Result<ResolvedConfig> {
		let page_size = self.results.page_size.unwrap_or(DEFAULT_PAGE_SIZE);
		ensure!(page_size >= 1, "results.page_size must be at least 1");

		let max_visible = self.results.max_visible.unwrap_or(DEFAULT_MAX_VISIBLE);
		ensure!(max_visible >= 1, "results.max_visible must be at least 1");

		let root = resolve_root(self.sources.root)?;

		let enabled = self.sources.enabled.map(|ids| {
			ids.into_iter()
				.map(|id| id.trim().to_string())
				.filter(|id| !id.is_empty())
				.collect::<Vec<_>>()
		});
		if let Some(ref ids) = enabled {
			ensure!(!ids.is_empty(), "sources.enabled must name at least one source");
		}

		Ok(ResolvedConfig {
			page_size,
			max_visible,
			root,
			enabled,
		})
	}
}

fn resolve_root(configured: Option<PathBuf>) -> Result<PathBuf> {
	let mut root = match configured {
		Some(path) => path,
		None => env::current_dir().context("failed to determine working directory")?,
	};

	if root.is_relative() {
		root = env::current_dir()
			.context("failed to resolve current directory for root")?
			.join(root);
	}

	root = fs::canonicalize(&root)
		.with_context(|| format!("failed to canonicalize files root {}", root.display()))?;

	let metadata = fs::metadata(&root)
		.with_context(|| format!("failed to inspect files root {}", root.display()))?;
	ensure!(metadata.is_dir(), "files root must be a directory");

	Ok(root)
}
