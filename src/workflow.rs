use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Result, ensure};
use serde::Serialize;

use blink::plugin_api::SourceRegistry;
use blink::{ListConfig, QueryDispatcher, ResultsList, ResultsSnapshot};
use blink_plugins_calc::CalcSource;
use blink_plugins_files::FilesSource;
use blink_plugins_shortcuts::ShortcutsSource;

use crate::settings::ResolvedConfig;

const DEFAULT_SETTLE: Duration = Duration::from_millis(2_000);
const SETTLE_POLL: Duration = Duration::from_millis(5);

/// Final state of one query round.
#[derive(Debug, Serialize)]
pub(crate) struct QueryOutcome {
	/// Query text as dispatched.
	pub(crate) query: String,
	/// Whether every source finished before the wait expired.
	pub(crate) settled: bool,
	/// The result list at the end of the round.
	pub(crate) snapshot: ResultsSnapshot,
}

/// Coordinates building the source registry and running one query round.
#[derive(Debug)]
pub(crate) struct SearchWorkflow {
	dispatcher: QueryDispatcher,
	settle: Duration,
}

impl SearchWorkflow {
	/// Wire the enabled sources, results list and dispatcher together.
	pub(crate) fn from_config(config: &ResolvedConfig, settle_ms: Option<u64>) -> Result<Self> {
		let mut registry = SourceRegistry::new();

		if config.source_enabled(blink_plugins_files::FILES_DESCRIPTOR.id) {
			registry.register(FilesSource::scan(&config.root)?)?;
		}
		if config.source_enabled(blink_plugins_shortcuts::SHORTCUTS_DESCRIPTOR.id) {
			registry.register(ShortcutsSource)?;
		}
		if config.source_enabled(blink_plugins_calc::CALC_DESCRIPTOR.id) {
			registry.register(CalcSource)?;
		}

		if let Some(ids) = &config.enabled {
			for id in ids {
				ensure!(
					registry.key_by_id(id).is_some(),
					"unknown source id '{id}' in sources.enabled"
				);
			}
		}
		ensure!(!registry.is_empty(), "no sources enabled");

		let results = Arc::new(ResultsList::new(ListConfig {
			page_size: config.page_size,
			max_visible: config.max_visible,
		}));
		let dispatcher = QueryDispatcher::new(registry, results);
		let settle = settle_ms.map_or(DEFAULT_SETTLE, Duration::from_millis);

		Ok(Self { dispatcher, settle })
	}

	/// Dispatch `query` and wait for the sources to finish streaming.
	pub(crate) fn run(&self, query: &str) -> QueryOutcome {
		self.dispatcher.dispatch(query);

		let deadline = Instant::now() + self.settle;
		let mut settled = true;
		while !self.dispatcher.idle() {
			if Instant::now() >= deadline {
				settled = false;
				break;
			}
			thread::sleep(SETTLE_POLL);
		}

		QueryOutcome {
			query: query.to_string(),
			settled,
			snapshot: self.dispatcher.results().snapshot(),
		}
	}
}
