//! Query fan-out: one producer thread per source, one collector funnel.
//!
//! Each call to [`QueryDispatcher::dispatch`] starts a new query generation.
//! Producers stream [`BatchEnvelope`]s tagged with their generation; the
//! collector thread drops envelopes from superseded generations before they
//! ever reach the results list, so the list itself needs no notion of
//! staleness.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread;

use tracing::debug;

use blink_plugin_api::{
	BatchEnvelope, BatchStream, QueryContext, RegisteredSource, SourceRegistry,
};

use crate::results::ResultsList;

/// Outstanding producer bookkeeping for the current generation.
#[derive(Default)]
struct InFlight {
	id: u64,
	remaining: usize,
}

/// Fans queries out to every registered source and funnels their batches into
/// the shared results list.
#[derive(Debug)]
pub struct QueryDispatcher {
	registry: SourceRegistry,
	results: Arc<ResultsList>,
	batch_tx: Sender<BatchEnvelope>,
	latest_query_id: Arc<AtomicU64>,
	in_flight: Arc<Mutex<InFlight>>,
}

impl QueryDispatcher {
	/// Create a dispatcher and start its collector thread.
	#[must_use]
	pub fn new(registry: SourceRegistry, results: Arc<ResultsList>) -> Self {
		let (batch_tx, batch_rx) = mpsc::channel();
		let latest_query_id = Arc::new(AtomicU64::new(0));
		let in_flight = Arc::new(Mutex::new(InFlight::default()));

		{
			let results = Arc::clone(&results);
			let latest_query_id = Arc::clone(&latest_query_id);
			let in_flight = Arc::clone(&in_flight);
			thread::spawn(move || {
				collector_loop(batch_rx, &results, &latest_query_id, &in_flight);
			});
		}

		Self {
			registry,
			results,
			batch_tx,
			latest_query_id,
			in_flight,
		}
	}

	/// Issue a new query generation, superseding any in-flight one.
	///
	/// An empty query clears the list without touching any source. When the
	/// query's first token is a registered action keyword, only the owning
	/// source is queried with the remainder and every other source's rows are
	/// dropped immediately. Returns the generation identifier.
	pub fn dispatch(&self, query: &str) -> u64 {
		let id = self.latest_query_id.fetch_add(1, Ordering::AcqRel) + 1;
		let query = query.trim();

		if query.is_empty() {
			*lock(&self.in_flight) = InFlight { id, remaining: 0 };
			self.results.clear();
			return id;
		}

		let (targets, effective_query) = self.route(query);
		debug!(id, query = effective_query, sources = targets.len(), "dispatching query");
		*lock(&self.in_flight) = InFlight {
			id,
			remaining: targets.len(),
		};

		for registered in targets {
			let source = registered.source();
			let key = registered.key();
			let tx = self.batch_tx.clone();
			let latest_query_id = Arc::clone(&self.latest_query_id);
			let text = effective_query.to_string();
			thread::spawn(move || {
				let stream = BatchStream::new(&tx, id, key);
				let context = QueryContext::new(&latest_query_id);
				source.stream(&text, stream, context);
			});
		}

		id
	}

	/// Split off an action keyword and narrow the target set when one matches.
	fn route<'q>(&self, query: &'q str) -> (Vec<RegisteredSource>, &'q str) {
		let (token, rest) = match query.split_once(char::is_whitespace) {
			Some((token, rest)) => (token, rest.trim_start()),
			None => (query, ""),
		};

		if let Some(key) = self.registry.source_for_keyword(token) {
			self.results.retain_source(key);
			let focused = self
				.registry
				.iter()
				.filter(|registered| registered.key() == key)
				.cloned()
				.collect();
			return (focused, rest);
		}

		(self.registry.iter().cloned().collect(), query)
	}

	/// True when every producer of the current generation sent its final batch.
	#[must_use]
	pub fn idle(&self) -> bool {
		lock(&self.in_flight).remaining == 0
	}

	/// Identifier of the most recently issued generation.
	#[must_use]
	pub fn latest_query_id(&self) -> u64 {
		self.latest_query_id.load(Ordering::Acquire)
	}

	/// The registry this dispatcher fans out to.
	#[must_use]
	pub fn registry(&self) -> &SourceRegistry {
		&self.registry
	}

	/// The results list this dispatcher feeds.
	#[must_use]
	pub fn results(&self) -> &Arc<ResultsList> {
		&self.results
	}
}

fn collector_loop(
	batch_rx: Receiver<BatchEnvelope>,
	results: &ResultsList,
	latest_query_id: &AtomicU64,
	in_flight: &Mutex<InFlight>,
) {
	while let Ok(envelope) = batch_rx.recv() {
		if envelope.id != latest_query_id.load(Ordering::Acquire) {
			debug!(
				id = envelope.id,
				source = envelope.source.id(),
				"dropping superseded batch"
			);
			continue;
		}

		let BatchEnvelope {
			id,
			source,
			candidates,
			complete,
		} = envelope;
		results.add_batch(source, candidates);

		if complete {
			let mut in_flight = lock(in_flight);
			if in_flight.id == id && in_flight.remaining > 0 {
				in_flight.remaining -= 1;
			}
		}
	}
}

fn lock(in_flight: &Mutex<InFlight>) -> MutexGuard<'_, InFlight> {
	in_flight.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
	use super::*;
	use blink_plugin_api::{Candidate, Source, SourceDescriptor, SourceKey};
	use std::time::{Duration, Instant};

	static ECHO_DESCRIPTOR: SourceDescriptor = SourceDescriptor {
		id: "echo",
		name: "Echo",
		description: "",
		action_keyword: None,
	};

	static SHOUT_DESCRIPTOR: SourceDescriptor = SourceDescriptor {
		id: "shout",
		name: "Shout",
		description: "",
		action_keyword: Some("!"),
	};

	/// Emits one candidate repeating the query text.
	struct EchoSource(&'static SourceDescriptor, i32);

	impl Source for EchoSource {
		fn descriptor(&self) -> &'static SourceDescriptor {
			self.0
		}

		fn stream(
			&self,
			query: &str,
			stream: BatchStream<'_>,
			_context: QueryContext<'_>,
		) -> bool {
			let key = SourceKey::from_descriptor(self.0);
			let candidate = Candidate::new(key, query, query, self.1);
			stream.send(vec![candidate], true)
		}
	}

	fn wait_until_idle(dispatcher: &QueryDispatcher) {
		let deadline = Instant::now() + Duration::from_secs(2);
		while !dispatcher.idle() {
			assert!(Instant::now() < deadline, "dispatcher never went idle");
			thread::sleep(Duration::from_millis(1));
		}
	}

	fn dispatcher() -> QueryDispatcher {
		let mut registry = SourceRegistry::new();
		registry
			.register(EchoSource(&ECHO_DESCRIPTOR, 10))
			.expect("register echo");
		registry
			.register(EchoSource(&SHOUT_DESCRIPTOR, 20))
			.expect("register shout");
		QueryDispatcher::new(registry, Arc::new(ResultsList::default()))
	}

	#[test]
	fn dispatch_queries_every_source() {
		let dispatcher = dispatcher();
		dispatcher.dispatch("hello");
		wait_until_idle(&dispatcher);

		let snapshot = dispatcher.results().snapshot();
		assert_eq!(snapshot.rows.len(), 2);
		assert_eq!(snapshot.rows[0].source.id(), "shout");
		assert_eq!(snapshot.rows[1].source.id(), "echo");
	}

	#[test]
	fn empty_query_clears_the_list() {
		let dispatcher = dispatcher();
		dispatcher.dispatch("hello");
		wait_until_idle(&dispatcher);
		assert!(!dispatcher.results().is_empty());

		dispatcher.dispatch("  ");
		wait_until_idle(&dispatcher);
		assert!(dispatcher.results().is_empty());
	}

	#[test]
	fn action_keyword_narrows_to_the_owning_source() {
		let dispatcher = dispatcher();
		dispatcher.dispatch("hello");
		wait_until_idle(&dispatcher);

		dispatcher.dispatch("! loud");
		wait_until_idle(&dispatcher);

		let snapshot = dispatcher.results().snapshot();
		assert_eq!(snapshot.rows.len(), 1);
		assert_eq!(snapshot.rows[0].source.id(), "shout");
		assert_eq!(snapshot.rows[0].identity, "loud");
	}

	#[test]
	fn superseded_batches_never_reach_the_list() {
		/// Waits until released, then emits a candidate tagged with its generation.
		struct GatedSource {
			release: Arc<AtomicU64>,
		}

		static GATED_DESCRIPTOR: SourceDescriptor = SourceDescriptor {
			id: "gated",
			name: "Gated",
			description: "",
			action_keyword: None,
		};

		impl Source for GatedSource {
			fn descriptor(&self) -> &'static SourceDescriptor {
				&GATED_DESCRIPTOR
			}

			fn stream(
				&self,
				query: &str,
				stream: BatchStream<'_>,
				_context: QueryContext<'_>,
			) -> bool {
				while self.release.load(Ordering::Acquire) < stream.id() {
					thread::sleep(Duration::from_millis(1));
				}
				let key = SourceKey::from_descriptor(&GATED_DESCRIPTOR);
				let identity = format!("{query}-{}", stream.id());
				stream.send(vec![Candidate::new(key, identity, query, 1)], true)
			}
		}

		let release = Arc::new(AtomicU64::new(0));
		let mut registry = SourceRegistry::new();
		registry
			.register(GatedSource {
				release: Arc::clone(&release),
			})
			.expect("register gated");
		let dispatcher = QueryDispatcher::new(registry, Arc::new(ResultsList::default()));

		let first = dispatcher.dispatch("one");
		let second = dispatcher.dispatch("two");
		assert!(first < second);

		// Release both producers; only the second generation may land.
		release.store(second, Ordering::Release);
		wait_until_idle(&dispatcher);

		let snapshot = dispatcher.results().snapshot();
		assert_eq!(snapshot.rows.len(), 1);
		assert_eq!(snapshot.rows[0].identity, format!("two-{second}"));
	}
}
