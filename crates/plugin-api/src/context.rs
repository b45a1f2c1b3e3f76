use std::sync::atomic::{AtomicU64, Ordering};

/// Shared inputs provided to sources when they are asked to stream candidates.
///
/// Wrapping the shared state in a context struct makes it easier to extend the
/// available data later without forcing every source implementation to adjust
/// its method signature.
pub struct QueryContext<'a> {
    latest_query_id: &'a AtomicU64,
}

impl<'a> QueryContext<'a> {
    /// Create a query context for the current generation counter.
    #[must_use]
    pub fn new(latest_query_id: &'a AtomicU64) -> Self {
        Self { latest_query_id }
    }

    /// Access the `AtomicU64` tracking the latest issued query generation.
    #[must_use]
    pub fn latest_query_id(&self) -> &'a AtomicU64 {
        self.latest_query_id
    }

    /// Whether generation `id` has been superseded by a newer query.
    ///
    /// Producers must stop streaming once this returns `true`; the consumer
    /// has no generation counter of its own and relies on stale batches being
    /// suppressed before they are sent.
    #[must_use]
    pub fn is_superseded(&self, id: u64) -> bool {
        self.latest_query_id.load(Ordering::Acquire) != id
    }
}
