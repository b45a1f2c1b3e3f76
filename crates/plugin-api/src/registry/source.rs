use crate::context::QueryContext;
use crate::search::BatchStream;
use crate::types::SourceDescriptor;

/// A result source contributing candidates to the launcher.
///
/// Implementations run on their own producer thread and may emit any number
/// of partial replacement batches before the final one. They must check
/// [`QueryContext::is_superseded`] between units of work and stop streaming
/// once a newer query generation exists.
pub trait Source: Send + Sync {
    /// Static descriptor identifying this source.
    fn descriptor(&self) -> &'static SourceDescriptor;

    /// Stream candidate batches for `query`.
    ///
    /// Returns `false` when the consumer disconnected and no further work
    /// should be attempted for this generation.
    fn stream(&self, query: &str, stream: BatchStream<'_>, context: QueryContext<'_>) -> bool;
}
