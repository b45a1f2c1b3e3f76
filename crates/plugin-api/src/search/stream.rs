use std::sync::mpsc::Sender;

use crate::types::{Candidate, SourceKey};

/// Batch of candidates emitted by a source for one query generation.
///
/// Every batch is a complete replacement of the source's prior contribution:
/// the consumer merges it wholesale, dropping anything the source no longer
/// reports. A batch must not contain two candidates with the same identity
/// key; producers are responsible for deduplicating before sending.
#[derive(Debug, Clone)]
pub struct BatchEnvelope {
    /// Query generation the batch belongs to.
    pub id: u64,
    /// Source that produced the batch.
    pub source: SourceKey,
    /// Ranked candidates, best first.
    pub candidates: Vec<Candidate>,
    /// Whether the producer finished streaming for this generation.
    pub complete: bool,
}

/// Handle used by a source to stream candidate batches to the consumer.
#[derive(Clone)]
pub struct BatchStream<'a> {
    tx: &'a Sender<BatchEnvelope>,
    id: u64,
    source: SourceKey,
}

impl<'a> BatchStream<'a> {
    /// Create a stream handle bound to one query generation.
    #[must_use]
    pub fn new(tx: &'a Sender<BatchEnvelope>, id: u64, source: SourceKey) -> Self {
        Self { tx, id, source }
    }

    /// Query generation this handle emits for.
    #[must_use]
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Source this handle emits for.
    #[must_use]
    pub fn source(&self) -> SourceKey {
        self.source
    }

    /// Send a replacement batch to the consumer.
    ///
    /// The `complete` flag is `true` exactly once per generation and signals
    /// that no further batches will arrive from this source. Returns `false`
    /// when the consumer disconnected.
    pub fn send(&self, candidates: Vec<Candidate>, complete: bool) -> bool {
        self.tx
            .send(BatchEnvelope {
                id: self.id,
                source: self.source,
                candidates,
                complete,
            })
            .is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SourceDescriptor;
    use std::sync::mpsc::channel;

    static TEST_DESCRIPTOR: SourceDescriptor = SourceDescriptor {
        id: "stream-test",
        name: "Stream test",
        description: "",
        action_keyword: None,
    };

    #[test]
    fn send_wraps_candidates_in_an_envelope() {
        let (tx, rx) = channel();
        let stream = BatchStream::new(&tx, 3, SourceKey::from_descriptor(&TEST_DESCRIPTOR));

        assert!(stream.send(Vec::new(), true));
        let envelope = rx.try_recv().expect("envelope should be delivered");
        assert_eq!(envelope.id, 3);
        assert_eq!(envelope.source.id(), "stream-test");
        assert!(envelope.complete);
        assert!(envelope.candidates.is_empty());
    }

    #[test]
    fn send_reports_a_disconnected_consumer() {
        let (tx, rx) = channel();
        let stream = BatchStream::new(&tx, 1, SourceKey::from_descriptor(&TEST_DESCRIPTOR));
        drop(rx);
        assert!(!stream.send(Vec::new(), false));
    }
}
