use std::cmp::{Ordering as CmpOrdering, Reverse};
use std::collections::BinaryHeap;

use super::MAX_SOURCE_RESULTS;
use super::stream::BatchStream;
use crate::types::Candidate;

#[derive(Clone)]
struct Ranked {
    seq: usize,
    candidate: Candidate,
}

impl PartialEq for Ranked {
    fn eq(&self, other: &Self) -> bool {
        self.candidate.score == other.candidate.score && self.seq == other.seq
    }
}

impl Eq for Ranked {}

impl Ord for Ranked {
    fn cmp(&self, other: &Self) -> CmpOrdering {
        self.candidate
            .score
            .cmp(&other.candidate.score)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Ranked {
    fn partial_cmp(&self, other: &Self) -> Option<CmpOrdering> {
        Some(self.cmp(other))
    }
}

/// Maintains the highest scoring candidates a source has produced so far.
///
/// Flushes emit the full ranked set collected up to that point, so every
/// batch that reaches the consumer is a complete replacement of the source's
/// contribution, never an increment to it.
pub struct ScoreCollector<'a> {
    stream: BatchStream<'a>,
    heap: BinaryHeap<Reverse<Ranked>>,
    capacity: usize,
    seq: usize,
    dirty: bool,
    sent_any: bool,
}

impl<'a> ScoreCollector<'a> {
    /// Create a collector retaining at most [`MAX_SOURCE_RESULTS`] candidates.
    #[must_use]
    pub fn new(stream: BatchStream<'a>) -> Self {
        Self::with_capacity(stream, MAX_SOURCE_RESULTS)
    }

    /// Create a collector with an explicit retention limit.
    #[must_use]
    pub fn with_capacity(stream: BatchStream<'a>, capacity: usize) -> Self {
        Self {
            stream,
            heap: BinaryHeap::new(),
            capacity,
            seq: 0,
            dirty: false,
            sent_any: false,
        }
    }

    /// Insert a candidate and mark the collector dirty when the set changes.
    pub fn push(&mut self, candidate: Candidate) {
        let entry = Ranked {
            seq: self.seq,
            candidate,
        };
        self.seq += 1;
        if self.insert(entry) {
            self.dirty = true;
        }
    }

    fn insert(&mut self, entry: Ranked) -> bool {
        if self.capacity == 0 {
            return false;
        }
        if self.heap.len() < self.capacity {
            self.heap.push(Reverse(entry));
            true
        } else if let Some(mut current_min) = self.heap.peek_mut() {
            if entry > current_min.0 {
                *current_min = Reverse(entry);
                true
            } else {
                false
            }
        } else {
            false
        }
    }

    /// Emit an incremental replacement batch when new candidates were observed.
    pub fn flush_partial(&mut self) -> bool {
        if !self.dirty {
            return true;
        }
        self.emit(false)
    }

    /// Send the final batch for the generation.
    pub fn finish(&mut self) -> bool {
        self.emit(true)
    }

    fn emit(&mut self, complete: bool) -> bool {
        if self.heap.is_empty() && !complete && self.sent_any {
            self.dirty = false;
            return true;
        }

        let mut ranked: Vec<&Ranked> = self.heap.iter().map(|entry| &entry.0).collect();
        ranked.sort_unstable_by(|a, b| {
            b.candidate
                .score
                .cmp(&a.candidate.score)
                .then_with(|| a.seq.cmp(&b.seq))
        });
        let batch: Vec<Candidate> = ranked
            .into_iter()
            .map(|entry| entry.candidate.clone())
            .collect();

        if self.stream.send(batch, complete) {
            self.sent_any = true;
            self.dirty = false;
            true
        } else {
            false
        }
    }
}
