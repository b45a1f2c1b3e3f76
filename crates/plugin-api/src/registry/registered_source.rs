use std::sync::Arc;

use crate::types::{SourceDescriptor, SourceKey};

use super::Source;

/// A source plus the bookkeeping captured at registration time.
#[derive(Clone)]
pub struct RegisteredSource {
    descriptor: &'static SourceDescriptor,
    source: Arc<dyn Source>,
}

impl RegisteredSource {
    /// Wrap a source for storage in the registry.
    #[must_use]
    pub fn new(descriptor: &'static SourceDescriptor, source: Arc<dyn Source>) -> Self {
        Self { descriptor, source }
    }

    /// Descriptor the source registered with.
    #[must_use]
    pub fn descriptor(&self) -> &'static SourceDescriptor {
        self.descriptor
    }

    /// Key identifying the source.
    #[must_use]
    pub fn key(&self) -> SourceKey {
        SourceKey::from_descriptor(self.descriptor)
    }

    /// Access the source implementation.
    #[must_use]
    pub fn source(&self) -> Arc<dyn Source> {
        Arc::clone(&self.source)
    }
}
