use std::collections::HashMap;
use std::sync::Arc;

use indexmap::IndexMap;

use crate::error::RegistryError;
use crate::types::SourceKey;

use super::{RegisteredSource, Source};

/// Registry of all result sources contributing to the launcher.
///
/// Iteration follows registration order, which is also the order producers
/// are spawned in when a query fans out.
#[derive(Clone, Default)]
pub struct SourceRegistry {
    sources: IndexMap<SourceKey, RegisteredSource>,
    id_index: HashMap<&'static str, SourceKey>,
    keyword_index: HashMap<&'static str, SourceKey>,
}

impl SourceRegistry {
    /// Create an empty registry without any sources registered.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a source implementation under its declared descriptor.
    pub fn register<S>(&mut self, source: S) -> Result<(), RegistryError>
    where
        S: Source + 'static,
    {
        let descriptor = source.descriptor();
        let key = SourceKey::from_descriptor(descriptor);

        if self.id_index.contains_key(descriptor.id) {
            return Err(RegistryError::DuplicateId { id: descriptor.id });
        }
        if let Some(keyword) = descriptor.action_keyword
            && let Some(owner) = self.keyword_index.get(keyword)
        {
            return Err(RegistryError::DuplicateActionKeyword {
                keyword,
                owner: owner.id(),
            });
        }

        let source = Arc::new(source) as Arc<dyn Source>;
        self.sources
            .insert(key, RegisteredSource::new(descriptor, source));
        self.id_index.insert(descriptor.id, key);
        if let Some(keyword) = descriptor.action_keyword {
            self.keyword_index.insert(keyword, key);
        }
        Ok(())
    }

    /// Lookup a source by its key.
    #[must_use]
    pub fn source(&self, key: SourceKey) -> Option<Arc<dyn Source>> {
        self.sources.get(&key).map(RegisteredSource::source)
    }

    /// Attempt to resolve an identifier to a registered source key.
    #[must_use]
    pub fn key_by_id(&self, id: &str) -> Option<SourceKey> {
        self.id_index.get(id).copied()
    }

    /// Attempt to resolve an identifier to a registered source implementation.
    #[must_use]
    pub fn source_by_id(&self, id: &str) -> Option<Arc<dyn Source>> {
        self.key_by_id(id).and_then(|key| self.source(key))
    }

    /// Resolve a leading query token to the source claiming it as an action keyword.
    #[must_use]
    pub fn source_for_keyword(&self, token: &str) -> Option<SourceKey> {
        self.keyword_index.get(token).copied()
    }

    /// Iterate over all registered sources in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &RegisteredSource> {
        self.sources.values()
    }

    /// Remove the source registered under `key`.
    pub fn deregister(&mut self, key: SourceKey) -> Option<RegisteredSource> {
        let removed = self.sources.shift_remove(&key);
        if let Some(ref registered) = removed {
            self.id_index.remove(registered.descriptor().id);
            if let Some(keyword) = registered.descriptor().action_keyword {
                self.keyword_index.remove(keyword);
            }
        }
        removed
    }

    /// Remove the source registered under `id`.
    pub fn deregister_by_id(&mut self, id: &str) -> Option<RegisteredSource> {
        let key = self.key_by_id(id)?;
        self.deregister(key)
    }

    /// Return the number of registered sources.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    /// Returns `true` when no sources have been registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Returns `true` if a source has been registered under `key`.
    #[must_use]
    pub fn contains_key(&self, key: SourceKey) -> bool {
        self.sources.contains_key(&key)
    }
}
