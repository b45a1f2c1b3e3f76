use serde::{Serialize, Serializer};

/// Static description of a result source contributed to the launcher.
#[derive(Debug)]
pub struct SourceDescriptor {
    /// Stable identifier used in configuration and diagnostics.
    pub id: &'static str,
    /// Human readable source name.
    pub name: &'static str,
    /// Short description shown alongside the source in pickers.
    pub description: &'static str,
    /// Leading query token that routes a query exclusively to this source.
    pub action_keyword: Option<&'static str>,
}

/// Identifies a single result source.
#[derive(Clone, Copy)]
pub struct SourceKey {
    descriptor: &'static SourceDescriptor,
}

impl std::fmt::Debug for SourceKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("SourceKey").field(&self.id()).finish()
    }
}

impl PartialEq for SourceKey {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.descriptor, other.descriptor)
    }
}

impl Eq for SourceKey {}

impl std::hash::Hash for SourceKey {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        std::hash::Hash::hash(&(self.descriptor as *const SourceDescriptor), state);
    }
}

impl Serialize for SourceKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.id())
    }
}

impl SourceKey {
    /// Create a source key backed by a static descriptor.
    #[must_use]
    pub const fn from_descriptor(descriptor: &'static SourceDescriptor) -> Self {
        Self { descriptor }
    }

    /// Return the identifier for this source.
    #[must_use]
    pub const fn id(self) -> &'static str {
        self.descriptor.id
    }

    /// Access the descriptor backing this key.
    #[must_use]
    pub const fn descriptor(self) -> &'static SourceDescriptor {
        self.descriptor
    }

    /// Return the action keyword claimed by this source, if any.
    #[must_use]
    pub const fn action_keyword(self) -> Option<&'static str> {
        self.descriptor.action_keyword
    }
}
