use serde::Serialize;

use super::SourceKey;

/// A scored, source-tagged result eligible for display.
///
/// Candidates are matched across batches from the same source by their
/// `identity` key, which names the underlying result (a file path, a computed
/// answer) independently of its score. The score and the display fields may be
/// refreshed in place by later batches; identity and source stay fixed for the
/// candidate's lifetime.
#[derive(Debug, Clone, Serialize)]
pub struct Candidate {
    /// Source that produced this candidate.
    pub source: SourceKey,
    /// Key recognizing the same logical result across batches.
    pub identity: String,
    /// Relevance rank, higher is more relevant. Not unique.
    pub score: i32,
    /// Primary display line.
    pub title: String,
    /// Secondary display line.
    pub subtitle: String,
    /// Icon reference for the surrounding shell, never interpreted here.
    pub icon: Option<String>,
}

impl Candidate {
    /// Create a candidate with an empty subtitle and no icon.
    #[must_use]
    pub fn new(
        source: SourceKey,
        identity: impl Into<String>,
        title: impl Into<String>,
        score: i32,
    ) -> Self {
        Self {
            source,
            identity: identity.into(),
            score,
            title: title.into(),
            subtitle: String::new(),
            icon: None,
        }
    }

    /// Attach a secondary display line.
    #[must_use]
    pub fn with_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = subtitle.into();
        self
    }

    /// Attach an icon reference.
    #[must_use]
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Whether the candidate carries the identity key merging requires.
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        !self.identity.is_empty()
    }

    /// Whether `other` names the same logical result.
    #[must_use]
    pub fn same_result(&self, other: &Self) -> bool {
        self.source == other.source && self.identity == other.identity
    }
}
