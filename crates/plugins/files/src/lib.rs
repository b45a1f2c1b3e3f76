use std::path::Path;
use std::sync::{Arc, mpsc};

use anyhow::Result;
use frizbee::match_list;
use ignore::{DirEntry, Error as IgnoreError, WalkBuilder, WalkState};

use blink_plugin_api::{
    BatchStream, Candidate, MATCH_CHUNK_SIZE, QueryContext, ScoreCollector, Source,
    SourceDescriptor, SourceKey, options_for_query,
};

pub static FILES_DESCRIPTOR: SourceDescriptor = SourceDescriptor {
    id: "files",
    name: "Files",
    description: "Fuzzy match file paths under the configured root",
    action_keyword: None,
};

#[must_use]
pub fn key() -> SourceKey {
    SourceKey::from_descriptor(&FILES_DESCRIPTOR)
}

/// Filesystem source backed by an index built once at construction.
///
/// Queries fuzzy-match against relative paths in fixed-size chunks, flushing
/// a replacement batch between chunks so the list fills while large indexes
/// are still being scored.
pub struct FilesSource {
    paths: Vec<String>,
}

impl FilesSource {
    /// Build the searchable index by walking the filesystem under `root`.
    ///
    /// # Errors
    ///
    /// Returns an error if the root cannot be inspected. Unreadable entries
    /// below it are skipped rather than failing the whole scan.
    pub fn scan(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        anyhow::ensure!(root.is_dir(), "files root {} is not a directory", root.display());

        let (tx, rx) = mpsc::channel();
        let walker_root = Arc::new(root);
        let threads = std::thread::available_parallelism().map_or(1, std::num::NonZeroUsize::get);

        WalkBuilder::new(walker_root.as_path())
            .hidden(false)
            .git_ignore(true)
            .git_global(true)
            .git_exclude(true)
            .ignore(true)
            .parents(true)
            .threads(threads)
            .build_parallel()
            .run(|| {
                let sender = tx.clone();
                let root = Arc::clone(&walker_root);
                Box::new(move |entry: Result<DirEntry, IgnoreError>| {
                    if let Ok(entry) = entry {
                        let Some(file_type) = entry.file_type() else {
                            return WalkState::Continue;
                        };
                        if !file_type.is_file() {
                            return WalkState::Continue;
                        }

                        let path = entry.path();
                        let relative = path.strip_prefix(root.as_path()).unwrap_or(path);
                        let display = relative.to_string_lossy().replace('\\', "/");
                        if sender.send(display).is_err() {
                            return WalkState::Quit;
                        }
                    }

                    WalkState::Continue
                })
            });

        drop(tx);

        let mut paths: Vec<String> = rx.into_iter().collect();
        paths.sort();

        Ok(Self { paths })
    }

    /// Number of indexed files.
    #[must_use]
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Returns `true` when the index holds no files.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

/// Display name for a relative path: its final component.
fn file_name(relative: &str) -> &str {
    relative.rsplit('/').next().unwrap_or(relative)
}

impl Source for FilesSource {
    fn descriptor(&self) -> &'static SourceDescriptor {
        &FILES_DESCRIPTOR
    }

    fn stream(&self, query: &str, stream: BatchStream<'_>, context: QueryContext<'_>) -> bool {
        let id = stream.id();
        let source = stream.source();
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return stream.send(Vec::new(), true);
        }

        let total = self.paths.len();
        let options = options_for_query(trimmed, total);
        let mut collector = ScoreCollector::new(stream);
        let mut haystacks = Vec::with_capacity(MATCH_CHUNK_SIZE);
        let mut offset = 0;
        while offset < total {
            if context.is_superseded(id) {
                return true;
            }

            let end = (offset + MATCH_CHUNK_SIZE).min(total);
            haystacks.clear();
            for path in &self.paths[offset..end] {
                haystacks.push(path.as_str());
            }
            let matches = match_list(trimmed, &haystacks, &options);
            for entry in matches {
                if entry.score == 0 {
                    continue;
                }
                let path = &self.paths[offset + entry.index as usize];
                let candidate = Candidate::new(
                    source,
                    path.clone(),
                    file_name(path),
                    i32::from(entry.score),
                )
                .with_subtitle(path.clone());
                collector.push(candidate);
            }

            if context.is_superseded(id) {
                return true;
            }
            if !collector.flush_partial() {
                return false;
            }

            offset = end;
        }

        if context.is_superseded(id) {
            return true;
        }

        collector.finish()
    }
}
