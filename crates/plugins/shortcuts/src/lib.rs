use frizbee::match_list;

use blink_plugin_api::{
    BatchStream, Candidate, QueryContext, Source, SourceDescriptor, SourceKey, options_for_query,
};

pub static SHORTCUTS_DESCRIPTOR: SourceDescriptor = SourceDescriptor {
    id: "shortcuts",
    name: "Web shortcuts",
    description: "Open a web search for the query",
    action_keyword: Some("?"),
};

/// Score for a query that addresses a shortcut by its keyword.
const DIRECT_HIT_SCORE: i32 = 100;

#[must_use]
pub fn key() -> SourceKey {
    SourceKey::from_descriptor(&SHORTCUTS_DESCRIPTOR)
}

struct Shortcut {
    keyword: &'static str,
    name: &'static str,
    template: &'static str,
}

static SHORTCUTS: [Shortcut; 5] = [
    Shortcut {
        keyword: "g",
        name: "Google",
        template: "https://www.google.com/search?q={}",
    },
    Shortcut {
        keyword: "w",
        name: "Wikipedia",
        template: "https://en.wikipedia.org/wiki/Special:Search?search={}",
    },
    Shortcut {
        keyword: "gh",
        name: "GitHub",
        template: "https://github.com/search?q={}",
    },
    Shortcut {
        keyword: "yt",
        name: "YouTube",
        template: "https://www.youtube.com/results?search_query={}",
    },
    Shortcut {
        keyword: "crates",
        name: "crates.io",
        template: "https://crates.io/search?q={}",
    },
];

impl Shortcut {
    fn url(&self, terms: &str) -> String {
        let encoded: Vec<&str> = terms.split_whitespace().collect();
        self.template.replace("{}", &encoded.join("+"))
    }

    fn candidate(&self, source: SourceKey, terms: &str, score: i32) -> Candidate {
        let url = self.url(terms);
        Candidate::new(
            source,
            url.clone(),
            format!("Search {} for '{terms}'", self.name),
            score,
        )
        .with_subtitle(url)
    }
}

/// Web search shortcuts: a keyword-addressed query expands straight into a
/// search URL, anything else fuzzy-matches the shortcut names for discovery.
pub struct ShortcutsSource;

impl Source for ShortcutsSource {
    fn descriptor(&self) -> &'static SourceDescriptor {
        &SHORTCUTS_DESCRIPTOR
    }

    fn stream(&self, query: &str, stream: BatchStream<'_>, context: QueryContext<'_>) -> bool {
        let id = stream.id();
        let source = stream.source();
        let trimmed = query.trim();
        if trimmed.is_empty() || context.is_superseded(id) {
            return stream.send(Vec::new(), true);
        }

        let (token, terms) = match trimmed.split_once(char::is_whitespace) {
            Some((token, rest)) => (token, rest.trim_start()),
            None => (trimmed, ""),
        };

        if !terms.is_empty()
            && let Some(shortcut) = SHORTCUTS.iter().find(|entry| entry.keyword == token)
        {
            let candidate = shortcut.candidate(source, terms, DIRECT_HIT_SCORE);
            return stream.send(vec![candidate], true);
        }

        // No keyword hit: offer matching shortcuts searching the whole query.
        let names: Vec<&str> = SHORTCUTS.iter().map(|entry| entry.name).collect();
        let options = options_for_query(trimmed, names.len());
        let mut candidates: Vec<Candidate> = match_list(trimmed, &names, &options)
            .into_iter()
            .filter(|entry| entry.score > 0)
            .map(|entry| {
                SHORTCUTS[entry.index as usize].candidate(
                    source,
                    trimmed,
                    i32::from(entry.score),
                )
            })
            .collect();
        candidates.sort_by(|a, b| b.score.cmp(&a.score));

        stream.send(candidates, true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicU64;
    use std::sync::mpsc::channel;

    fn run(query: &str) -> Vec<Candidate> {
        let (tx, rx) = channel();
        let latest = AtomicU64::new(1);
        let delivered = ShortcutsSource.stream(
            query,
            BatchStream::new(&tx, 1, key()),
            QueryContext::new(&latest),
        );
        assert!(delivered);
        let envelope = rx.try_recv().expect("one batch");
        assert!(envelope.complete);
        envelope.candidates
    }

    #[test]
    fn keyword_queries_expand_into_a_search_url() {
        let candidates = run("g rust launcher");
        assert_eq!(candidates.len(), 1);
        assert_eq!(
            candidates[0].identity,
            "https://www.google.com/search?q=rust+launcher"
        );
        assert_eq!(candidates[0].title, "Search Google for 'rust launcher'");
        assert_eq!(candidates[0].score, DIRECT_HIT_SCORE);
    }

    #[test]
    fn bare_keywords_fall_back_to_discovery() {
        let candidates = run("github");
        assert!(!candidates.is_empty());
        assert!(candidates[0].title.starts_with("Search GitHub"));
    }

    #[test]
    fn unrelated_queries_produce_nothing() {
        assert!(run("zzzzqqqq").is_empty());
    }

    #[test]
    fn empty_queries_clear_the_contribution() {
        assert!(run("   ").is_empty());
    }
}
