use blink_plugin_api::{
    BatchStream, Candidate, QueryContext, Source, SourceDescriptor, SourceKey,
};

mod parser;

use parser::evaluate;

pub static CALC_DESCRIPTOR: SourceDescriptor = SourceDescriptor {
    id: "calc",
    name: "Calculator",
    description: "Evaluate arithmetic expressions",
    action_keyword: Some("="),
};

/// Calculator answers outrank fuzzy matches from other sources.
const RESULT_SCORE: i32 = 300;

/// The answer row keeps one identity across keystrokes, so successive edits
/// refresh it in place instead of replacing the row.
const RESULT_IDENTITY: &str = "result";

#[must_use]
pub fn key() -> SourceKey {
    SourceKey::from_descriptor(&CALC_DESCRIPTOR)
}

/// Render a result without a trailing `.0` for whole numbers.
fn format_value(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

/// Arithmetic source: emits a single high-priority answer when the query
/// parses as an expression, and stays silent otherwise.
pub struct CalcSource;

impl Source for CalcSource {
    fn descriptor(&self) -> &'static SourceDescriptor {
        &CALC_DESCRIPTOR
    }

    fn stream(&self, query: &str, stream: BatchStream<'_>, context: QueryContext<'_>) -> bool {
        let trimmed = query.trim();
        // Tolerate the action keyword arriving glued to the expression.
        let expression = trimmed.strip_prefix('=').map_or(trimmed, str::trim_start);
        if context.is_superseded(stream.id()) {
            return true;
        }

        let candidates = match evaluate(expression) {
            Some(value) if value.is_finite() => {
                let rendered = format_value(value);
                vec![
                    Candidate::new(stream.source(), RESULT_IDENTITY, rendered.clone(), RESULT_SCORE)
                        .with_subtitle(format!("{expression} = {rendered}")),
                ]
            }
            _ => Vec::new(),
        };

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
        let delivered = CalcSource.stream(
            query,
            BatchStream::new(&tx, 1, key()),
            QueryContext::new(&latest),
        );
        assert!(delivered);
        let envelope = rx.try_recv().expect("one batch");
        envelope.candidates
    }

    #[test]
    fn expressions_produce_one_answer_row() {
        let candidates = run("2 + 3 * 4");
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].title, "14");
        assert_eq!(candidates[0].identity, RESULT_IDENTITY);
        assert_eq!(candidates[0].score, RESULT_SCORE);
    }

    #[test]
    fn non_expressions_stay_silent() {
        assert!(run("hello world").is_empty());
    }

    #[test]
    fn a_glued_action_keyword_is_tolerated() {
        let candidates = run("=6*7");
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].title, "42");
    }

    #[test]
    fn division_by_zero_stays_silent() {
        assert!(run("1 / 0").is_empty());
    }

    #[test]
    fn fractions_keep_their_decimals() {
        let candidates = run("7 / 2");
        assert_eq!(candidates[0].title, "3.5");
    }
}
