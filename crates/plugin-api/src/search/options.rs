use frizbee::Config as Options;

use super::PREFILTER_ENABLE_THRESHOLD;

/// Build fuzzy matching options for the provided query and dataset size.
///
/// Typo tolerance scales with the query length; the prefilter only pays off
/// on datasets large enough to amortize its setup cost.
#[must_use]
pub fn options_for_query(query: &str, dataset_len: usize) -> Options {
    let mut options = Options {
        prefilter: false,
        ..Options::default()
    };

    let length = query.chars().count();
    let mut allowed_typos: u16 = match length {
        0 | 1 => 0,
        2..=4 => 1,
        5..=7 => 2,
        8..=12 => 3,
        _ => 4,
    };
    if let Ok(max_reasonable) = u16::try_from(length.saturating_sub(1)) {
        allowed_typos = allowed_typos.min(max_reasonable);
    }

    if dataset_len >= PREFILTER_ENABLE_THRESHOLD {
        options.prefilter = true;
        options.max_typos = Some(allowed_typos);
    } else {
        options.prefilter = false;
        options.max_typos = None;
    }

    options.sort = false;

    options
}
