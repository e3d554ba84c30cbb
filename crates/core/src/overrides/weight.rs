//! Rule weighting.

use std::collections::BTreeSet;

use super::types::{MatchRule, MediaDescriptor};

/// Score how well `media` satisfies `rule`. Zero means no match.
///
/// Criteria are applied in the order genres, keywords, language. Each
/// configured criterion folds in as `weight = (weight + 1) * hits`, where
/// `hits` is the number of media values found in the rule. A configured
/// criterion with no hits disqualifies the whole rule.
pub fn compute_weight(rule: &MatchRule, media: &MediaDescriptor) -> u64 {
    let genres = || rule.configured_genres().map(|g| count_hits(&media.genre_ids, g));
    let keywords = || rule.configured_keywords().map(|k| count_hits(&media.keyword_ids, k));
    let language = || {
        rule.configured_languages()
            .map(|langs| u64::from(langs.iter().any(|l| *l == media.original_language)))
    };

    let criteria: [&dyn Fn() -> Option<u64>; 3] = [&genres, &keywords, &language];

    let mut weight: u64 = 0;
    for criterion in criteria {
        let Some(hits) = criterion() else {
            continue;
        };
        if hits == 0 {
            return 0;
        }
        weight = weight.saturating_add(1).saturating_mul(hits);
    }
    weight
}

fn count_hits(media_values: &BTreeSet<i64>, rule_values: &[i64]) -> u64 {
    media_values
        .iter()
        .filter(|value| rule_values.contains(value))
        .count() as u64
}
