//! Selection of the winning override among weighted rules.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::observer::ResolutionObserver;
use super::types::{MediaDescriptor, OverridePayload, OverrideRule};
use super::weight::compute_weight;

/// Outcome of weighing a rule list against one media item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    /// Weight of each rule, in input order.
    pub weights: Vec<u64>,
    /// Index of the winning rule, if any rule scored above zero.
    pub winner: Option<usize>,
}

impl Resolution {
    pub fn is_match(&self) -> bool {
        self.winner.is_some()
    }

    pub fn winning_weight(&self) -> Option<u64> {
        self.winner.and_then(|index| self.weights.get(index).copied())
    }

    /// Normalized payload of the winning rule from `rules`.
    ///
    /// `rules` must be the slice this resolution was computed from.
    pub fn winning_payload(&self, rules: &[OverrideRule]) -> Option<OverridePayload> {
        self.winner
            .and_then(|index| rules.get(index))
            .map(|rule| rule.payload.clone().normalized())
    }
}

/// Weigh every rule and pick the heaviest.
///
/// The scan only replaces the current best on a strictly greater weight, so
/// the earliest of several equally heavy rules wins. Rules weighing zero are
/// never selected.
pub fn evaluate(media: &MediaDescriptor, rules: &[OverrideRule]) -> Resolution {
    let mut weights = Vec::with_capacity(rules.len());
    let mut best: Option<(usize, u64)> = None;

    for (index, rule) in rules.iter().enumerate() {
        let weight = compute_weight(&rule.rule, media);
        weights.push(weight);

        let best_weight = best.map_or(0, |(_, w)| w);
        if weight > best_weight {
            best = Some((index, weight));
        }
    }

    Resolution {
        weights,
        winner: best.map(|(index, _)| index),
    }
}

/// Pick the override for `media`, or `None` when no rule matches.
pub fn resolve_override(media: &MediaDescriptor, rules: &[OverrideRule]) -> Option<OverridePayload> {
    if rules.is_empty() {
        return None;
    }
    evaluate(media, rules).winning_payload(rules)
}

/// Resolver with an optional observer notified after each evaluation.
#[derive(Clone, Default)]
pub struct OverrideResolver {
    observer: Option<Arc<dyn ResolutionObserver>>,
}

impl std::fmt::Debug for OverrideResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OverrideResolver")
            .field("observer", &self.observer.is_some())
            .finish()
    }
}

impl OverrideResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach an observer. It sees every evaluation but cannot alter it.
    pub fn with_observer(mut self, observer: Arc<dyn ResolutionObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    pub fn evaluate(&self, media: &MediaDescriptor, rules: &[OverrideRule]) -> Resolution {
        let resolution = evaluate(media, rules);
        if let Some(observer) = &self.observer {
            observer.on_resolution(media, rules, &resolution);
        }
        resolution
    }

    pub fn resolve(
        &self,
        media: &MediaDescriptor,
        rules: &[OverrideRule],
    ) -> Option<OverridePayload> {
        if rules.is_empty() {
            return None;
        }
        self.evaluate(media, rules).winning_payload(rules)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::overrides::{MatchRule, TracingObserver};
    use std::sync::Mutex;

    fn genre_rule(genres: &[i64], root_folder: &str) -> OverrideRule {
        OverrideRule::new(
            MatchRule {
                genres: Some(genres.to_vec()),
                ..Default::default()
            },
            OverridePayload {
                root_folder: Some(root_folder.to_string()),
                ..Default::default()
            },
        )
    }

    fn anime_descriptor() -> MediaDescriptor {
        MediaDescriptor::new([1, 2], [5], "ja")
    }

    #[test]
    fn test_no_rules_no_match() {
        assert_eq!(resolve_override(&anime_descriptor(), &[]), None);
        let resolution = evaluate(&anime_descriptor(), &[]);
        assert!(resolution.weights.is_empty());
        assert!(!resolution.is_match());
    }

    #[test]
    fn test_single_genre_rule_matches() {
        let media = MediaDescriptor::new([1, 2], [], "en");
        let rules = vec![genre_rule(&[1], "/tv/anime")];

        let payload = resolve_override(&media, &rules).unwrap();
        assert_eq!(payload.root_folder.as_deref(), Some("/tv/anime"));
    }

    #[test]
    fn test_non_intersecting_rule_no_match() {
        let media = MediaDescriptor::new([1, 2], [], "en");
        let rules = vec![genre_rule(&[9], "/tv/other")];
        assert_eq!(resolve_override(&media, &rules), None);
    }

    #[test]
    fn test_unconstrained_rule_never_wins_even_alone() {
        let rules = vec![OverrideRule::new(
            MatchRule::default(),
            OverridePayload {
                root_folder: Some("/tv/everything".to_string()),
                ..Default::default()
            },
        )];
        let resolution = evaluate(&anime_descriptor(), &rules);
        assert_eq!(resolution.weights, vec![0]);
        assert_eq!(resolve_override(&anime_descriptor(), &rules), None);
    }

    #[test]
    fn test_heaviest_rule_wins_regardless_of_position() {
        let rules = vec![
            genre_rule(&[1], "/tv/light"),
            genre_rule(&[1, 2], "/tv/heavy"),
        ];
        let resolution = evaluate(&anime_descriptor(), &rules);
        assert_eq!(resolution.weights, vec![1, 2]);
        assert_eq!(resolution.winner, Some(1));
        assert_eq!(resolution.winning_weight(), Some(2));
    }

    #[test]
    fn test_tie_goes_to_first_declared() {
        let rule = MatchRule {
            genres: Some(vec![1, 2]),
            languages: Some(vec!["ja".to_string()]),
            ..Default::default()
        };
        let rules = vec![
            OverrideRule::new(
                rule.clone(),
                OverridePayload {
                    root_folder: Some("/tv/first".to_string()),
                    ..Default::default()
                },
            ),
            OverrideRule::new(
                rule,
                OverridePayload {
                    root_folder: Some("/tv/second".to_string()),
                    ..Default::default()
                },
            ),
        ];

        let resolution = evaluate(&anime_descriptor(), &rules);
        assert_eq!(resolution.weights, vec![3, 3]);
        let payload = resolution.winning_payload(&rules).unwrap();
        assert_eq!(payload.root_folder.as_deref(), Some("/tv/first"));
    }

    #[test]
    fn test_zero_weight_rules_are_skipped_before_winner() {
        let rules = vec![
            genre_rule(&[9], "/tv/miss"),
            OverrideRule::default(),
            genre_rule(&[2], "/tv/hit"),
        ];
        let resolution = evaluate(&anime_descriptor(), &rules);
        assert_eq!(resolution.weights, vec![0, 0, 1]);
        assert_eq!(resolution.winner, Some(2));
    }

    #[test]
    fn test_winning_empty_tags_become_absent() {
        let rules = vec![OverrideRule::new(
            MatchRule {
                languages: Some(vec!["ja".to_string()]),
                ..Default::default()
            },
            OverridePayload {
                root_folder: Some("/tv/anime".to_string()),
                tags: Some(vec![]),
                profile_id: Some(2),
            },
        )];

        let payload = resolve_override(&anime_descriptor(), &rules).unwrap();
        assert_eq!(payload.tags, None);
        assert_eq!(payload.root_folder.as_deref(), Some("/tv/anime"));
        assert_eq!(payload.profile_id, Some(2));
        // The configured rule itself is untouched.
        assert_eq!(rules[0].payload.tags, Some(vec![]));
    }

    #[test]
    fn test_repeated_resolution_is_stable() {
        let rules = vec![genre_rule(&[1], "/a"), genre_rule(&[2], "/b")];
        let media = anime_descriptor();
        let first = evaluate(&media, &rules);
        for _ in 0..5 {
            assert_eq!(evaluate(&media, &rules), first);
        }
        assert_eq!(first.winner, Some(0));
    }

    #[test]
    fn test_out_of_range_winner_does_not_panic() {
        let resolution = Resolution {
            weights: vec![1],
            winner: Some(3),
        };
        let rules = vec![genre_rule(&[1], "/a")];

        assert_eq!(resolution.winning_weight(), None);
        assert_eq!(resolution.winning_payload(&rules), None);
        TracingObserver.on_resolution(&anime_descriptor(), &rules, &resolution);
    }

    #[derive(Default)]
    struct RecordingObserver {
        seen: Mutex<Vec<Resolution>>,
    }

    impl ResolutionObserver for RecordingObserver {
        fn on_resolution(
            &self,
            _media: &MediaDescriptor,
            _rules: &[OverrideRule],
            resolution: &Resolution,
        ) {
            self.seen.lock().unwrap().push(resolution.clone());
        }
    }

    #[test]
    fn test_observer_sees_every_evaluation() {
        let observer = Arc::new(RecordingObserver::default());
        let resolver = OverrideResolver::new().with_observer(observer.clone());
        let rules = vec![genre_rule(&[9], "/miss"), genre_rule(&[1], "/hit")];

        let payload = resolver.resolve(&anime_descriptor(), &rules).unwrap();
        assert_eq!(payload.root_folder.as_deref(), Some("/hit"));

        let seen = observer.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].weights, vec![0, 1]);
        assert_eq!(seen[0].winner, Some(1));
    }

    #[test]
    fn test_observer_not_called_without_rules() {
        let observer = Arc::new(RecordingObserver::default());
        let resolver = OverrideResolver::new().with_observer(observer.clone());

        assert_eq!(resolver.resolve(&anime_descriptor(), &[]), None);
        assert!(observer.seen.lock().unwrap().is_empty());
    }
}
