//! Types for override rules and the media they are matched against.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// The subset of a media item's metadata used for rule matching.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaDescriptor {
    /// TMDB genre IDs attached to the media.
    #[serde(default)]
    pub genre_ids: BTreeSet<i64>,
    /// TMDB keyword IDs attached to the media.
    #[serde(default)]
    pub keyword_ids: BTreeSet<i64>,
    /// Original language code (ISO 639-1, e.g. "ja").
    pub original_language: String,
}

impl MediaDescriptor {
    /// Build a descriptor. Duplicate IDs collapse.
    pub fn new(
        genre_ids: impl IntoIterator<Item = i64>,
        keyword_ids: impl IntoIterator<Item = i64>,
        original_language: impl Into<String>,
    ) -> Self {
        Self {
            genre_ids: genre_ids.into_iter().collect(),
            keyword_ids: keyword_ids.into_iter().collect(),
            original_language: original_language.into(),
        }
    }
}

/// Criteria deciding whether an override applies.
///
/// Each criterion is either configured (present and non-empty) or not
/// applied at all. An empty list behaves exactly like an absent one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRule {
    /// Genre IDs, any of which must be present on the media.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genres: Option<Vec<i64>>,
    /// Keyword IDs, any of which must be present on the media.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keywords: Option<Vec<i64>>,
    /// Accepted original languages.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub languages: Option<Vec<String>>,
}

impl MatchRule {
    pub fn configured_genres(&self) -> Option<&[i64]> {
        configured(&self.genres)
    }

    pub fn configured_keywords(&self) -> Option<&[i64]> {
        configured(&self.keywords)
    }

    pub fn configured_languages(&self) -> Option<&[String]> {
        configured(&self.languages)
    }

    /// True when no criterion is configured. Such a rule can never match.
    pub fn is_unconstrained(&self) -> bool {
        self.configured_genres().is_none()
            && self.configured_keywords().is_none()
            && self.configured_languages().is_none()
    }
}

fn configured<T>(criterion: &Option<Vec<T>>) -> Option<&[T]> {
    criterion.as_deref().filter(|values| !values.is_empty())
}

/// Settings forwarded to Sonarr/Radarr when a rule wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverridePayload {
    /// Root folder path.
    #[serde(default, alias = "rootFolder", skip_serializing_if = "Option::is_none")]
    pub root_folder: Option<String>,
    /// Tag IDs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<u32>>,
    /// Quality profile ID.
    #[serde(default, alias = "profileId", skip_serializing_if = "Option::is_none")]
    pub profile_id: Option<u32>,
}

impl OverridePayload {
    /// Turn an explicit empty tag list into "no tag override".
    pub fn normalized(mut self) -> Self {
        if self.tags.as_ref().is_some_and(Vec::is_empty) {
            self.tags = None;
        }
        self
    }
}

/// A match rule paired with the override it selects.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverrideRule {
    #[serde(default)]
    pub rule: MatchRule,
    #[serde(rename = "override", default)]
    pub payload: OverridePayload,
}

impl OverrideRule {
    pub fn new(rule: MatchRule, payload: OverridePayload) -> Self {
        Self { rule, payload }
    }
}
