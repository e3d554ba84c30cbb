//! Testing utilities and mock implementations.
//!
//! # Example
//!
//! ```rust,ignore
//! use routarr_core::testing::{fixtures, MockExternalCatalog};
//!
//! let catalog = MockExternalCatalog::new();
//! catalog
//!     .add_series(fixtures::tmdb_series(37854, "One Piece", &[16], &[210024], "ja"))
//!     .await;
//! ```

mod mock_external_catalog;

pub use mock_external_catalog::{MockExternalCatalog, RecordedCatalogQuery};

/// Test fixtures and helper functions.
pub mod fixtures {
    use crate::config::{DestinationConfig, DestinationKind};
    use crate::external_catalog::{TmdbGenre, TmdbKeyword, TmdbMovie, TmdbSeries};
    use crate::overrides::{MatchRule, OverridePayload, OverrideRule};

    fn genres(ids: &[i64]) -> Vec<TmdbGenre> {
        ids.iter()
            .map(|&id| TmdbGenre {
                id,
                name: format!("Genre {}", id),
            })
            .collect()
    }

    fn keywords(ids: &[i64]) -> Vec<TmdbKeyword> {
        ids.iter()
            .map(|&id| TmdbKeyword {
                id,
                name: format!("keyword-{}", id),
            })
            .collect()
    }

    /// Create a test TMDB TV series.
    pub fn tmdb_series(
        id: u32,
        name: &str,
        genre_ids: &[i64],
        keyword_ids: &[i64],
        language: &str,
    ) -> TmdbSeries {
        TmdbSeries {
            id,
            name: name.to_string(),
            original_name: None,
            first_air_date: Some("2020-01-01".to_string()),
            original_language: language.to_string(),
            languages: vec![language.to_string()],
            genres: genres(genre_ids),
            keywords: keywords(keyword_ids),
        }
    }

    /// Create a test TMDB movie.
    pub fn tmdb_movie(
        id: u32,
        title: &str,
        genre_ids: &[i64],
        keyword_ids: &[i64],
        language: &str,
    ) -> TmdbMovie {
        TmdbMovie {
            id,
            title: title.to_string(),
            original_title: None,
            release_date: Some("2020-06-15".to_string()),
            original_language: language.to_string(),
            genres: genres(genre_ids),
            keywords: keywords(keyword_ids),
        }
    }

    /// Create an override rule; empty slices leave the criterion unset.
    pub fn override_rule(
        genre_ids: &[i64],
        keyword_ids: &[i64],
        languages: &[&str],
        root_folder: &str,
    ) -> OverrideRule {
        OverrideRule::new(
            MatchRule {
                genres: (!genre_ids.is_empty()).then(|| genre_ids.to_vec()),
                keywords: (!keyword_ids.is_empty()).then(|| keyword_ids.to_vec()),
                languages: (!languages.is_empty())
                    .then(|| languages.iter().map(|l| l.to_string()).collect()),
            },
            OverridePayload {
                root_folder: Some(root_folder.to_string()),
                ..Default::default()
            },
        )
    }

    /// Create a destination with the given rules.
    pub fn destination(
        name: &str,
        kind: DestinationKind,
        overrides: Option<Vec<OverrideRule>>,
    ) -> DestinationConfig {
        DestinationConfig {
            name: name.to_string(),
            kind,
            overrides,
        }
    }
}
