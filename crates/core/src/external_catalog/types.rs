//! Types for external catalog API responses.

use serde::{Deserialize, Serialize};

use crate::overrides::MediaDescriptor;

/// A TMDB genre.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TmdbGenre {
    pub id: i64,
    pub name: String,
}

/// A TMDB keyword.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TmdbKeyword {
    pub id: i64,
    pub name: String,
}

/// A TMDB movie.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TmdbMovie {
    /// TMDB movie ID.
    pub id: u32,
    /// Movie title.
    pub title: String,
    /// Original title (in original language).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_title: Option<String>,
    /// Release date (YYYY-MM-DD).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
    /// Original language code.
    pub original_language: String,
    #[serde(default)]
    pub genres: Vec<TmdbGenre>,
    #[serde(default)]
    pub keywords: Vec<TmdbKeyword>,
}

impl TmdbMovie {
    /// Matching view of this movie.
    pub fn descriptor(&self) -> MediaDescriptor {
        MediaDescriptor::new(
            self.genres.iter().map(|g| g.id),
            self.keywords.iter().map(|k| k.id),
            self.original_language.clone(),
        )
    }
}

/// A TMDB TV series.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TmdbSeries {
    /// TMDB series ID.
    pub id: u32,
    /// Series name.
    pub name: String,
    /// Original name (in original language).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_name: Option<String>,
    /// First air date (YYYY-MM-DD).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_air_date: Option<String>,
    /// Original language code.
    pub original_language: String,
    /// Every language spoken in the series. Not used for matching.
    #[serde(default)]
    pub languages: Vec<String>,
    #[serde(default)]
    pub genres: Vec<TmdbGenre>,
    #[serde(default)]
    pub keywords: Vec<TmdbKeyword>,
}

impl TmdbSeries {
    /// Matching view of this series.
    pub fn descriptor(&self) -> MediaDescriptor {
        MediaDescriptor::new(
            self.genres.iter().map(|g| g.id),
            self.keywords.iter().map(|k| k.id),
            self.original_language.clone(),
        )
    }
}
