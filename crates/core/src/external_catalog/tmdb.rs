//! TMDB (The Movie Database) API client.
//!
//! TMDB requires an API key for access.
//! Rate limits are generous (around 40 requests per second).

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::types::{TmdbGenre, TmdbKeyword, TmdbMovie, TmdbSeries};
use super::ExternalCatalogError;

const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";

/// TMDB API client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TmdbConfig {
    /// TMDB API key (required).
    pub api_key: String,
    /// Base URL (default: https://api.themoviedb.org/3).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Request timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u32,
}

fn default_timeout() -> u32 {
    30
}

/// TMDB API client.
pub struct TmdbClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl TmdbClient {
    /// Create a new TMDB client.
    pub fn new(config: TmdbConfig) -> Result<Self, ExternalCatalogError> {
        if config.api_key.is_empty() {
            return Err(ExternalCatalogError::NotConfigured(
                "TMDB API key is required".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(u64::from(config.timeout_secs)))
            .build()?;

        let base_url = config
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        Ok(Self {
            client,
            base_url,
            api_key: config.api_key,
        })
    }

    /// Get a TV series with its genres and keywords.
    pub async fn get_tv(&self, tmdb_id: u32) -> Result<TmdbSeries, ExternalCatalogError> {
        debug!("TMDB get TV: id={}", tmdb_id);

        let details: TmdbTvDetails = self
            .get_details(&format!("tv/{}", tmdb_id), || {
                format!("TV series ID {}", tmdb_id)
            })
            .await?;

        Ok(details.into())
    }

    /// Get a movie with its genres and keywords.
    pub async fn get_movie(&self, tmdb_id: u32) -> Result<TmdbMovie, ExternalCatalogError> {
        debug!("TMDB get movie: id={}", tmdb_id);

        let details: TmdbMovieDetails = self
            .get_details(&format!("movie/{}", tmdb_id), || {
                format!("Movie ID {}", tmdb_id)
            })
            .await?;

        Ok(details.into())
    }

    async fn get_details<T: DeserializeOwned>(
        &self,
        path: &str,
        describe: impl FnOnce() -> String,
    ) -> Result<T, ExternalCatalogError> {
        let url = format!("{}/{}", self.base_url, path);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("api_key", self.api_key.as_str()),
                ("append_to_response", "keywords"),
            ])
            .send()
            .await?;

        let status = response.status();
        match status {
            StatusCode::UNAUTHORIZED => {
                return Err(ExternalCatalogError::NotConfigured(
                    "Invalid TMDB API key".to_string(),
                ))
            }
            StatusCode::NOT_FOUND => return Err(ExternalCatalogError::NotFound(describe())),
            StatusCode::TOO_MANY_REQUESTS => return Err(ExternalCatalogError::RateLimitExceeded),
            _ if !status.is_success() => {
                let body = response.text().await.unwrap_or_default();
                return Err(ExternalCatalogError::ApiError {
                    status: status.as_u16(),
                    message: body,
                });
            }
            _ => {}
        }

        response.json().await.map_err(|e| {
            ExternalCatalogError::ParseError(format!("Failed to parse {} response: {}", path, e))
        })
    }
}

// ============================================================================
// TMDB API Response Types (private)
// ============================================================================

#[derive(Debug, Deserialize)]
struct TmdbGenreResult {
    id: i64,
    name: String,
}

#[derive(Debug, Deserialize)]
struct TmdbKeywordResult {
    id: i64,
    name: String,
}

/// `keywords` block appended to TV details.
#[derive(Debug, Default, Deserialize)]
struct TmdbTvKeywords {
    #[serde(default)]
    results: Vec<TmdbKeywordResult>,
}

/// `keywords` block appended to movie details.
#[derive(Debug, Default, Deserialize)]
struct TmdbMovieKeywords {
    #[serde(default)]
    keywords: Vec<TmdbKeywordResult>,
}

#[derive(Debug, Deserialize)]
struct TmdbTvDetails {
    id: u32,
    name: String,
    original_name: Option<String>,
    first_air_date: Option<String>,
    #[serde(default)]
    original_language: String,
    #[serde(default)]
    languages: Vec<String>,
    #[serde(default)]
    genres: Vec<TmdbGenreResult>,
    #[serde(default)]
    keywords: TmdbTvKeywords,
}

#[derive(Debug, Deserialize)]
struct TmdbMovieDetails {
    id: u32,
    title: String,
    original_title: Option<String>,
    release_date: Option<String>,
    #[serde(default)]
    original_language: String,
    #[serde(default)]
    genres: Vec<TmdbGenreResult>,
    #[serde(default)]
    keywords: TmdbMovieKeywords,
}

// ============================================================================
// Conversions
// ============================================================================

impl From<TmdbGenreResult> for TmdbGenre {
    fn from(g: TmdbGenreResult) -> Self {
        Self {
            id: g.id,
            name: g.name,
        }
    }
}

impl From<TmdbKeywordResult> for TmdbKeyword {
    fn from(k: TmdbKeywordResult) -> Self {
        Self {
            id: k.id,
            name: k.name,
        }
    }
}

impl From<TmdbTvDetails> for TmdbSeries {
    fn from(d: TmdbTvDetails) -> Self {
        Self {
            id: d.id,
            name: d.name,
            original_name: d.original_name,
            first_air_date: d.first_air_date,
            original_language: d.original_language,
            languages: d.languages,
            genres: d.genres.into_iter().map(Into::into).collect(),
            keywords: d.keywords.results.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<TmdbMovieDetails> for TmdbMovie {
    fn from(d: TmdbMovieDetails) -> Self {
        Self {
            id: d.id,
            title: d.title,
            original_title: d.original_title,
            release_date: d.release_date,
            original_language: d.original_language,
            genres: d.genres.into_iter().map(Into::into).collect(),
            keywords: d.keywords.keywords.into_iter().map(Into::into).collect(),
        }
    }
}
