//! External catalog integration (TMDB).
//!
//! The catalog supplies the metadata override rules are matched against:
//! genres, keywords and original language of a series or movie.

mod tmdb;
mod types;

pub use tmdb::{TmdbClient, TmdbConfig};
pub use types::*;

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur when interacting with external catalogs.
#[derive(Debug, Error)]
pub enum ExternalCatalogError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Rate limit exceeded.
    #[error("Rate limit exceeded, please wait before retrying")]
    RateLimitExceeded,

    /// Resource not found (404).
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// API returned an error.
    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    /// Failed to parse response.
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Client not configured (missing API key, etc.).
    #[error("Client not configured: {0}")]
    NotConfigured(String),
}

/// Source of media metadata.
#[async_trait]
pub trait ExternalCatalog: Send + Sync {
    /// Get a TV series, including genres and keywords.
    async fn get_tv(&self, tmdb_id: u32) -> Result<TmdbSeries, ExternalCatalogError>;

    /// Get a movie, including genres and keywords.
    async fn get_movie(&self, tmdb_id: u32) -> Result<TmdbMovie, ExternalCatalogError>;
}

#[async_trait]
impl ExternalCatalog for TmdbClient {
    async fn get_tv(&self, tmdb_id: u32) -> Result<TmdbSeries, ExternalCatalogError> {
        TmdbClient::get_tv(self, tmdb_id).await
    }

    async fn get_movie(&self, tmdb_id: u32) -> Result<TmdbMovie, ExternalCatalogError> {
        TmdbClient::get_movie(self, tmdb_id).await
    }
}
