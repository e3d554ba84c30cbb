//! Mock external catalog for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::external_catalog::{ExternalCatalog, ExternalCatalogError, TmdbMovie, TmdbSeries};

/// A recorded catalog query for test assertions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedCatalogQuery {
    GetTv { tmdb_id: u32 },
    GetMovie { tmdb_id: u32 },
}

/// Mock implementation of the ExternalCatalog trait.
///
/// Provides controllable behavior for testing:
/// - Return configurable movie/TV results
/// - Track queries for assertions
/// - Simulate failures
///
/// Clones share state, so a clone handed to the code under test can still be
/// configured and inspected from the test.
#[derive(Debug, Clone, Default)]
pub struct MockExternalCatalog {
    /// TMDB movies by ID.
    movies: Arc<RwLock<HashMap<u32, TmdbMovie>>>,
    /// TMDB series by ID.
    series: Arc<RwLock<HashMap<u32, TmdbSeries>>>,
    /// Recorded queries.
    queries: Arc<RwLock<Vec<RecordedCatalogQuery>>>,
    /// If set, the next operation will fail with this error.
    next_error: Arc<RwLock<Option<ExternalCatalogError>>>,
}

impl MockExternalCatalog {
    /// Create a new empty mock external catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a TMDB movie.
    pub async fn add_movie(&self, movie: TmdbMovie) {
        self.movies.write().await.insert(movie.id, movie);
    }

    /// Add a TMDB TV series.
    pub async fn add_series(&self, series: TmdbSeries) {
        self.series.write().await.insert(series.id, series);
    }

    /// Get all recorded queries.
    pub async fn recorded_queries(&self) -> Vec<RecordedCatalogQuery> {
        self.queries.read().await.clone()
    }

    /// Get the number of queries performed.
    pub async fn query_count(&self) -> usize {
        self.queries.read().await.len()
    }

    /// Configure the next operation to fail with the given error.
    pub async fn set_next_error(&self, error: ExternalCatalogError) {
        *self.next_error.write().await = Some(error);
    }

    async fn take_error(&self) -> Option<ExternalCatalogError> {
        self.next_error.write().await.take()
    }

    async fn record(&self, query: RecordedCatalogQuery) {
        self.queries.write().await.push(query);
    }
}

#[async_trait]
impl ExternalCatalog for MockExternalCatalog {
    async fn get_tv(&self, tmdb_id: u32) -> Result<TmdbSeries, ExternalCatalogError> {
        self.record(RecordedCatalogQuery::GetTv { tmdb_id }).await;

        if let Some(err) = self.take_error().await {
            return Err(err);
        }

        self.series
            .read()
            .await
            .get(&tmdb_id)
            .cloned()
            .ok_or_else(|| ExternalCatalogError::NotFound(format!("Series {} not found", tmdb_id)))
    }

    async fn get_movie(&self, tmdb_id: u32) -> Result<TmdbMovie, ExternalCatalogError> {
        self.record(RecordedCatalogQuery::GetMovie { tmdb_id }).await;

        if let Some(err) = self.take_error().await {
            return Err(err);
        }

        self.movies
            .read()
            .await
            .get(&tmdb_id)
            .cloned()
            .ok_or_else(|| ExternalCatalogError::NotFound(format!("Movie {} not found", tmdb_id)))
    }
}
