//! Override lookup for a destination and a TMDB ID.
//!
//! Combines the settings store, the metadata catalog and the resolver:
//! rules are loaded first (no rules means no catalog request), then the
//! media's metadata is fetched, then the rules are weighed.

use std::sync::Arc;
use std::time::Instant;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::DestinationKind;
use crate::external_catalog::{ExternalCatalog, ExternalCatalogError};
use crate::metrics::{record_resolution, CATALOG_REQUEST_DURATION, RULES_EVALUATED};
use crate::overrides::{MediaDescriptor, OverridePayload, OverrideResolver, TracingObserver};
use crate::settings::{OverrideSettingsStore, SettingsError};

/// Errors from a combined override lookup.
#[derive(Debug, Error)]
pub enum OverrideError {
    #[error(transparent)]
    Settings(#[from] SettingsError),

    #[error("Metadata lookup failed: {0}")]
    Catalog(#[from] ExternalCatalogError),

    #[error("No metadata provider configured")]
    CatalogUnavailable,
}

pub struct OverrideService {
    settings: Arc<dyn OverrideSettingsStore>,
    catalog: Option<Arc<dyn ExternalCatalog>>,
    resolver: OverrideResolver,
}

impl OverrideService {
    /// Create a service that logs every resolution through `tracing`.
    pub fn new(
        settings: Arc<dyn OverrideSettingsStore>,
        catalog: Option<Arc<dyn ExternalCatalog>>,
    ) -> Self {
        Self {
            settings,
            catalog,
            resolver: OverrideResolver::new().with_observer(Arc::new(TracingObserver)),
        }
    }

    /// Use a custom resolver (e.g. with a different observer).
    pub fn with_resolver(mut self, resolver: OverrideResolver) -> Self {
        self.resolver = resolver;
        self
    }

    pub fn settings(&self) -> &dyn OverrideSettingsStore {
        self.settings.as_ref()
    }

    pub fn resolver(&self) -> &OverrideResolver {
        &self.resolver
    }

    pub fn has_catalog(&self) -> bool {
        self.catalog.is_some()
    }

    /// Fetch the matching view of a series (Sonarr) or movie (Radarr).
    pub async fn describe(
        &self,
        kind: DestinationKind,
        tmdb_id: u32,
    ) -> Result<MediaDescriptor, OverrideError> {
        let catalog = self
            .catalog
            .as_ref()
            .ok_or(OverrideError::CatalogUnavailable)?;

        let start = Instant::now();
        let (media, result) = match kind {
            DestinationKind::Sonarr => (
                "tv",
                catalog.get_tv(tmdb_id).await.map(|series| series.descriptor()),
            ),
            DestinationKind::Radarr => (
                "movie",
                catalog.get_movie(tmdb_id).await.map(|movie| movie.descriptor()),
            ),
        };

        let outcome = if result.is_ok() { "success" } else { "error" };
        CATALOG_REQUEST_DURATION
            .with_label_values(&[media, outcome])
            .observe(start.elapsed().as_secs_f64());

        Ok(result?)
    }

    /// Resolve the override for `tmdb_id` on the named destination.
    ///
    /// Returns `Ok(None)` both when no rule matches and when the destination
    /// has no rules. A metadata failure is returned as-is and no rule is
    /// weighed.
    pub async fn get_overrides(
        &self,
        destination: &str,
        tmdb_id: u32,
    ) -> Result<Option<OverridePayload>, OverrideError> {
        let config = self.settings.destination(destination).inspect_err(|e| {
            warn!("Override settings lookup failed for {}: {}", destination, e);
            record_resolution("failed");
        })?;

        let rules = match config.overrides {
            Some(rules) if !rules.is_empty() => rules,
            _ => {
                debug!("No overrides configured for {}", destination);
                record_resolution("not_configured");
                return Ok(None);
            }
        };

        let media = self.describe(config.kind, tmdb_id).await.inspect_err(|e| {
            warn!(
                "Skipping override resolution for {} tmdb_id={}: {}",
                destination, tmdb_id, e
            );
            record_resolution("failed");
        })?;

        RULES_EVALUATED.observe(rules.len() as f64);
        let payload = self.resolver.resolve(&media, &rules);

        match &payload {
            Some(payload) => {
                info!(
                    "Override for {} tmdb_id={}: {:?}",
                    destination, tmdb_id, payload
                );
                record_resolution("matched");
            }
            None => {
                debug!(
                    "No override matched for {} tmdb_id={} ({} rules)",
                    destination,
                    tmdb_id,
                    rules.len()
                );
                record_resolution("unmatched");
            }
        }

        Ok(payload)
    }
}
