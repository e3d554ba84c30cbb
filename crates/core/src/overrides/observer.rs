//! Hooks for auditing resolution outcomes.

use tracing::debug;

use super::resolver::Resolution;
use super::types::{MediaDescriptor, OverrideRule};

/// Receives every evaluation after it completes.
pub trait ResolutionObserver: Send + Sync {
    fn on_resolution(
        &self,
        media: &MediaDescriptor,
        rules: &[OverrideRule],
        resolution: &Resolution,
    );
}

/// Observer that logs weights and the chosen rule at debug level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl ResolutionObserver for TracingObserver {
    fn on_resolution(
        &self,
        media: &MediaDescriptor,
        rules: &[OverrideRule],
        resolution: &Resolution,
    ) {
        debug!(
            "Override weights for genres={:?} keywords={:?} language={}: {:?}",
            media.genre_ids, media.keyword_ids, media.original_language, resolution.weights
        );

        let selected = resolution.winner.and_then(|index| {
            let rule = rules.get(index)?;
            let weight = resolution.weights.get(index)?;
            Some((index, weight, rule))
        });

        match selected {
            Some((index, weight, rule)) => debug!(
                "Selected override #{} (weight {}): {:?}",
                index, weight, rule.payload
            ),
            None => debug!("No override matched among {} rules", rules.len()),
        }
    }
}
