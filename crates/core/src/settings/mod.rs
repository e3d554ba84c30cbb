//! Override settings, looked up per destination.

use std::sync::RwLock;

use thiserror::Error;

use crate::config::{Config, DestinationConfig, DestinationSummary};
use crate::overrides::OverrideRule;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Destination not found: {0}")]
    DestinationNotFound(String),

    #[error("Settings unavailable: {0}")]
    Unavailable(String),
}

/// Supplies destinations and their ordered override rules.
pub trait OverrideSettingsStore: Send + Sync {
    /// Look up one destination by name.
    fn destination(&self, name: &str) -> Result<DestinationConfig, SettingsError>;

    /// All destinations, in configuration order.
    fn list_destinations(&self) -> Result<Vec<DestinationSummary>, SettingsError>;

    /// Replace the rule list of a destination. `None` clears it.
    fn replace_overrides(
        &self,
        name: &str,
        overrides: Option<Vec<OverrideRule>>,
    ) -> Result<(), SettingsError>;

    /// Rules of one destination. `None` means overrides are not configured.
    fn overrides(&self, name: &str) -> Result<Option<Vec<OverrideRule>>, SettingsError> {
        Ok(self.destination(name)?.overrides)
    }
}

/// In-memory store seeded from the loaded configuration.
///
/// Replacements live until restart; nothing is written back to disk.
#[derive(Debug, Default)]
pub struct ConfigSettingsStore {
    destinations: RwLock<Vec<DestinationConfig>>,
}

impl ConfigSettingsStore {
    pub fn new(destinations: Vec<DestinationConfig>) -> Self {
        Self {
            destinations: RwLock::new(destinations),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.destinations.clone())
    }
}

fn poisoned<T>(_: T) -> SettingsError {
    SettingsError::Unavailable("settings lock poisoned".to_string())
}

impl OverrideSettingsStore for ConfigSettingsStore {
    fn destination(&self, name: &str) -> Result<DestinationConfig, SettingsError> {
        self.destinations
            .read()
            .map_err(poisoned)?
            .iter()
            .find(|d| d.name == name)
            .cloned()
            .ok_or_else(|| SettingsError::DestinationNotFound(name.to_string()))
    }

    fn list_destinations(&self) -> Result<Vec<DestinationSummary>, SettingsError> {
        Ok(self
            .destinations
            .read()
            .map_err(poisoned)?
            .iter()
            .map(DestinationSummary::from)
            .collect())
    }

    fn replace_overrides(
        &self,
        name: &str,
        overrides: Option<Vec<OverrideRule>>,
    ) -> Result<(), SettingsError> {
        let mut destinations = self.destinations.write().map_err(poisoned)?;
        let destination = destinations
            .iter_mut()
            .find(|d| d.name == name)
            .ok_or_else(|| SettingsError::DestinationNotFound(name.to_string()))?;
        destination.overrides = overrides;
        Ok(())
    }
}
