use std::collections::HashSet;

use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Server port is not 0
/// - TMDB API key is not empty when the section is present
/// - Destination names are non-empty and unique
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "server.port cannot be 0".to_string(),
        ));
    }

    if let Some(tmdb) = &config.tmdb {
        if tmdb.api_key.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "tmdb.api_key cannot be empty".to_string(),
            ));
        }
    }

    let mut seen = HashSet::new();
    for destination in &config.destinations {
        if destination.name.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "destination name cannot be empty".to_string(),
            ));
        }
        if !seen.insert(destination.name.as_str()) {
            return Err(ConfigError::ValidationError(format!(
                "duplicate destination name: {}",
                destination.name
            )));
        }
    }

    Ok(())
}
