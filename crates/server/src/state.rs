use routarr_core::{Config, OverrideService, SanitizedConfig};

/// Shared application state
pub struct AppState {
    config: Config,
    service: OverrideService,
}

impl AppState {
    pub fn new(config: Config, service: OverrideService) -> Self {
        Self { config, service }
    }

    pub fn sanitized_config(&self) -> SanitizedConfig {
        SanitizedConfig::from(&self.config)
    }

    pub fn service(&self) -> &OverrideService {
        &self.service
    }
}
