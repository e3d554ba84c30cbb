pub mod config;
pub mod external_catalog;
pub mod metrics;
pub mod overrides;
pub mod service;
pub mod settings;
pub mod testing;

pub use config::{
    load_config, load_config_from_str, validate_config, Config, ConfigError, DestinationConfig,
    DestinationKind, DestinationSummary, SanitizedConfig, ServerConfig,
};
pub use external_catalog::{
    ExternalCatalog, ExternalCatalogError, TmdbClient, TmdbConfig, TmdbMovie, TmdbSeries,
};
pub use overrides::{
    compute_weight, evaluate, resolve_override, MatchRule, MediaDescriptor, OverridePayload,
    OverrideResolver, OverrideRule, Resolution, ResolutionObserver, TracingObserver,
};
pub use service::{OverrideError, OverrideService};
pub use settings::{ConfigSettingsStore, OverrideSettingsStore, SettingsError};
