//! Override API handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use routarr_core::{
    DestinationSummary, ExternalCatalogError, MediaDescriptor, OverrideError, OverridePayload,
    OverrideRule, SettingsError,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::state::AppState;

// ============================================================================
// Request/Response types
// ============================================================================

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn api_error(status: StatusCode, error: impl ToString) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: error.to_string(),
        }),
    )
}

#[derive(Debug, Serialize)]
pub struct OverrideLookupResponse {
    pub destination: String,
    pub tmdb_id: u32,
    #[serde(rename = "override")]
    pub payload: Option<OverridePayload>,
}

#[derive(Debug, Deserialize)]
pub struct ResolveRequest {
    pub media: MediaDescriptor,
    #[serde(default)]
    pub rules: Option<Vec<OverrideRule>>,
}

#[derive(Debug, Serialize)]
pub struct ResolveResponse {
    #[serde(rename = "override")]
    pub payload: Option<OverridePayload>,
    pub weights: Vec<u64>,
    pub winner: Option<usize>,
}

fn settings_error(e: SettingsError) -> ApiError {
    match e {
        SettingsError::DestinationNotFound(_) => api_error(StatusCode::NOT_FOUND, e),
        SettingsError::Unavailable(_) => api_error(StatusCode::INTERNAL_SERVER_ERROR, e),
    }
}

fn override_error(e: OverrideError) -> ApiError {
    match e {
        OverrideError::Settings(e) => settings_error(e),
        OverrideError::CatalogUnavailable => api_error(StatusCode::SERVICE_UNAVAILABLE, e),
        OverrideError::Catalog(ExternalCatalogError::NotFound(_)) => {
            api_error(StatusCode::NOT_FOUND, e)
        }
        OverrideError::Catalog(_) => api_error(StatusCode::BAD_GATEWAY, e),
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /api/v1/destinations
pub async fn list_destinations(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<DestinationSummary>>, ApiError> {
    state
        .service()
        .settings()
        .list_destinations()
        .map(Json)
        .map_err(settings_error)
}

/// GET /api/v1/destinations/{name}/overrides/{tmdb_id}
///
/// Resolve the override for a series (Sonarr) or movie (Radarr).
pub async fn get_override(
    State(state): State<Arc<AppState>>,
    Path((name, tmdb_id)): Path<(String, u32)>,
) -> Result<Json<OverrideLookupResponse>, ApiError> {
    let payload = state
        .service()
        .get_overrides(&name, tmdb_id)
        .await
        .map_err(override_error)?;

    Ok(Json(OverrideLookupResponse {
        destination: name,
        tmdb_id,
        payload,
    }))
}

/// PUT /api/v1/destinations/{name}/overrides
///
/// Replace the rule list of a destination until restart.
pub async fn replace_overrides(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
    Json(rules): Json<Vec<OverrideRule>>,
) -> Result<Json<DestinationSummary>, ApiError> {
    let settings = state.service().settings();
    let count = rules.len();

    settings
        .replace_overrides(&name, Some(rules))
        .map_err(settings_error)?;
    info!("Replaced overrides for {} ({} rules)", name, count);

    let destination = settings.destination(&name).map_err(settings_error)?;
    Ok(Json(DestinationSummary::from(&destination)))
}

/// POST /api/v1/overrides/resolve
///
/// Weigh caller-supplied rules against a caller-supplied descriptor.
pub async fn resolve(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ResolveRequest>,
) -> Json<ResolveResponse> {
    let rules = request.rules.unwrap_or_default();
    let resolution = state.service().resolver().evaluate(&request.media, &rules);

    Json(ResolveResponse {
        payload: resolution.winning_payload(&rules),
        weights: resolution.weights,
        winner: resolution.winner,
    })
}
