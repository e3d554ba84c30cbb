//! Common test utilities for in-process API testing with mocks.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use routarr_core::{
    testing::{fixtures, MockExternalCatalog},
    Config, ConfigSettingsStore, DestinationKind, ExternalCatalog, OverrideService,
    OverrideSettingsStore, ServerConfig,
};

/// Test fixture with an in-process router and a controllable catalog.
///
/// Destinations:
/// - `sonarr`: anime rule (genre 16 + "ja") and a Korean rule with empty tags
/// - `radarr`: keyword rule
/// - `radarr-4k`: no overrides
pub struct TestFixture {
    pub router: Router,
    pub external_catalog: MockExternalCatalog,
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl TestFixture {
    pub async fn new() -> Self {
        Self::build(true).await
    }

    /// Fixture without a metadata provider.
    pub async fn without_catalog() -> Self {
        Self::build(false).await
    }

    async fn build(with_catalog: bool) -> Self {
        let external_catalog = MockExternalCatalog::new();
        external_catalog
            .add_series(fixtures::tmdb_series(37854, "One Piece", &[16, 10759], &[210024], "ja"))
            .await;
        external_catalog
            .add_series(fixtures::tmdb_series(93405, "Squid Game", &[18], &[], "ko"))
            .await;
        external_catalog
            .add_movie(fixtures::tmdb_movie(129, "Spirited Away", &[16], &[210024], "ja"))
            .await;

        let mut korean = fixtures::override_rule(&[], &[], &["ko"], "/tv/korean");
        korean.payload.tags = Some(vec![]);

        let config = Config {
            server: ServerConfig {
                host: std::net::IpAddr::V4(std::net::Ipv4Addr::LOCALHOST),
                port: 0, // Not used for in-process testing
            },
            tmdb: None,
            destinations: vec![
                fixtures::destination(
                    "sonarr",
                    DestinationKind::Sonarr,
                    Some(vec![
                        fixtures::override_rule(&[16], &[], &["ja"], "/tv/anime"),
                        korean,
                    ]),
                ),
                fixtures::destination(
                    "radarr",
                    DestinationKind::Radarr,
                    Some(vec![fixtures::override_rule(&[], &[210024], &[], "/movies/anime")]),
                ),
                fixtures::destination("radarr-4k", DestinationKind::Radarr, None),
            ],
        };

        let settings: Arc<dyn OverrideSettingsStore> =
            Arc::new(ConfigSettingsStore::from_config(&config));
        let catalog = with_catalog
            .then(|| Arc::new(external_catalog.clone()) as Arc<dyn ExternalCatalog>);
        let service = OverrideService::new(settings, catalog);

        let state = Arc::new(routarr_server::state::AppState::new(config, service));
        let router = routarr_server::api::create_router(state);

        Self {
            router,
            external_catalog,
        }
    }

    /// Send a GET request to the test server.
    pub async fn get(&self, path: &str) -> TestResponse {
        self.request("GET", path, None).await
    }

    /// Send a POST request with JSON body.
    pub async fn post(&self, path: &str, body: Value) -> TestResponse {
        self.request("POST", path, Some(body)).await
    }

    /// Send a PUT request with JSON body.
    pub async fn put(&self, path: &str, body: Value) -> TestResponse {
        self.request("PUT", path, Some(body)).await
    }

    /// Send a GET request and return the raw body as text.
    pub async fn get_text(&self, path: &str) -> (StatusCode, String) {
        let request = Request::builder()
            .method("GET")
            .uri(path)
            .body(Body::empty())
            .unwrap();

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes();

        (status, String::from_utf8_lossy(&bytes).to_string())
    }

    async fn request(&self, method: &str, path: &str, body: Option<Value>) -> TestResponse {
        let builder = Request::builder().method(method).uri(path);

        let request = match body {
            Some(json) => builder
                .header("Content-Type", "application/json")
                .body(Body::from(serde_json::to_string(&json).unwrap()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes();

        let body: Value = if body_bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body_bytes).unwrap_or(Value::Null)
        };

        TestResponse { status, body }
    }
}
