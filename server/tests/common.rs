//! Common utilities for integration tests

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use server::config::ServerConfig;
use server::{build_router, AppState};
use tts_client::TtsClient;

/// Build the real router wired to an explicit upstream endpoint (usually a
/// wiremock server). `api_key: None` reproduces a deployment without a
/// configured credential.
#[allow(dead_code)]
pub fn create_test_app(api_key: Option<&str>, upstream_endpoint: &str) -> Router {
    create_test_app_with_timeout(api_key, upstream_endpoint, Duration::from_secs(5))
}

/// Same as [`create_test_app`] with an explicit upstream timeout, for tests
/// that exercise a hung provider.
#[allow(dead_code)]
pub fn create_test_app_with_timeout(
    api_key: Option<&str>,
    upstream_endpoint: &str,
    upstream_timeout: Duration,
) -> Router {
    let config = ServerConfig {
        api_key: api_key.map(str::to_string),
        upstream_endpoint: upstream_endpoint.to_string(),
        ..ServerConfig::default()
    };

    let tts = config.api_key.as_deref().map(|key| {
        Arc::new(
            TtsClient::with_endpoint(key, &config.upstream_endpoint, upstream_timeout)
                .expect("failed to build TTS client for tests"),
        )
    });

    build_router(AppState { tts, config })
}
