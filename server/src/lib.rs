pub mod config;
pub mod error;
pub mod validation;

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Request, State},
    http::{header, HeaderValue, Method, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer, limit::RequestBodyLimitLayer, timeout::TimeoutLayer, trace::TraceLayer,
};
use tracing::{info, warn};
use tts_client::TtsClient;

use crate::config::ServerConfig;
use crate::error::ApiError;
use crate::validation::validate_generate_request;

/// Upper bound on inbound request bodies. Generous for a 5000-character
/// text field, small enough to stop unbounded payloads at the transport.
pub const MAX_BODY_BYTES: usize = 64 * 1024;

#[derive(Clone)]
pub struct AppState {
    /// None when no API key is configured; every synthesis request then
    /// fails with a configuration error while the server keeps serving.
    pub tts: Option<Arc<TtsClient>>,
    pub config: ServerConfig,
}

/// Inbound body for `/api/generate-speech`. Fields are optional so a
/// missing field is reported through the relay's own error contract rather
/// than a deserialization rejection.
#[derive(Deserialize)]
pub struct GenerateSpeechRequest {
    pub text: Option<String>,
    pub voice: Option<String>,
    pub speed: Option<f64>,
}

pub fn build_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config);

    // The body limit must wrap the timeout: tower-http's Timeout needs a
    // Default response body, which the limit layer's body type is not.
    let middleware_stack = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(TimeoutLayer::new(state.config.request_timeout()))
        .layer(cors)
        .into_inner();

    Router::new()
        .route("/health", get(health_check))
        .route(
            "/api/generate-speech",
            post(generate_speech)
                .options(preflight)
                .fallback(method_not_allowed),
        )
        .layer(axum::middleware::from_fn(add_request_id))
        .layer(middleware_stack)
        .with_state(state)
}

/// CORS for the relay: an explicit origin list when configured, otherwise
/// open to any caller as the public wire contract advertises.
fn cors_layer(config: &ServerConfig) -> CorsLayer {
    let methods = [Method::POST, Method::OPTIONS];

    if let Some(ref allowed_origins) = config.cors_allowed_origins {
        let origins: Vec<HeaderValue> = allowed_origins
            .iter()
            .filter_map(|origin: &String| origin.parse::<HeaderValue>().ok())
            .collect();

        if origins.is_empty() {
            warn!("CORS_ALLOWED_ORIGINS contained no parseable origins, allowing any origin");
            CorsLayer::new()
                .allow_origin(tower_http::cors::Any)
                .allow_methods(methods)
                .allow_headers([header::CONTENT_TYPE])
        } else {
            info!("CORS configured for {} origin(s)", origins.len());
            CorsLayer::new()
                .allow_origin(tower_http::cors::AllowOrigin::list(origins))
                .allow_methods(methods)
                .allow_headers([header::CONTENT_TYPE])
        }
    } else {
        CorsLayer::new()
            .allow_origin(tower_http::cors::Any)
            .allow_methods(methods)
            .allow_headers([header::CONTENT_TYPE])
    }
}

/// Tags each request and its response with an `x-request-id` so relay log
/// lines can be tied back to a caller's exchange.
async fn add_request_id(mut request: Request, next: Next) -> Response {
    let request_id = uuid::Uuid::new_v4().to_string();
    request.headers_mut().insert(
        "x-request-id",
        HeaderValue::from_str(&request_id).unwrap(),
    );
    let mut response = next.run(request).await;
    response.headers_mut().insert(
        "x-request-id",
        HeaderValue::from_str(&request_id).unwrap(),
    );
    response
}

pub async fn health_check() -> &'static str {
    "ok"
}

/// Pre-flight probe: 200 with an empty body, no business logic.
pub async fn preflight() -> StatusCode {
    StatusCode::OK
}

pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

pub async fn generate_speech(
    State(state): State<AppState>,
    body: Result<Json<GenerateSpeechRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    // Unparseable bodies go through the relay's own error contract instead
    // of axum's plain-text rejection.
    let Json(req) =
        body.map_err(|rejection| ApiError::InvalidRequest(rejection.body_text()))?;
    let params = validate_generate_request(&req)?;
    let tts = state.tts.as_deref().ok_or(ApiError::MissingApiKey)?;

    info!(
        "Synthesis request: text length={}, voice={}, speed={}",
        params.text.chars().count(),
        params.voice,
        params.speed
    );

    let audio = tts.synthesize(&params).await?;
    info!("Synthesis complete: {} audio bytes", audio.len());

    let length = audio.len();
    let mut response = audio.into_response();
    response
        .headers_mut()
        .insert(header::CONTENT_TYPE, HeaderValue::from_static("audio/mpeg"));
    response
        .headers_mut()
        .insert(header::CONTENT_LENGTH, HeaderValue::from(length));
    Ok(response)
}
