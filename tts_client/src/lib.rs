//! Client for the Google Cloud Text-to-Speech API.
//!
//! Builds the provider's JSON request from validated synthesis parameters,
//! performs exactly one upstream call, and transcodes the base64 audio
//! payload into raw MP3 bytes. Upstream errors keep their status code and
//! message so the relay can forward them unchanged.

pub mod payload;

use std::time::Duration;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use reqwest::Client;
use thiserror::Error;

use crate::payload::{SynthesizeRequest, SynthesizeResponse};

/// Google Cloud TTS synthesis endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://texttospeech.googleapis.com/v1/text:synthesize";

/// Default bound on the upstream call; the provider normally answers well
/// within this for a single request.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Validated parameters for one synthesis attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct SynthesisParams {
    pub text: String,
    pub voice: String,
    pub speed: f64,
}

#[derive(Debug, Error)]
pub enum TtsError {
    /// The provider rejected the request; carries its status code and the
    /// extracted (or fallback) message.
    #[error("{message}")]
    Upstream { status: u16, message: String },

    /// The provider answered 2xx but the body had no `audioContent`.
    #[error("synthesis response contained no audio payload")]
    MissingAudio,

    #[error("synthesis request timed out")]
    Timeout,

    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    #[error("invalid base64 audio payload: {0}")]
    Decode(#[from] base64::DecodeError),
}

pub struct TtsClient {
    http: Client,
    endpoint: String,
    api_key: String,
}

impl TtsClient {
    /// Create a client against the production Google endpoint.
    pub fn new(api_key: impl Into<String>) -> Result<Self, TtsError> {
        Self::with_endpoint(
            api_key,
            DEFAULT_ENDPOINT,
            Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        )
    }

    /// Create a client against an explicit endpoint, e.g. a mock server in
    /// tests or a regional API host.
    pub fn with_endpoint(
        api_key: impl Into<String>,
        endpoint: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, TtsError> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            endpoint: endpoint.into(),
            api_key: api_key.into(),
        })
    }

    /// Synthesize speech for the given parameters and return decoded MP3
    /// bytes. Exactly one upstream attempt, no retries.
    pub async fn synthesize(&self, params: &SynthesisParams) -> Result<Vec<u8>, TtsError> {
        let body = SynthesizeRequest::from_params(params);

        let response = self
            .http
            .post(&self.endpoint)
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await
            .map_err(map_transport)?;

        let status = response.status();
        if !status.is_success() {
            let message = extract_error_message(response).await.unwrap_or_else(|| {
                format!(
                    "Text-to-speech request failed with status {}",
                    status.as_u16()
                )
            });
            return Err(TtsError::Upstream {
                status: status.as_u16(),
                message,
            });
        }

        let payload: SynthesizeResponse = response.json().await.map_err(map_transport)?;
        let audio = payload.audio_content.ok_or(TtsError::MissingAudio)?;
        Ok(BASE64.decode(audio.as_bytes())?)
    }
}

fn map_transport(e: reqwest::Error) -> TtsError {
    if e.is_timeout() {
        TtsError::Timeout
    } else {
        TtsError::Transport(e)
    }
}

/// Best-effort extraction of `error.message` from a Google error body.
async fn extract_error_message(response: reqwest::Response) -> Option<String> {
    let body: serde_json::Value = response.json().await.ok()?;
    body.get("error")?
        .get("message")?
        .as_str()
        .map(str::to_owned)
}
