//! Client-side request builder for the voiceover relay.
//!
//! Validates form input into a [`SynthesisRequest`], submits it to the relay,
//! and keeps the resulting [`AudioArtifact`] as explicit per-session state so
//! generate and download hand the audio to each other directly.

use std::path::{Path, PathBuf};

use chrono::Utc;
use reqwest::Client;
use serde::Serialize;
use thiserror::Error;

/// Minimum accepted text length after trimming.
pub const MIN_TEXT_LENGTH: usize = 10;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please enter some text to convert")]
    EmptyInput,

    #[error("Text must be at least {MIN_TEXT_LENGTH} characters long")]
    TooShort,

    #[error("No voice selected")]
    MissingVoice,
}

#[derive(Debug, Error)]
pub enum RelayError {
    /// The relay answered with an error body; carries its status and the
    /// extracted (or fallback) message.
    #[error("{message}")]
    Relay { status: u16, message: String },

    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}

#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("No audio to download")]
    NothingToDownload,

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Validated input for one synthesis attempt; serializes as the relay
/// request body.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SynthesisRequest {
    pub text: String,
    pub voice: String,
    pub speed: f64,
}

impl SynthesisRequest {
    /// Validate raw form input. Trims the text, rejects empty or too-short
    /// input and a missing voice id. No upper bound here; the relay
    /// enforces its own.
    pub fn new(raw_text: &str, voice: &str, speed: f64) -> Result<Self, ValidationError> {
        let text = raw_text.trim();
        if text.is_empty() {
            return Err(ValidationError::EmptyInput);
        }
        if text.chars().count() < MIN_TEXT_LENGTH {
            return Err(ValidationError::TooShort);
        }
        if voice.is_empty() {
            return Err(ValidationError::MissingVoice);
        }
        Ok(Self {
            text: text.to_string(),
            voice: voice.to_string(),
            speed,
        })
    }
}

/// Decoded MP3 bytes from one successful generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioArtifact {
    bytes: Vec<u8>,
}

impl AudioArtifact {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Download filename derived from the current time, e.g.
    /// `voiceover-1724578000123.mp3`.
    pub fn suggested_filename(&self) -> String {
        format!("voiceover-{}.mp3", Utc::now().timestamp_millis())
    }
}

/// HTTP client for the relay's generate-speech endpoint.
pub struct RelayClient {
    http: Client,
    endpoint: String,
}

impl RelayClient {
    /// `endpoint` is the full generate-speech URL, e.g.
    /// `http://localhost:8080/api/generate-speech`.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            endpoint: endpoint.into(),
        }
    }

    /// Submit one synthesis request. A 2xx response body is the raw audio;
    /// anything else is read as `{ "error": … }` with a generic fallback
    /// when that shape is absent.
    pub async fn submit(&self, request: &SynthesisRequest) -> Result<AudioArtifact, RelayError> {
        let response = self.http.post(&self.endpoint).json(request).send().await?;

        let status = response.status();
        if !status.is_success() {
            let message = extract_error_message(response)
                .await
                .unwrap_or_else(|| "Failed to generate audio".to_string());
            return Err(RelayError::Relay {
                status: status.as_u16(),
                message,
            });
        }

        let bytes = response.bytes().await?;
        Ok(AudioArtifact::new(bytes.to_vec()))
    }
}

async fn extract_error_message(response: reqwest::Response) -> Option<String> {
    let body: serde_json::Value = response.json().await.ok()?;
    body.get("error")?.as_str().map(str::to_owned)
}

/// Per-session state: the relay client plus the most recent artifact.
/// Generating clears the previous artifact first, so at most one result
/// exists at a time and download always refers to the latest generation.
pub struct Session {
    client: RelayClient,
    artifact: Option<AudioArtifact>,
}

impl Session {
    pub fn new(client: RelayClient) -> Self {
        Self {
            client,
            artifact: None,
        }
    }

    pub fn artifact(&self) -> Option<&AudioArtifact> {
        self.artifact.as_ref()
    }

    /// Run one generation cycle: drop the stale artifact, submit, and store
    /// the new one on success. On failure the session is left with no
    /// artifact and is ready for the next attempt.
    pub async fn generate(
        &mut self,
        request: &SynthesisRequest,
    ) -> Result<&AudioArtifact, RelayError> {
        self.artifact = None;
        let artifact = self.client.submit(request).await?;
        Ok(self.artifact.insert(artifact))
    }

    /// Write the current artifact into `dir` under its suggested filename
    /// and return the full path.
    pub fn download_to(&self, dir: &Path) -> Result<PathBuf, DownloadError> {
        let artifact = self
            .artifact
            .as_ref()
            .ok_or(DownloadError::NothingToDownload)?;
        let path = dir.join(artifact.suggested_filename());
        std::fs::write(&path, artifact.as_bytes())?;
        Ok(path)
    }
}
