// Configuration constants for the relay server

use std::time::Duration;

#[derive(Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub request_timeout_secs: u64,
    pub upstream_timeout_secs: u64,
    pub api_key: Option<String>,
    pub upstream_endpoint: String,
    pub cors_allowed_origins: Option<Vec<String>>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            request_timeout_secs: 60,
            upstream_timeout_secs: 30,
            api_key: None,
            upstream_endpoint: tts_client::DEFAULT_ENDPOINT.to_string(),
            cors_allowed_origins: None,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(8080);

        let request_timeout_secs = std::env::var("REQUEST_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(60);

        let upstream_timeout_secs = std::env::var("UPSTREAM_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(30);

        // An empty key counts as absent so a blank env entry doesn't look
        // like a working credential.
        let api_key = std::env::var("GOOGLE_TTS_API_KEY")
            .ok()
            .filter(|v| !v.trim().is_empty());

        let upstream_endpoint = std::env::var("GOOGLE_TTS_ENDPOINT")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| tts_client::DEFAULT_ENDPOINT.to_string());

        let cors_allowed_origins = std::env::var("CORS_ALLOWED_ORIGINS")
            .ok()
            .map(|origins| origins.split(',').map(|s| s.trim().to_string()).collect());

        Self {
            port,
            request_timeout_secs,
            upstream_timeout_secs,
            api_key,
            upstream_endpoint,
            cors_allowed_origins,
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_secs(self.upstream_timeout_secs)
    }
}
