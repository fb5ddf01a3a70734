use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tts_client::TtsError;

/// API Error types
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    InvalidRequest(String),

    #[error("Method not allowed. Use POST.")]
    MethodNotAllowed,

    #[error("Server configuration error: API key not found")]
    MissingApiKey,

    /// Forwarded provider rejection; the response reuses the upstream
    /// status code.
    #[error("{message}")]
    Upstream { status: u16, message: String },

    #[error("No audio content received from Google")]
    NoAudioContent,

    #[error("Upstream synthesis request timed out")]
    UpstreamTimeout,

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl From<TtsError> for ApiError {
    fn from(e: TtsError) -> Self {
        match e {
            TtsError::Upstream { status, message } => ApiError::Upstream { status, message },
            TtsError::MissingAudio => ApiError::NoAudioContent,
            TtsError::Timeout => ApiError::UpstreamTimeout,
            other => ApiError::Internal(other.to_string()),
        }
    }
}

/// Error response structure; the body shape is part of the client-facing
/// wire contract.
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Upstream { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            ApiError::UpstreamTimeout => StatusCode::GATEWAY_TIMEOUT,
            ApiError::MissingApiKey | ApiError::NoAudioContent | ApiError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let message = self.to_string();
        if status.is_server_error() {
            tracing::error!("Request failed with {}: {}", status.as_u16(), message);
        } else {
            tracing::warn!("Request rejected with {}: {}", status.as_u16(), message);
        }

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tts_error_mapping() {
        let err: ApiError = TtsError::Upstream {
            status: 403,
            message: "quota exceeded".to_string(),
        }
        .into();
        assert!(matches!(
            err,
            ApiError::Upstream { status: 403, ref message } if message == "quota exceeded"
        ));

        assert!(matches!(
            ApiError::from(TtsError::MissingAudio),
            ApiError::NoAudioContent
        ));
        assert!(matches!(
            ApiError::from(TtsError::Timeout),
            ApiError::UpstreamTimeout
        ));
    }

    #[test]
    fn test_response_status_codes() {
        let cases = [
            (
                ApiError::InvalidRequest("bad".to_string()),
                StatusCode::BAD_REQUEST,
            ),
            (ApiError::MethodNotAllowed, StatusCode::METHOD_NOT_ALLOWED),
            (ApiError::MissingApiKey, StatusCode::INTERNAL_SERVER_ERROR),
            (
                ApiError::Upstream {
                    status: 403,
                    message: "quota exceeded".to_string(),
                },
                StatusCode::FORBIDDEN,
            ),
            (ApiError::NoAudioContent, StatusCode::INTERNAL_SERVER_ERROR),
            (ApiError::UpstreamTimeout, StatusCode::GATEWAY_TIMEOUT),
            (
                ApiError::Internal("boom".to_string()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }

    #[test]
    fn test_invalid_upstream_status_falls_back_to_bad_gateway() {
        let err = ApiError::Upstream {
            status: 99,
            message: "weird".to_string(),
        };
        assert_eq!(err.into_response().status(), StatusCode::BAD_GATEWAY);
    }
}
