use tts_client::SynthesisParams;

use crate::error::ApiError;
use crate::GenerateSpeechRequest;

/// Maximum text length accepted by the relay; matches the provider's own
/// per-request limit.
pub const MAX_TEXT_LENGTH: usize = 5000;

/// Check the inbound request shape and produce validated synthesis
/// parameters. Absent and empty fields are treated the same way.
pub fn validate_generate_request(
    req: &GenerateSpeechRequest,
) -> Result<SynthesisParams, ApiError> {
    let text = req.text.as_deref().unwrap_or("").trim();
    let voice = req.voice.as_deref().unwrap_or("").trim();

    if text.is_empty() || voice.is_empty() {
        return Err(ApiError::InvalidRequest(
            "Missing required fields: text and voice".to_string(),
        ));
    }

    if text.chars().count() > MAX_TEXT_LENGTH {
        return Err(ApiError::InvalidRequest(format!(
            "Text too long (max {} characters)",
            MAX_TEXT_LENGTH
        )));
    }

    // Absent, zero, and non-finite speeds all fall back to normal rate.
    let speed = match req.speed {
        Some(s) if s.is_finite() && s != 0.0 => s,
        _ => 1.0,
    };

    Ok(SynthesisParams {
        text: text.to_string(),
        voice: voice.to_string(),
        speed,
    })
}
