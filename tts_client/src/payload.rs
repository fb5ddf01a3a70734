use serde::{Deserialize, Serialize};

use crate::SynthesisParams;

/// The only encoding this relay requests from the provider.
pub const AUDIO_ENCODING: &str = "MP3";

/// Request body for the Google Cloud TTS `text:synthesize` endpoint.
#[derive(Serialize)]
pub struct SynthesizeRequest<'a> {
    pub input: SynthesisInput<'a>,
    pub voice: VoiceSelection<'a>,
    #[serde(rename = "audioConfig")]
    pub audio_config: AudioConfig,
}

#[derive(Serialize)]
pub struct SynthesisInput<'a> {
    pub text: &'a str,
}

#[derive(Serialize)]
pub struct VoiceSelection<'a> {
    #[serde(rename = "languageCode")]
    pub language_code: String,
    pub name: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioConfig {
    pub audio_encoding: &'static str,
    pub speaking_rate: f64,
    pub pitch: f64,
    pub volume_gain_db: f64,
}

impl<'a> SynthesizeRequest<'a> {
    pub fn from_params(params: &'a SynthesisParams) -> Self {
        SynthesizeRequest {
            input: SynthesisInput { text: &params.text },
            voice: VoiceSelection {
                language_code: language_code(&params.voice),
                name: &params.voice,
            },
            audio_config: AudioConfig {
                audio_encoding: AUDIO_ENCODING,
                speaking_rate: params.speed,
                pitch: 0.0,
                volume_gain_db: 0.0,
            },
        }
    }
}

/// Success body: base64-encoded audio. The field is optional because the
/// provider can return 200 with the payload missing, which the relay must
/// report as its own error.
#[derive(Deserialize)]
pub struct SynthesizeResponse {
    #[serde(rename = "audioContent")]
    pub audio_content: Option<String>,
}

/// Derive the BCP-47 language code from a full voice name, e.g.
/// `en-US-Neural2-A` -> `en-US`.
pub fn language_code(voice: &str) -> String {
    voice.split('-').take(2).collect::<Vec<_>>().join("-")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_language_code_from_voice_name() {
        assert_eq!(language_code("en-US-Neural2-A"), "en-US");
        assert_eq!(language_code("de-DE-Wavenet-B"), "de-DE");
        assert_eq!(language_code("en-US"), "en-US");
        assert_eq!(language_code("en"), "en");
    }

    #[test]
    fn test_synthesize_request_shape() {
        let params = SynthesisParams {
            text: "Hello world, this is a test.".to_string(),
            voice: "en-US-Neural2-A".to_string(),
            speed: 1.25,
        };
        let body = serde_json::to_value(SynthesizeRequest::from_params(&params)).unwrap();
        assert_eq!(
            body,
            json!({
                "input": { "text": "Hello world, this is a test." },
                "voice": { "languageCode": "en-US", "name": "en-US-Neural2-A" },
                "audioConfig": {
                    "audioEncoding": "MP3",
                    "speakingRate": 1.25,
                    "pitch": 0.0,
                    "volumeGainDb": 0.0
                }
            })
        );
    }

    #[test]
    fn test_synthesize_response_missing_audio() {
        let resp: SynthesizeResponse = serde_json::from_str("{}").unwrap();
        assert!(resp.audio_content.is_none());

        let resp: SynthesizeResponse =
            serde_json::from_str(r#"{"audioContent":"aGVsbG8="}"#).unwrap();
        assert_eq!(resp.audio_content.as_deref(), Some("aGVsbG8="));
    }
}
